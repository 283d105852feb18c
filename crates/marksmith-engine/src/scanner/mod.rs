//! # Scanner
//!
//! A generic, priority-ordered multi-pattern scanner. It knows nothing about
//! markdown: block and inline grammars are both just [`Grammar`]s fed to it.
//!
//! ## Matching Contract
//!
//! Given rules `r0, r1, ...` and a text, the scanner repeatedly picks the
//! match that starts earliest at or after the cursor. When several rules
//! match at the same position the earlier rule wins, like an alternation
//! `(r0)|(r1)|...` with leftmost-first semantics.
//!
//! ```text
//! rules:  [emphasis, codespan]
//! text:   "a *b* `c`"
//! yields: Raw("a "), Token(emphasis), Raw(" "), Token(codespan)
//! ```
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges for capture groups
//! - **`pattern`**: `Pattern` (regex or hand-written matcher), `Groups`, `Match`
//! - **`grammar`**: `Rule`, `Grammar` and the splicing `GrammarBuilder`
//! - **`scan`**: the lazy `Scanner` iterator

pub mod grammar;
pub mod pattern;
pub mod scan;
pub mod span;

pub use grammar::{Grammar, GrammarBuilder, Handler, PatternSource, Rule};
pub use pattern::{Groups, Match, Pattern};
pub use scan::{Scanned, Scanner};
pub use span::Span;
