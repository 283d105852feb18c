//! # Block Parsing
//!
//! The block grammar splits a document into blocks; quote bodies and list
//! items are re-scanned recursively under a depth limit.
//!
//! ## Modules
//!
//! - **`kinds`**: Per-construct delimiter knowledge and hand-written matchers
//! - **`grammar`**: `BlockGrammar`, the default rules in priority order
//! - **`parser`**: `BlockParser`, recursion and definition registration
//! - **`types`**: `BlockToken` (handler output) and `Block` (parsed tree)

pub mod grammar;
pub mod kinds;
pub mod parser;
pub mod types;

pub use grammar::BlockGrammar;
pub use kinds::{Align, Heading, Table};
pub use parser::BlockParser;
pub use types::{Block, BlockToken, CodeBlock, ListBlock};
