//! # Inline Parsing
//!
//! The inline grammar scans block text into [`InlineToken`]s. Tokens are
//! resolved and rendered by the driver: reference keys are looked up there,
//! once the block pass has registered every definition.

pub mod cursor;
pub mod grammar;
pub mod kinds;
pub mod types;

pub use grammar::InlineGrammar;
pub use types::InlineToken;
