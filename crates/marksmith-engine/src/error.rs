use thiserror::Error;

/// Errors raised while building a grammar.
///
/// These are programmer errors in custom rules and surface before any
/// document is parsed. Parsing and rendering themselves never fail.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Invalid pattern for rule `{rule}`: {source}")]
    InvalidPattern {
        rule: String,
        source: regex::Error,
    },

    #[error("Unknown rule `{0}`")]
    UnknownRule(String),

    #[error("Duplicate rule `{0}`")]
    DuplicateRule(String),
}
