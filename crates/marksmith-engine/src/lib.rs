pub mod error;
pub mod escape;
pub mod markdown;
pub mod parsing;
pub mod renderer;
pub mod scanner;
pub mod state;

// Re-export key types for easier usage
pub use error::GrammarError;
pub use markdown::{Markdown, MarkdownBuilder, RenderOptions, render};
pub use renderer::{Align, AstRenderer, HtmlRenderer, Node, RenderMode, Renderer};
pub use state::ParseState;
