pub mod code_span;
pub mod emphasis;
pub mod line_break;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use line_break::LineBreak;
pub use link::Link;
