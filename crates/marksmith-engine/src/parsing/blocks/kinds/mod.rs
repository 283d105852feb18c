pub mod block_quote;
pub mod code_fence;
pub mod definition;
pub mod heading;
pub mod lines;
pub mod list;
pub mod paragraph;
pub mod table;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use definition::Definition;
pub use heading::Heading;
pub use list::{List, ListBody, ListMarker, MarkerKind};
pub use paragraph::Paragraph;
pub use table::{Align, Table};
