use crate::state::{FootnoteDefinition, LinkDefinition};

use super::kinds::{Heading, ListBody, Table};

/// Indented or fenced code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    pub lang: Option<String>,
}

/// Output of a block rule handler, before recursive post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockToken {
    Newline,
    Paragraph(String),
    Heading(Heading),
    BlockCode(CodeBlock),
    Hrule,
    Table(Table),
    /// Quote body with one prefix level removed, not yet parsed.
    BlockQuote(String),
    List(ListBody),
    DefLink {
        key: String,
        def: LinkDefinition,
    },
    DefFootnote {
        key: String,
        def: FootnoteDefinition,
    },
    BlockHtml(String),
}

/// A parsed block. Inline content is kept as source text and parsed while
/// rendering, once every definition is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Newline,
    Paragraph(String),
    /// Text of a tight list item, rendered without a paragraph wrapper.
    BlockText(String),
    Heading(Heading),
    BlockCode(CodeBlock),
    Hrule,
    Table(Table),
    BlockQuote(Vec<Block>),
    List(ListBlock),
    BlockHtml(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    pub ordered: bool,
    pub start: Option<u64>,
    pub items: Vec<Vec<Block>>,
}
