//! # Renderers
//!
//! [`Renderer`] is the output extension point: one method per node kind.
//! The driver renders composite nodes child-first and hands the children
//! over as an ordered `Vec<Self::Output>`, so the same dispatch serves
//! string output ([`HtmlRenderer`]) and tree output ([`AstRenderer`]).

pub mod ast;
pub mod html;

pub use crate::parsing::blocks::Align;
pub use ast::{AstRenderer, Node};
pub use html::HtmlRenderer;

/// Whether a renderer concatenates text or builds a persistent tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Html,
    Tree,
}

/// Capability set every output backend implements.
pub trait Renderer {
    /// One rendered node.
    type Output;
    /// The rendered document.
    type Document;

    fn mode(&self) -> RenderMode;

    // Inline level.
    fn text(&self, text: &str) -> Self::Output;
    /// A backslash-escaped character.
    fn escape(&self, text: &str) -> Self::Output;
    fn email(&self, address: &str) -> Self::Output;
    fn link(&self, url: &str, children: Vec<Self::Output>, title: Option<&str>) -> Self::Output;
    fn image(&self, src: &str, alt: &str, title: Option<&str>) -> Self::Output;
    /// `level` is 1 (emphasis), 2 (strong) or 3 (both).
    fn emphasis(&self, children: Vec<Self::Output>, level: u8) -> Self::Output;
    fn codespan(&self, code: &str) -> Self::Output;
    fn strikethrough(&self, children: Vec<Self::Output>) -> Self::Output;
    fn linebreak(&self) -> Self::Output;
    fn inline_html(&self, html: &str) -> Self::Output;
    fn footnote_ref(&self, key: &str, index: usize) -> Self::Output;

    // Block level.
    fn paragraph(&self, children: Vec<Self::Output>) -> Self::Output;
    /// Text of a tight list item.
    fn block_text(&self, children: Vec<Self::Output>) -> Self::Output;
    fn heading(&self, children: Vec<Self::Output>, level: u8) -> Self::Output;
    fn block_code(&self, code: &str, lang: Option<&str>) -> Self::Output;
    fn block_quote(&self, children: Vec<Self::Output>) -> Self::Output;
    fn block_html(&self, html: &str) -> Self::Output;
    fn hrule(&self) -> Self::Output;
    fn newline(&self) -> Self::Output;
    fn list(&self, items: Vec<Self::Output>, ordered: bool, start: Option<u64>) -> Self::Output;
    fn list_item(&self, children: Vec<Self::Output>) -> Self::Output;
    fn table(&self, head: Self::Output, body: Vec<Self::Output>) -> Self::Output;
    fn table_row(&self, cells: Vec<Self::Output>) -> Self::Output;
    fn table_cell(
        &self,
        children: Vec<Self::Output>,
        align: Option<Align>,
        is_head: bool,
    ) -> Self::Output;
    fn footnote_item(&self, children: Vec<Self::Output>, key: &str, index: usize)
    -> Self::Output;
    fn footnotes(&self, items: Vec<Self::Output>) -> Self::Output;

    fn document(&self, children: Vec<Self::Output>) -> Self::Document;
}
