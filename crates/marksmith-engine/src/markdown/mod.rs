//! # Driver
//!
//! [`Markdown`] owns the grammars and a renderer. Rendering runs the whole
//! block pass first, so every reference and footnote definition is known
//! before any inline text is resolved, then walks the blocks through the
//! renderer and appends the footnotes.

mod pass;

use std::sync::OnceLock;

use crate::{
    error::GrammarError,
    parsing::{
        blocks::{Block, BlockGrammar, BlockParser, BlockToken},
        inline::{InlineGrammar, InlineToken},
    },
    renderer::{HtmlRenderer, Renderer},
    scanner::GrammarBuilder,
    state::{DEFAULT_MAX_DEPTH, ParseState},
};

use pass::RenderPass;

const TAB_WIDTH: usize = 4;

/// Options shared by the parser and the built-in HTML renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape raw HTML instead of passing it through.
    pub escape: bool,
    /// Self-close void elements.
    pub use_xhtml: bool,
    /// Turn every newline inside a paragraph into a line break.
    pub hard_wrap: bool,
    /// Deepest nesting of block quotes (and of lists) parsed recursively.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape: true,
            use_xhtml: false,
            hard_wrap: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl From<&RenderOptions> for HtmlRenderer {
    fn from(options: &RenderOptions) -> Self {
        HtmlRenderer::new(options.escape, options.use_xhtml)
    }
}

/// A configured markdown processor.
///
/// Grammars are immutable after construction, so one instance can render
/// many documents, from several threads if `R` allows it. Each call gets its
/// own [`ParseState`].
#[derive(Debug, Clone)]
pub struct Markdown<R = HtmlRenderer> {
    renderer: R,
    block: BlockGrammar,
    inline: InlineGrammar,
    max_depth: usize,
}

impl Markdown<HtmlRenderer> {
    /// An HTML processor configured entirely from `options`.
    pub fn html(options: &RenderOptions) -> Result<Self, GrammarError> {
        Self::new(HtmlRenderer::from(options), options)
    }
}

impl<R: Renderer> Markdown<R> {
    /// A processor with the default grammars. `options` controls parsing
    /// (`hard_wrap`, `max_depth`); the renderer carries its own settings.
    pub fn new(renderer: R, options: &RenderOptions) -> Result<Self, GrammarError> {
        Self::builder(renderer).options(*options).build()
    }

    pub fn builder(renderer: R) -> MarkdownBuilder<R> {
        MarkdownBuilder::new(renderer)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs the block pass only, returning the blocks and the collected
    /// definitions.
    pub fn parse(&self, text: &str) -> (Vec<Block>, ParseState) {
        let text = normalize(text);
        let mut state = ParseState::new(self.max_depth);
        let blocks = BlockParser::new(&self.block).parse(&text, &mut state);
        log::trace!(
            "parsed {} blocks, {} link and {} footnote definitions",
            blocks.len(),
            state.links.len(),
            state.footnotes.len()
        );
        (blocks, state)
    }

    pub fn render(&self, text: &str) -> R::Document {
        let (blocks, state) = self.parse(text);
        let mut pass = RenderPass::new(&self.renderer, &self.inline, &state);
        let mut children = pass.blocks(&blocks);
        children.extend(pass.footnotes());
        self.renderer.document(children)
    }
}

type BlockEdit = Box<dyn FnOnce(GrammarBuilder<BlockToken>) -> GrammarBuilder<BlockToken>>;
type InlineEdit = Box<dyn FnOnce(GrammarBuilder<InlineToken>) -> GrammarBuilder<InlineToken>>;

/// Builds a [`Markdown`] with custom options and grammar edits.
///
/// Edits receive the default rules and may splice, replace or remove rules
/// by name. Invalid patterns and unknown rule names surface from
/// [`MarkdownBuilder::build`].
pub struct MarkdownBuilder<R> {
    renderer: R,
    options: RenderOptions,
    block_edits: Vec<BlockEdit>,
    inline_edits: Vec<InlineEdit>,
}

impl<R: Renderer> MarkdownBuilder<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            options: RenderOptions::default(),
            block_edits: vec![],
            inline_edits: vec![],
        }
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn block_rules<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(GrammarBuilder<BlockToken>) -> GrammarBuilder<BlockToken> + 'static,
    {
        self.block_edits.push(Box::new(edit));
        self
    }

    pub fn inline_rules<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(GrammarBuilder<InlineToken>) -> GrammarBuilder<InlineToken> + 'static,
    {
        self.inline_edits.push(Box::new(edit));
        self
    }

    pub fn build(self) -> Result<Markdown<R>, GrammarError> {
        let block = self
            .block_edits
            .into_iter()
            .fold(BlockGrammar::default_rules(), |rules, edit| edit(rules));
        let inline = self
            .inline_edits
            .into_iter()
            .fold(InlineGrammar::default_rules(self.options.hard_wrap), |rules, edit| {
                edit(rules)
            });
        Ok(Markdown {
            renderer: self.renderer,
            block: BlockGrammar::from_builder(block)?,
            inline: InlineGrammar::from_builder(inline)?,
            max_depth: self.options.max_depth,
        })
    }
}

/// Renders `text` to HTML with the default options.
pub fn render(text: &str) -> String {
    static DEFAULT: OnceLock<Markdown<HtmlRenderer>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| Markdown::html(&RenderOptions::default()).expect("Invalid default grammar"))
        .render(text)
}

/// Unifies line endings and expands tabs to four-column stops.
fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !text.contains('\t') {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut col = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let n = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', n));
                col += n;
            }
            '\n' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}
