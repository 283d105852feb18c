use std::collections::HashMap;

use crate::{
    escape::keyify,
    parsing::{
        blocks::{Block, Table},
        inline::{InlineGrammar, InlineToken},
    },
    renderer::{RenderMode, Renderer},
    scanner::Scanned,
    state::ParseState,
};

/// Footnote keys in order of first reference, numbered from 1.
#[derive(Debug, Default)]
struct FootnoteRefs {
    keys: Vec<String>,
    numbers: HashMap<String, usize>,
}

impl FootnoteRefs {
    fn number(&mut self, key: &str) -> usize {
        if let Some(n) = self.numbers.get(key) {
            return *n;
        }
        self.keys.push(key.to_string());
        let n = self.keys.len();
        self.numbers.insert(key.to_string(), n);
        n
    }
}

/// One rendering walk over parsed blocks. Definitions are only read.
pub(super) struct RenderPass<'m, R> {
    renderer: &'m R,
    inline: &'m InlineGrammar,
    state: &'m ParseState,
    footnotes: FootnoteRefs,
    /// Current nesting of recursively parsed inline text.
    depth: usize,
}

impl<'m, R: Renderer> RenderPass<'m, R> {
    pub(super) fn new(renderer: &'m R, inline: &'m InlineGrammar, state: &'m ParseState) -> Self {
        Self {
            renderer,
            inline,
            state,
            footnotes: FootnoteRefs::default(),
            depth: 0,
        }
    }

    pub(super) fn blocks(&mut self, blocks: &[Block]) -> Vec<R::Output> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            out.extend(self.block(block));
        }
        out
    }

    fn block(&mut self, block: &Block) -> Option<R::Output> {
        let r = self.renderer;
        let output = match block {
            // Newlines carry no markup in string output.
            Block::Newline if r.mode() == RenderMode::Html => return None,
            Block::Newline => r.newline(),
            Block::Paragraph(text) => r.paragraph(self.inline(text)),
            Block::BlockText(text) => r.block_text(self.inline(text)),
            Block::Heading(heading) => r.heading(self.inline(&heading.text), heading.level),
            Block::BlockCode(code) => r.block_code(&code.code, code.lang.as_deref()),
            Block::Hrule => r.hrule(),
            Block::BlockHtml(html) => r.block_html(html),
            Block::BlockQuote(children) => r.block_quote(self.blocks(children)),
            Block::List(list) => {
                let mut items = Vec::with_capacity(list.items.len());
                for item in &list.items {
                    items.push(r.list_item(self.blocks(item)));
                }
                r.list(items, list.ordered, list.start)
            }
            Block::Table(table) => self.table(table),
        };
        Some(output)
    }

    fn table(&mut self, table: &Table) -> R::Output {
        let r = self.renderer;
        let mut head = Vec::with_capacity(table.header.len());
        for (col, cell) in table.header.iter().enumerate() {
            head.push(r.table_cell(self.inline(cell), table.align(col), true));
        }

        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let mut cells = Vec::with_capacity(row.len());
            for (col, cell) in row.iter().enumerate() {
                cells.push(r.table_cell(self.inline(cell), table.align(col), false));
            }
            rows.push(r.table_row(cells));
        }
        r.table(r.table_row(head), rows)
    }

    fn inline(&mut self, text: &str) -> Vec<R::Output> {
        self.inline_in(text, false)
    }

    /// Renders the inner text of a link, emphasis or strikethrough. Past
    /// `max_depth` levels the text is kept literal, so rules whose output
    /// matches themselves again still terminate.
    fn nested(&mut self, text: &str, in_link: bool) -> Vec<R::Output> {
        if self.depth >= self.state.max_depth() {
            log::debug!("inline nesting exceeds {}, keeping text literal", self.state.max_depth());
            return vec![self.renderer.text(text)];
        }
        self.depth += 1;
        let out = self.inline_in(text, in_link);
        self.depth -= 1;
        out
    }

    /// Renders inline text. Inside link text, nested links keep only their
    /// text.
    fn inline_in(&mut self, text: &str, in_link: bool) -> Vec<R::Output> {
        let inline = self.inline;
        let mut out = vec![];
        for scanned in inline.grammar().scan(text) {
            match scanned {
                Scanned::Raw(raw) => out.push(self.renderer.text(raw)),
                Scanned::Token { value, .. } => self.inline_token(value, in_link, &mut out),
            }
        }
        out
    }

    fn inline_token(&mut self, token: InlineToken, in_link: bool, out: &mut Vec<R::Output>) {
        let r = self.renderer;
        match token {
            InlineToken::Escape(c) => out.push(r.escape(&c)),
            InlineToken::Email(address) => out.push(r.email(&address)),
            InlineToken::Link { url, text, title } => {
                let children = match text {
                    Some(text) => self.nested(&text, true),
                    None => vec![r.text(&url)],
                };
                self.link(&url, children, title.as_deref(), in_link, out);
            }
            InlineToken::Image { src, alt, title } => {
                out.push(r.image(&src, &alt, title.as_deref()))
            }
            InlineToken::RefLink { text, key } => {
                let lookup = keyify(InlineToken::lookup_key(&text, &key));
                let state = self.state;
                match state.links.get(&lookup) {
                    Some(def) => {
                        let children = self.nested(&text, true);
                        self.link(&def.url, children, def.title.as_deref(), in_link, out);
                    }
                    None => {
                        log::debug!("unresolved link reference {lookup:?}");
                        out.push(r.text("["));
                        out.extend(self.nested(&text, in_link));
                        out.push(r.text(&format!("]{}", InlineToken::literal_key(&key))));
                    }
                }
            }
            InlineToken::RefImage { alt, key } => {
                let lookup = keyify(InlineToken::lookup_key(&alt, &key));
                match self.state.links.get(&lookup) {
                    Some(def) => out.push(r.image(&def.url, &alt, def.title.as_deref())),
                    None => {
                        log::debug!("unresolved image reference {lookup:?}");
                        let literal = format!("![{alt}]{}", InlineToken::literal_key(&key));
                        out.push(r.text(&literal));
                    }
                }
            }
            InlineToken::Footnote(key) => {
                let lookup = keyify(&key);
                if self.state.footnotes.contains(&lookup) {
                    let number = self.footnotes.number(&lookup);
                    out.push(r.footnote_ref(&lookup, number));
                } else {
                    log::debug!("unresolved footnote reference {lookup:?}");
                    out.push(r.text(&format!("[^{key}]")));
                }
            }
            InlineToken::Emphasis { text, level } => {
                let children = self.nested(&text, in_link);
                out.push(r.emphasis(children, level));
            }
            InlineToken::Codespan(code) => out.push(r.codespan(&code)),
            InlineToken::Strikethrough(text) => {
                let children = self.nested(&text, in_link);
                out.push(r.strikethrough(children));
            }
            InlineToken::Linebreak => out.push(r.linebreak()),
            InlineToken::InlineHtml(html) => out.push(r.inline_html(&html)),
        }
    }

    fn link(
        &self,
        url: &str,
        children: Vec<R::Output>,
        title: Option<&str>,
        in_link: bool,
        out: &mut Vec<R::Output>,
    ) {
        if in_link {
            out.extend(children);
        } else {
            out.push(self.renderer.link(url, children, title));
        }
    }

    /// Renders every referenced footnote in first-reference order. Bodies may
    /// reference further footnotes, which are appended as they are met.
    pub(super) fn footnotes(&mut self) -> Option<R::Output> {
        let mut items = vec![];
        let mut next = 0;
        while next < self.footnotes.keys.len() {
            let key = self.footnotes.keys[next].clone();
            next += 1;
            let state = self.state;
            let Some(def) = state.footnotes.get(&key) else {
                continue;
            };
            let children = self.blocks(&def.blocks);
            items.push(self.renderer.footnote_item(children, &key, next));
        }
        (!items.is_empty()).then(|| self.renderer.footnotes(items))
    }
}
