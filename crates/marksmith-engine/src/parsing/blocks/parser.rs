use crate::{
    escape::keyify,
    scanner::{Grammar, Scanned},
    state::{FootnoteDefinition, Nesting, ParseState},
};

use super::{
    grammar::BlockGrammar,
    kinds::{ListBody, Paragraph},
    types::{Block, BlockToken, ListBlock},
};

/// Runs the block grammar over a text, recursing into quotes and list items.
pub struct BlockParser<'g> {
    grammar: &'g BlockGrammar,
}

impl<'g> BlockParser<'g> {
    pub fn new(grammar: &'g BlockGrammar) -> Self {
        Self { grammar }
    }

    /// Parses a document, registering its definitions in `state`.
    pub fn parse(&self, text: &str, state: &mut ParseState) -> Vec<Block> {
        self.parse_with(self.grammar.document(), text, state)
    }

    fn parse_with(
        &self,
        grammar: &Grammar<BlockToken>,
        text: &str,
        state: &mut ParseState,
    ) -> Vec<Block> {
        let mut blocks = vec![];
        for scanned in grammar.scan(text) {
            match scanned {
                Scanned::Raw(raw) => {
                    blocks.extend(Paragraph::split(raw).into_iter().map(Block::Paragraph))
                }
                Scanned::Token { value, .. } => blocks.extend(self.process(value, state)),
            }
        }
        blocks
    }

    fn process(&self, token: BlockToken, state: &mut ParseState) -> Option<Block> {
        let block = match token {
            BlockToken::Newline => Block::Newline,
            BlockToken::Paragraph(text) => Block::Paragraph(text),
            BlockToken::Heading(heading) => Block::Heading(heading),
            BlockToken::BlockCode(code) => Block::BlockCode(code),
            BlockToken::Hrule => Block::Hrule,
            BlockToken::Table(table) => Block::Table(table),
            BlockToken::BlockHtml(html) => Block::BlockHtml(html),
            BlockToken::BlockQuote(body) => self.block_quote(&body, state),
            BlockToken::List(body) => self.list(body, state),
            BlockToken::DefLink { key, def } => {
                state.links.insert(keyify(&key), def);
                return None;
            }
            BlockToken::DefFootnote { key, def } => {
                self.footnote(keyify(&key), def, state);
                return None;
            }
        };
        Some(block)
    }

    fn block_quote(&self, body: &str, state: &mut ParseState) -> Block {
        let max_depth = state.max_depth();
        let Some(mut guard) = state.descend(Nesting::BlockQuote) else {
            log::debug!("block quote nesting exceeds {max_depth}, keeping it flat");
            return Block::Paragraph(body.trim().to_string());
        };
        Block::BlockQuote(self.parse_with(self.grammar.document(), body, &mut guard))
    }

    /// Registers a footnote and parses its body. The outer definition is
    /// registered first so it wins over same-key definitions in its body.
    fn footnote(&self, key: String, def: FootnoteDefinition, state: &mut ParseState) {
        let text = def.text.clone();
        if !state.footnotes.insert(key.clone(), def) {
            return;
        }
        let max_depth = state.max_depth();
        let blocks = match state.descend(Nesting::Footnote) {
            Some(mut guard) => self.parse(&text, &mut guard),
            None => {
                log::debug!("footnote nesting exceeds {max_depth}, keeping body flat");
                Paragraph::split(&text).into_iter().map(Block::Paragraph).collect()
            }
        };
        if let Some(def) = state.footnotes.get_mut(&key) {
            def.blocks = blocks;
        }
    }

    fn list(&self, body: ListBody, state: &mut ParseState) -> Block {
        let max_depth = state.max_depth();
        let mut guard = state.descend(Nesting::List);
        if guard.is_none() {
            log::debug!("list nesting exceeds {max_depth}, keeping items flat");
        }

        let mut items = Vec::with_capacity(body.items.len());
        for item in &body.items {
            let Some(guard) = guard.as_mut() else {
                items.push(vec![Block::BlockText(item.trim().to_string())]);
                continue;
            };
            let blocks = self.parse_with(self.grammar.list_item(), item, guard);
            items.push(if body.loose { blocks } else { tighten(blocks) });
        }

        Block::List(ListBlock {
            ordered: body.first.is_ordered(),
            start: body.first.number,
            items,
        })
    }
}

/// Tight items show their paragraphs as bare text.
fn tighten(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|b| match b {
            Block::Paragraph(text) => Block::BlockText(text),
            other => other,
        })
        .collect()
}
