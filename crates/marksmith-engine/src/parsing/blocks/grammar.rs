use crate::{
    error::GrammarError,
    scanner::{Grammar, GrammarBuilder, Match, Pattern},
};

use super::{
    kinds::{BlockQuote, CodeFence, Definition, Heading, List, Table, lines::strip_indent},
    types::{BlockToken, CodeBlock},
};

const NEWLINE: &str = r"(?m)^(?:[ \t]*\n)+";
const HRULE: &str = r"(?m)^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})(?:\n+|\z)";
const BLOCK_CODE: &str = r"(?m)^ {4}[^\n]*(?:\n+ {4}[^\n]*)*(?:\n+|\z)";
const HEADING: &str = r"(?m)^ {0,3}(#{1,6})(?:[ \t]+([^\n]*?))?(?:[ \t]+#+)?[ \t]*(?:\n+|\z)";
const NPTABLE: &str = concat!(
    r"(?m)^ {0,3}([^|\s][^\n]*\|[^\n]*)\n",
    r"( {0,3}\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)+\|?[ \t]*)(?:\n|\z)",
    r"((?:[^\n]*\|[^\n]*(?:\n|\z))*)\n*",
);
const LHEADING: &str = r"(?m)^([^\n]*\S[^\n]*)\n {0,3}(=+|-+)[ \t]*(?:\n+|\z)";
const DEF_LINK: &str = concat!(
    r"(?m)^ {0,3}\[([^^\]][^\]]*)\]:[ \t]*<?([^\s>]+)>?",
    r#"(?:[ \t]+(?:"([^"\n]*)"|'([^'\n]*)'|\(([^)\n]*)\)))?[ \t]*(?:\n+|\z)"#,
);
const DEF_FOOTNOTE: &str =
    r"(?m)^ {0,3}\[\^([^\]\n]+)\]:[ \t]*([^\n]*(?:\n+|\z)(?: +[^\n]*(?:\n+|\z))*)";
const TABLE: &str = concat!(
    r"(?m)^ {0,3}(\|[^\n]*)\n",
    r"( {0,3}\|[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?[ \t]*)(?:\n|\z)",
    r"((?: {0,3}\|[^\n]*(?:\n|\z))*)\n*",
);
const BLOCK_HTML: &str = concat!(
    r"(?mi)^ {0,3}<(?:!--|/?(?:address|article|aside|blockquote|body|center|details|dialog|",
    r"dd|div|dl|dt|fieldset|figcaption|figure|footer|form|h[1-6]|head|header|hr|html|",
    r"iframe|legend|li|link|main|menu|nav|ol|p|pre|section|script|style|summary|table|",
    r"tbody|td|tfoot|th|thead|title|tr|ul)(?:[ \t/>]|$))",
    r"[^\n]*(?:\n[ \t]*\S[^\n]*)*(?:\n+|\z)",
);

/// The block-level rule sets: one for documents and quote bodies, and one for
/// list items, which never consume definitions.
#[derive(Debug, Clone)]
pub struct BlockGrammar {
    document: Grammar<BlockToken>,
    list_item: Grammar<BlockToken>,
}

impl BlockGrammar {
    /// Rules left out of the list item grammar.
    pub const DEFINITION_RULES: [&'static str; 2] = ["def_link", "def_footnote"];

    pub fn new() -> Result<Self, GrammarError> {
        Self::from_builder(Self::default_rules())
    }

    /// Builds both rule sets from a (possibly customized) default builder.
    pub fn from_builder(builder: GrammarBuilder<BlockToken>) -> Result<Self, GrammarError> {
        let document = builder.build()?;
        let list_item = document.without(&Self::DEFINITION_RULES);
        Ok(Self {
            document,
            list_item,
        })
    }

    pub fn document(&self) -> &Grammar<BlockToken> {
        &self.document
    }

    pub fn list_item(&self) -> &Grammar<BlockToken> {
        &self.list_item
    }

    /// The default rules in priority order.
    pub fn default_rules() -> GrammarBuilder<BlockToken> {
        Grammar::builder()
            .push("newline", NEWLINE, |_| Some(BlockToken::Newline))
            .push("hrule", HRULE, |_| Some(BlockToken::Hrule))
            .push("block_code", BLOCK_CODE, block_code)
            .push("fences", Pattern::at_line_start(CodeFence::find), fences)
            .push("heading", HEADING, heading)
            .push("nptable", NPTABLE, table)
            .push("lheading", LHEADING, lheading)
            .push("block_quote", Pattern::at_line_start(BlockQuote::find), |m| {
                let quoted = m.as_str().trim_end_matches('\n');
                Some(BlockToken::BlockQuote(BlockQuote::body(quoted)))
            })
            .push(
                "unordered_list",
                Pattern::at_line_start(|text, pos| List::find(text, pos, false)),
                list,
            )
            .push(
                "ordered_list",
                Pattern::at_line_start(|text, pos| List::find(text, pos, true)),
                list,
            )
            .push("def_link", DEF_LINK, def_link)
            .push("def_footnote", DEF_FOOTNOTE, def_footnote)
            .push("table", TABLE, table)
            .push("block_html", BLOCK_HTML, |m| {
                Some(BlockToken::BlockHtml(m.as_str().trim_end().to_string()))
            })
    }
}

/// Joins code lines, ending non-empty code with exactly one newline.
fn code_text<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut code = lines.collect::<Vec<_>>().join("\n");
    code.truncate(code.trim_end_matches('\n').len());
    if !code.is_empty() {
        code.push('\n');
    }
    code
}

fn block_code(m: &Match<'_>) -> Option<BlockToken> {
    let code = code_text(m.as_str().split('\n').map(|line| strip_indent(line, 4)));
    Some(BlockToken::BlockCode(CodeBlock { code, lang: None }))
}

fn fences(m: &Match<'_>) -> Option<BlockToken> {
    let code = code_text(m.get(3).unwrap_or("").split('\n'));
    Some(BlockToken::BlockCode(CodeBlock {
        code,
        lang: m.get(2).map(str::to_string),
    }))
}

fn heading(m: &Match<'_>) -> Option<BlockToken> {
    Some(BlockToken::Heading(Heading::atx(m.get(1)?, m.get(2))))
}

fn lheading(m: &Match<'_>) -> Option<BlockToken> {
    Some(BlockToken::Heading(Heading::setext(m.get(1)?, m.get(2)?)))
}

fn table(m: &Match<'_>) -> Option<BlockToken> {
    Some(BlockToken::Table(Table::parse(
        m.get(1)?,
        m.get(2)?,
        m.get(3).unwrap_or(""),
    )))
}

fn list(m: &Match<'_>) -> Option<BlockToken> {
    List::split(m.as_str()).map(BlockToken::List)
}

fn def_link(m: &Match<'_>) -> Option<BlockToken> {
    let title = m.get(3).or(m.get(4)).or(m.get(5));
    Some(BlockToken::DefLink {
        key: m.get(1)?.to_string(),
        def: Definition::link(m.get(2)?, title),
    })
}

fn def_footnote(m: &Match<'_>) -> Option<BlockToken> {
    let label = m.get(1)?;
    Some(BlockToken::DefFootnote {
        key: label.to_string(),
        def: Definition::footnote(label, m.get(2).unwrap_or("")),
    })
}
