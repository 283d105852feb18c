use crate::{
    error::GrammarError,
    scanner::{Grammar, GrammarBuilder, Match, Pattern},
};

use super::{
    kinds::{CodeSpan, Emphasis, LineBreak, Link},
    types::InlineToken,
};

const ESCAPE: &str = r##"\\([\\!"#$%&'()*+,./:;<=>?@\[\]^`{}|_~-])"##;
const AUTO_EMAIL: &str = r"<([A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+)>";
const AUTO_LINK: &str = r"<([A-Za-z][A-Za-z0-9+.-]{1,31}:[^<>\s]*)>";
const URL_LINK: &str = r"\bhttps?://[^\s<]*[^\s<?!.,:;*_~)\]'\x22]";
const FOOTNOTE: &str = r"\[\^([^\]\s]+)\]";
const LINK_TEXT: &str = r"((?:\[[^\[\]]*\]|\\.|`[^`]*`|[^\[\]\\`])*?)";
const STD_LINK_TAIL: &str = concat!(
    r#"\]\(\s*(?:<([^<>\n]*)>|([^\s()<>]*(?:\([^\s()<>]*\)[^\s()<>]*)*))"#,
    r#"(?:\s+("[^"]*"|'[^']*'|\([^)]*\)))?\s*\)"#,
);
const STRIKETHROUGH: &str = r"~~([^\s~](?:[^~]*[^\s~])?)~~";
const INLINE_HTML: &str = concat!(
    r"(?s)<!--.*?-->|</[A-Za-z][A-Za-z0-9-]*\s*>|",
    r#"<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*"#,
    r#"(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>"#,
);

/// The inline rule set.
#[derive(Debug, Clone)]
pub struct InlineGrammar {
    rules: Grammar<InlineToken>,
}

impl InlineGrammar {
    /// Default rules. With `hard_wrap`, every inner newline is a line break.
    pub fn new(hard_wrap: bool) -> Result<Self, GrammarError> {
        Self::from_builder(Self::default_rules(hard_wrap))
    }

    pub fn from_builder(builder: GrammarBuilder<InlineToken>) -> Result<Self, GrammarError> {
        Ok(Self {
            rules: builder.build()?,
        })
    }

    pub fn grammar(&self) -> &Grammar<InlineToken> {
        &self.rules
    }

    /// The default rules in priority order.
    pub fn default_rules(hard_wrap: bool) -> GrammarBuilder<InlineToken> {
        Grammar::builder()
            .push("escape", ESCAPE, |m| {
                Some(InlineToken::Escape(m.get(1)?.to_string()))
            })
            .push("auto_email", AUTO_EMAIL, |m| {
                Some(InlineToken::Email(m.get(1)?.to_string()))
            })
            .push("auto_link", AUTO_LINK, |m| autolink(m.get(1)?))
            .push("url_link", URL_LINK, |m| autolink(m.as_str()))
            .push("footnote", FOOTNOTE, |m| {
                Some(InlineToken::Footnote(m.get(1)?.to_string()))
            })
            .push("std_link", format!(r"(!?)\[{LINK_TEXT}{STD_LINK_TAIL}"), std_link)
            .push(
                "ref_link",
                format!(r"(!?)\[{LINK_TEXT}\]\[([^\[\]]*)\]"),
                |m| reference(m.get(1), m.get(2)?, m.get(3)),
            )
            .push("alt_ref_link", format!(r"(!?)\[{LINK_TEXT}\]"), |m| {
                reference(m.get(1), m.get(2)?, None)
            })
            .push("emphasis", Emphasis::pattern(), |m| {
                let level = m.span().len() - m.get(1)?.len();
                Some(InlineToken::Emphasis {
                    text: m.get(1)?.to_string(),
                    level: (level / 2) as u8,
                })
            })
            .push("codespan", Pattern::at_any_of(b"`", CodeSpan::find), |m| {
                Some(InlineToken::Codespan(m.get(1)?.to_string()))
            })
            .push("strikethrough", STRIKETHROUGH, |m| {
                Some(InlineToken::Strikethrough(m.get(1)?.to_string()))
            })
            .push(
                "linebreak",
                Pattern::matcher(move |text, from| LineBreak::find(text, from, hard_wrap)),
                |_| Some(InlineToken::Linebreak),
            )
            .push("inline_html", INLINE_HTML, |m| {
                Some(InlineToken::InlineHtml(m.as_str().to_string()))
            })
    }
}

fn autolink(url: &str) -> Option<InlineToken> {
    Some(InlineToken::Link {
        url: url.to_string(),
        text: None,
        title: None,
    })
}

fn std_link(m: &Match<'_>) -> Option<InlineToken> {
    let text = m.get(2)?.to_string();
    let url = Link::destination(m.get(3), m.get(4));
    let title = Link::title(m.get(5));
    Some(if Link::is_image(m.get(1)) {
        InlineToken::Image {
            src: url,
            alt: text,
            title,
        }
    } else {
        InlineToken::Link {
            url,
            text: Some(text),
            title,
        }
    })
}

fn reference(bang: Option<&str>, text: &str, key: Option<&str>) -> Option<InlineToken> {
    let key = key.map(str::to_string);
    Some(if Link::is_image(bang) {
        InlineToken::RefImage {
            alt: text.to_string(),
            key,
        }
    } else {
        InlineToken::RefLink {
            text: text.to_string(),
            key,
        }
    })
}
