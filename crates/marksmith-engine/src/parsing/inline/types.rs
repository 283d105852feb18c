/// Output of an inline rule handler. Unmatched text is not a token: the
/// scanner yields it as raw text.
///
/// Texts that can hold further inline markup (link text, emphasis,
/// strikethrough) are kept as source and parsed recursively while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineToken {
    /// A backslash-escaped character, without the backslash.
    Escape(String),
    Email(String),
    /// `text` is `None` for autolinks, which show the URL itself.
    Link {
        url: String,
        text: Option<String>,
        title: Option<String>,
    },
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    /// `[text][key]`, or `[text]` when `key` is `None`. An empty `key`
    /// (`[text][]`) also resolves by `text`.
    RefLink {
        text: String,
        key: Option<String>,
    },
    RefImage {
        alt: String,
        key: Option<String>,
    },
    /// `[^key]` with the key as written.
    Footnote(String),
    Emphasis {
        text: String,
        level: u8,
    },
    Codespan(String),
    Strikethrough(String),
    Linebreak,
    InlineHtml(String),
}

impl InlineToken {
    /// The key a reference resolves by: `key` unless it is blank, else `text`.
    pub fn lookup_key<'a>(text: &'a str, key: &'a Option<String>) -> &'a str {
        key.as_deref().filter(|k| !k.trim().is_empty()).unwrap_or(text)
    }

    /// The source a reference token was matched from, used when its key does
    /// not resolve.
    pub fn literal_key(key: &Option<String>) -> String {
        key.as_deref()
            .map(|k| format!("[{k}]"))
            .unwrap_or_default()
    }
}
