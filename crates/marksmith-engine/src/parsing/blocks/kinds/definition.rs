use crate::state::{FootnoteDefinition, LinkDefinition};

use super::lines::{is_blank, leading_spaces};

/// Reference and footnote definition helpers.
pub struct Definition;

impl Definition {
    pub const FOOTNOTE_MARKER: char = '^';

    pub fn link(url: &str, title: Option<&str>) -> LinkDefinition {
        LinkDefinition {
            url: url.trim().to_string(),
            title: title.map(|t| t.to_string()),
        }
    }

    /// Footnote body with continuation lines dedented by their common indent.
    pub fn footnote(label: &str, body: &str) -> FootnoteDefinition {
        let body = body.trim_end();
        let mut lines = body.split('\n');
        let first = lines.next().unwrap_or("").trim();
        let rest: Vec<&str> = lines.collect();
        let indent = rest
            .iter()
            .filter(|l| !is_blank(l))
            .map(|l| leading_spaces(l))
            .min()
            .unwrap_or(0);

        let mut text = first.to_string();
        for line in rest {
            text.push('\n');
            text.push_str(line.get(indent..).unwrap_or("").trim_end());
        }
        FootnoteDefinition {
            label: label.to_string(),
            text,
            blocks: vec![],
        }
    }
}
