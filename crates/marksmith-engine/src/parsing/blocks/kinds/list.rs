use crate::scanner::{Groups, Span};

use super::lines::{interrupts, is_blank, leading_spaces, line_end, next_line, strip_indent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `*`, `+` or `-`.
    Bullet(u8),
    /// Digits followed by `.` or `)`.
    Ordered(u8),
}

/// A list item marker as found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub indent: usize,
    pub kind: MarkerKind,
    /// Bytes from line start to the item content.
    pub width: usize,
    pub number: Option<u64>,
}

impl ListMarker {
    pub fn is_ordered(&self) -> bool {
        matches!(self.kind, MarkerKind::Ordered(_))
    }

    fn sibling_of(&self, other: &ListMarker) -> bool {
        self.indent == other.indent && self.kind == other.kind
    }
}

/// A matched list split into item bodies with marker indentation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBody {
    pub first: ListMarker,
    pub items: Vec<String>,
    /// Set when a blank line separates items or sits inside one.
    pub loose: bool,
}

/// List block type with owned marker constants.
///
/// Items of one list share indentation and marker kind. A line indented
/// deeper than the first marker continues the current item.
pub struct List;

impl List {
    pub const BULLETS: &'static [u8] = b"*+-";
    pub const ORDERED_DELIMITERS: &'static [u8] = b".)";
    pub const MAX_DIGITS: usize = 9;
    /// More spaces than this after a marker start indented content instead.
    pub const MAX_GAP: usize = 4;

    /// Reads a list marker at the start of `line`.
    pub fn marker(line: &str) -> Option<ListMarker> {
        let indent = leading_spaces(line);
        let b = line.as_bytes();
        let c = *b.get(indent)?;
        let (kind, number, after) = if Self::BULLETS.contains(&c) {
            (MarkerKind::Bullet(c), None, indent + 1)
        } else if c.is_ascii_digit() {
            let digits = b[indent..].iter().take_while(|d| d.is_ascii_digit()).count();
            if digits > Self::MAX_DIGITS {
                return None;
            }
            let delim = *b.get(indent + digits)?;
            if !Self::ORDERED_DELIMITERS.contains(&delim) {
                return None;
            }
            let number = line[indent..indent + digits].parse().ok()?;
            (MarkerKind::Ordered(delim), Some(number), indent + digits + 1)
        } else {
            return None;
        };

        let rest = &line[after..];
        if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
            return None;
        }
        let gap = rest.bytes().take_while(|b| *b == b' ').count();
        let width = if is_blank(rest) || gap > Self::MAX_GAP {
            after + 1
        } else {
            after + gap
        };
        Some(ListMarker {
            indent,
            kind,
            width,
            number,
        })
    }

    /// Anchored matcher for a whole list starting at `pos`.
    pub fn find(text: &str, pos: usize, ordered: bool) -> Option<Groups> {
        let first_end = line_end(text, pos);
        let first = Self::marker(&text[pos..first_end])?;
        if first.is_ordered() != ordered {
            return None;
        }

        let mut end = first_end;
        let mut after_blank = false;
        let mut cursor = next_line(text, first_end);
        while let Some(start) = cursor {
            let le = line_end(text, start);
            let line = &text[start..le];
            cursor = next_line(text, le);
            if is_blank(line) {
                after_blank = true;
                continue;
            }
            let marker = Self::marker(line);
            let sibling = marker.is_some_and(|m| m.sibling_of(&first));
            let nested = leading_spaces(line) > first.indent;
            let lazy = !after_blank && marker.is_none() && !interrupts(line);
            if !(sibling || nested || lazy) {
                break;
            }
            end = le;
            after_blank = false;
        }

        let mut whole_end = end;
        while text.as_bytes().get(whole_end) == Some(&b'\n') {
            whole_end += 1;
        }
        Some(Groups::new(Span::new(pos, whole_end), []))
    }

    /// Splits a matched list into items.
    pub fn split(block: &str) -> Option<ListBody> {
        let lines: Vec<&str> = block.trim_end_matches('\n').split('\n').collect();
        let first = Self::marker(lines.first()?)?;

        let mut items: Vec<Vec<&str>> = vec![];
        let mut width = first.width;
        let mut loose = false;
        let mut pending_blank = false;
        for line in lines {
            match Self::marker(line).filter(|m| m.sibling_of(&first)) {
                Some(m) => {
                    if pending_blank && !items.is_empty() {
                        loose = true;
                    }
                    width = m.width;
                    items.push(vec![line.get(m.width..).unwrap_or("")]);
                    pending_blank = false;
                }
                None if is_blank(line) => {
                    pending_blank = true;
                    if let Some(item) = items.last_mut() {
                        item.push("");
                    }
                }
                None => {
                    if pending_blank {
                        loose = true;
                    }
                    pending_blank = false;
                    if let Some(item) = items.last_mut() {
                        item.push(strip_indent(line, width));
                    }
                }
            }
        }

        let items = items
            .into_iter()
            .map(|lines| lines.join("\n").trim_end().to_string())
            .collect();
        Some(ListBody {
            first,
            items,
            loose,
        })
    }
}
