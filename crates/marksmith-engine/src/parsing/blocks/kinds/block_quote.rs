use crate::scanner::{Groups, Span};

use super::{
    lines::{interrupts, is_blank, line_end, next_line},
    list::List,
};

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips one level of blockquote prefix from a line, returning the byte
    /// offset where content begins (0 when the line has no prefix).
    ///
    /// Up to three spaces may precede the `>`, and one space after it is
    /// part of the prefix. Nested prefixes such as `> > x` keep their inner
    /// `>` for the recursive pass.
    pub fn strip_prefix(s: &str) -> usize {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < 3 && i < b.len() && b[i] == b' ' {
            i += 1;
        }
        if i < b.len() && b[i] == (Self::PREFIX as u8) {
            i += 1;
            if i < b.len() && b[i] == b' ' {
                i += 1;
            }
            i
        } else {
            0
        }
    }

    /// Anchored matcher for a quote starting at `pos`: prefixed lines plus
    /// lazy continuation lines, ending at a blank line or at a line that
    /// starts another block.
    pub fn find(text: &str, pos: usize) -> Option<Groups> {
        let first_end = line_end(text, pos);
        if Self::strip_prefix(&text[pos..first_end]) == 0 {
            return None;
        }

        let mut end = first_end;
        let mut cursor = next_line(text, first_end);
        while let Some(start) = cursor {
            let le = line_end(text, start);
            let line = &text[start..le];
            let prefixed = Self::strip_prefix(line) > 0;
            let lazy = !is_blank(line) && !interrupts(line) && List::marker(line).is_none();
            if !(prefixed || lazy) {
                break;
            }
            end = le;
            cursor = next_line(text, le);
        }

        let mut whole_end = end;
        while text.as_bytes().get(whole_end) == Some(&b'\n') {
            whole_end += 1;
        }
        Some(Groups::new(Span::new(pos, whole_end), []))
    }

    /// The quote's inner text: every line with one prefix level removed.
    /// Lazy continuation lines without a prefix are kept as they are.
    pub fn body(text: &str) -> String {
        text.split('\n')
            .map(|line| &line[Self::strip_prefix(line)..])
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefix("hello"), 0);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefix("> hello"), 2);
    }

    #[test]
    fn strip_only_one_level() {
        assert_eq!(BlockQuote::strip_prefix("> > hello"), 2);
        assert_eq!(BlockQuote::strip_prefix(">> hello"), 1);
    }

    #[test]
    fn indented_prefix() {
        assert_eq!(BlockQuote::strip_prefix("   > x"), 5);
        assert_eq!(BlockQuote::strip_prefix("    > x"), 0);
    }

    #[test]
    fn find_takes_lazy_lines_until_blank() {
        let text = "> a\nlazy\n> b\n\nafter";
        let g = BlockQuote::find(text, 0).unwrap();
        assert_eq!(g.whole().slice(text), "> a\nlazy\n> b\n\n");
    }

    #[test]
    fn find_stops_at_heading() {
        let text = "> a\n# h";
        let g = BlockQuote::find(text, 0).unwrap();
        assert_eq!(g.whole().slice(text), "> a\n");
    }

    #[test]
    fn find_requires_prefix() {
        assert!(BlockQuote::find("a\n> b", 0).is_none());
    }

    #[test]
    fn body_keeps_lazy_lines() {
        assert_eq!(BlockQuote::body("> a\nb\n>> c"), "a\nb\n> c");
    }
}
