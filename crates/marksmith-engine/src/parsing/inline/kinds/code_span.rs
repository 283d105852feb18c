use crate::scanner::{Groups, Span};

use super::super::cursor::Cursor;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: nothing is parsed inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Anchored matcher: a run of N backticks closed by the next run of
    /// exactly N. Group 1 is the content with at most one leading and one
    /// trailing space removed.
    pub fn find(text: &str, pos: usize) -> Option<Groups> {
        let mut cur = Cursor::at(text, pos);
        if cur.peek() != Some(Self::TICK) || cur.prev() == Some(Self::TICK) {
            return None;
        }
        let n = cur.skip_run(Self::TICK);
        let content_start = cur.pos();

        while cur.seek(Self::TICK) {
            let close = cur.pos();
            if cur.skip_run(Self::TICK) == n {
                let content = trim_one_space(text, content_start, close);
                return Some(Groups::new(Span::new(pos, cur.pos()), [Some(content)]));
            }
        }
        None
    }
}

fn trim_one_space(text: &str, mut start: usize, mut end: usize) -> Span {
    let b = text.as_bytes();
    if start < end && b[start] == b' ' {
        start += 1;
    }
    if end > start && b[end - 1] == b' ' {
        end -= 1;
    }
    Span::new(start, end)
}
