use crate::scanner::{Groups, Pattern, Span};

use super::super::cursor::Cursor;

/// Emphasis inline type with owned delimiter constants.
///
/// A run of one to three identical delimiters opens; the next run of the
/// same character with exactly the same length closes. The run length is
/// the emphasis level.
pub struct Emphasis;

impl Emphasis {
    pub const DELIMITERS: &'static [u8] = b"*_";
    pub const MAX_RUN: usize = 3;

    /// Anchored matcher. Group 1 is the emphasized text; the level is half
    /// the number of delimiter bytes around it.
    pub fn find(text: &str, pos: usize) -> Option<Groups> {
        let (c, n, content_start) = Self::opener(text, pos)?;
        let close = Self::closer(text, c, n, content_start)?;
        Some(Self::groups(pos, content_start, close, n))
    }

    /// Searching matcher for a scan. Closers found for each delimiter kind
    /// are remembered, so openers without a closer do not rescan the text.
    pub fn pattern() -> Pattern {
        Pattern::per_scan(|| {
            let mut closers = Closers::default();
            move |text: &str, from: usize| closers.search(text, from)
        })
    }

    /// Delimiter, run length and content start of an opener at `pos`.
    fn opener(text: &str, pos: usize) -> Option<(u8, usize, usize)> {
        let mut cur = Cursor::at(text, pos);
        let c = cur.peek()?;
        if !Self::DELIMITERS.contains(&c) || cur.prev() == Some(c) {
            return None;
        }
        if c == b'_' && cur.prev().is_some_and(|p| p.is_ascii_alphanumeric()) {
            return None;
        }
        let n = cur.skip_run(c);
        if n > Self::MAX_RUN || cur.peek().is_none_or(|b| b.is_ascii_whitespace()) {
            return None;
        }
        Some((c, n, cur.pos()))
    }

    /// Start of the first run of exactly `n` `c`s at or after `from` that
    /// can close. `from` must not be inside a run of `c`.
    fn closer(text: &str, c: u8, n: usize, from: usize) -> Option<usize> {
        let b = text.as_bytes();
        let mut cur = Cursor::at(text, from);
        while cur.seek(c) {
            let close = cur.pos();
            if cur.skip_run(c) != n || b[close - 1].is_ascii_whitespace() {
                continue;
            }
            if c == b'_' && cur.peek().is_some_and(|x| x.is_ascii_alphanumeric()) {
                continue;
            }
            return Some(close);
        }
        None
    }

    fn groups(pos: usize, content_start: usize, close: usize, n: usize) -> Groups {
        Groups::new(
            Span::new(pos, close + n),
            [Some(Span::new(content_start, close))],
        )
    }
}

/// Last closer search per delimiter kind within one text: searched from
/// `.0`, first closer at `.1`. No closer of that kind starts in between.
#[derive(Debug, Default)]
struct Closers {
    seen: [[Option<(usize, Option<usize>)>; Emphasis::MAX_RUN]; 2],
}

impl Closers {
    fn search(&mut self, text: &str, from: usize) -> Option<Groups> {
        let bytes = text.as_bytes();
        let mut pos = from;
        while pos < bytes.len() {
            pos += bytes[pos..]
                .iter()
                .position(|b| Emphasis::DELIMITERS.contains(b))?;
            if let Some((c, n, content_start)) = Emphasis::opener(text, pos)
                && let Some(close) = self.closer(text, c, n, content_start)
            {
                return Some(Emphasis::groups(pos, content_start, close, n));
            }
            pos += 1;
        }
        None
    }

    fn closer(&mut self, text: &str, c: u8, n: usize, from: usize) -> Option<usize> {
        let slot = &mut self.seen[usize::from(c == b'_')][n - 1];
        if let Some((searched, found)) = *slot
            && searched <= from
            && found.is_none_or(|close| from <= close)
        {
            return found;
        }
        let found = Emphasis::closer(text, c, n, from);
        *slot = Some((from, found));
        found
    }
}
