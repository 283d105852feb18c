/// A byte cursor for the hand-written inline matchers.
///
/// Positions are absolute offsets into the whole inline text, so matchers
/// can look one byte behind their start.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `s` positioned at byte `i`.
    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the cursor.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|p| self.s.as_bytes().get(p).copied())
    }

    /// Consumes a run of `b`, returning its length.
    pub fn skip_run(&mut self, b: u8) -> usize {
        let n = self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .take_while(|x| **x == b)
            .count();
        self.i += n;
        n
    }

    /// Moves to the next occurrence of `b`. Stays at end of input when there
    /// is none.
    pub fn seek(&mut self, b: u8) -> bool {
        match self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .position(|x| *x == b)
        {
            Some(off) => {
                self.i += off;
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }
}
