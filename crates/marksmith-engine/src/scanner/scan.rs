use super::{
    grammar::Grammar,
    pattern::{Groups, Match, ScanMatchFn, first_non_empty},
};

/// One step of a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Scanned<'a, T> {
    /// Text no rule matched, verbatim.
    Raw(&'a str),
    /// Output of the handler of rule number `rule`.
    Token { rule: usize, value: T },
}

/// Per-rule memo of the leftmost match at or after some earlier cursor.
///
/// A cached match stays valid while its start is not behind the cursor:
/// no match of that rule starts between the cursor it was found from and its
/// own start.
#[derive(Debug, Clone)]
enum Lookup {
    Unknown,
    Exhausted,
    Found(Groups),
}

/// Lazy, single-pass, left-to-right scanner over one text.
///
/// At each step the earliest-starting match across all rules wins; ties are
/// broken by rule order. Text skipped before a match is yielded as
/// [`Scanned::Raw`], and so is any unconsumed tail.
pub struct Scanner<'g, 'a, T> {
    grammar: &'g Grammar<T>,
    text: &'a str,
    cursor: usize,
    lookups: Vec<Lookup>,
    /// Instances of the grammar's per-scan matchers, by rule.
    matchers: Vec<Option<Box<ScanMatchFn>>>,
    pending: Option<Scanned<'a, T>>,
}

impl<'g, 'a, T> Scanner<'g, 'a, T> {
    pub fn new(grammar: &'g Grammar<T>, text: &'a str) -> Self {
        Self {
            grammar,
            text,
            cursor: 0,
            lookups: vec![Lookup::Unknown; grammar.rules().len()],
            matchers: grammar.rules().iter().map(|r| r.pattern().instantiate()).collect(),
            pending: None,
        }
    }

    /// Byte offset up to which the text has been consumed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn next_match(&mut self) -> Option<(usize, Groups)> {
        let mut best: Option<(usize, usize)> = None;

        for (idx, rule) in self.grammar.rules().iter().enumerate() {
            let stale = match &self.lookups[idx] {
                Lookup::Unknown => true,
                Lookup::Exhausted => false,
                Lookup::Found(groups) => groups.whole().start < self.cursor,
            };
            if stale {
                let (text, cursor) = (self.text, self.cursor);
                let found = match &mut self.matchers[idx] {
                    Some(find) => first_non_empty(text, cursor, find.as_mut()),
                    None => rule.pattern().find_at(text, cursor),
                };
                self.lookups[idx] = match found {
                    Some(groups) => Lookup::Found(groups),
                    None => Lookup::Exhausted,
                };
            }

            if let Lookup::Found(groups) = &self.lookups[idx] {
                let start = groups.whole().start;
                if best.is_none_or(|(_, best_start)| start < best_start) {
                    best = Some((idx, start));
                }
            }
        }

        let (idx, _) = best?;
        match std::mem::replace(&mut self.lookups[idx], Lookup::Unknown) {
            Lookup::Found(groups) => Some((idx, groups)),
            _ => None,
        }
    }
}

impl<'a, T> Iterator for Scanner<'_, 'a, T> {
    type Item = Scanned<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        loop {
            if self.cursor >= self.text.len() {
                return None;
            }

            let Some((idx, groups)) = self.next_match() else {
                let tail = &self.text[self.cursor..];
                self.cursor = self.text.len();
                return Some(Scanned::Raw(tail));
            };

            let whole = groups.whole();
            let raw_start = self.cursor;
            self.cursor = whole.end;

            let rule = &self.grammar.rules()[idx];
            let m = Match::new(self.text, groups, rule.pattern());
            let token = rule
                .handle(&m)
                .map(|value| Scanned::Token { rule: idx, value });

            if whole.start > raw_start {
                self.pending = token;
                return Some(Scanned::Raw(&self.text[raw_start..whole.start]));
            }
            if token.is_some() {
                return token;
            }
        }
    }
}
