use std::{fmt, sync::Arc};

use regex::Regex;

use super::span::Span;

/// Capture groups of one match. Index 0 is always the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups(Vec<Option<Span>>);

impl Groups {
    /// Builds groups from the whole-match span followed by the capture spans.
    pub fn new(whole: Span, captures: impl IntoIterator<Item = Option<Span>>) -> Self {
        let mut groups = vec![Some(whole)];
        groups.extend(captures);
        Self(groups)
    }

    pub fn whole(&self) -> Span {
        self.0[0].unwrap_or(Span::new(0, 0))
    }

    pub fn get(&self, index: usize) -> Option<Span> {
        self.0.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Signature of a hand-written matcher: leftmost match at or after `from`.
pub type MatchFn = dyn Fn(&str, usize) -> Option<Groups> + Send + Sync;

/// A matcher instance that lives for one scan of one text.
pub type ScanMatchFn = dyn FnMut(&str, usize) -> Option<Groups>;

type MatcherFactory = dyn Fn() -> Box<ScanMatchFn> + Send + Sync;

/// An opaque matcher deciding where a rule matches and what it captures.
///
/// Regex patterns cover most rules. Constructs whose closing delimiter must
/// repeat the opening one (fences, emphasis runs, code span runs, list
/// markers) use hand-written matchers, since the `regex` crate has no
/// back-references.
#[derive(Clone)]
pub enum Pattern {
    Regex(Regex),
    Matcher(Arc<MatchFn>),
    /// Builds a fresh matcher per scan. Within a scan it is called on one
    /// text with strictly increasing offsets, so it may memoize.
    PerScan(Arc<MatcherFactory>),
}

impl Pattern {
    /// Wraps a matcher that searches forward from a position by itself.
    pub fn matcher<F>(f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<Groups> + Send + Sync + 'static,
    {
        Pattern::Matcher(Arc::new(f))
    }

    /// Wraps a factory of stateful matchers, one per scan.
    pub fn per_scan<F, M>(factory: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: FnMut(&str, usize) -> Option<Groups> + 'static,
    {
        Pattern::PerScan(Arc::new(move || Box::new(factory()) as Box<ScanMatchFn>))
    }

    /// Wraps an anchored matcher that is only tried where one of `triggers`
    /// occurs.
    pub fn at_any_of<F>(triggers: &'static [u8], f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<Groups> + Send + Sync + 'static,
    {
        Self::matcher(move |text, from| {
            let bytes = text.as_bytes();
            let mut pos = from;
            while pos < bytes.len() {
                let offset = bytes[pos..].iter().position(|b| triggers.contains(b))?;
                pos += offset;
                if let Some(groups) = f(text, pos) {
                    return Some(groups);
                }
                pos += 1;
            }
            None
        })
    }

    /// Wraps an anchored matcher that is only tried at the start of a line.
    pub fn at_line_start<F>(f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<Groups> + Send + Sync + 'static,
    {
        Self::matcher(move |text, from| {
            let mut pos = if from == 0 || text.as_bytes()[from - 1] == b'\n' {
                from
            } else {
                from + text[from..].find('\n')? + 1
            };
            while pos < text.len() {
                if let Some(groups) = f(text, pos) {
                    return Some(groups);
                }
                pos += text[pos..].find('\n')? + 1;
            }
            None
        })
    }

    /// Finds the leftmost non-empty match starting at or after `from`.
    ///
    /// Empty matches are skipped one character at a time so the scanner always
    /// advances.
    pub fn find_at(&self, text: &str, from: usize) -> Option<Groups> {
        match self {
            Pattern::PerScan(factory) => first_non_empty(text, from, &mut *factory()),
            _ => first_non_empty(text, from, &mut |text: &str, from: usize| {
                self.find_raw(text, from)
            }),
        }
    }

    /// A matcher for one scan, or `None` when the pattern keeps no state.
    pub fn instantiate(&self) -> Option<Box<ScanMatchFn>> {
        match self {
            Pattern::PerScan(factory) => Some(factory()),
            _ => None,
        }
    }

    fn find_raw(&self, text: &str, from: usize) -> Option<Groups> {
        match self {
            Pattern::Regex(re) => {
                let caps = re.captures_at(text, from)?;
                let whole = caps.get(0).map(|m| Span::new(m.start(), m.end()))?;
                let captures = (1..caps.len())
                    .map(|i| caps.get(i).map(|m| Span::new(m.start(), m.end())))
                    .collect::<Vec<_>>();
                Some(Groups::new(whole, captures))
            }
            Pattern::Matcher(f) => f(text, from),
            Pattern::PerScan(factory) => {
                let mut find = factory();
                find(text, from)
            }
        }
    }

    /// Index of a named capture group. Only regex patterns carry names.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        match self {
            Pattern::Regex(re) => re.capture_names().position(|n| n == Some(name)),
            Pattern::Matcher(_) | Pattern::PerScan(_) => None,
        }
    }
}

/// Runs `find` from `from`, skipping empty matches one character at a time
/// so a scan always advances.
pub(super) fn first_non_empty(
    text: &str,
    from: usize,
    find: &mut dyn FnMut(&str, usize) -> Option<Groups>,
) -> Option<Groups> {
    let mut from = from;
    loop {
        if from > text.len() {
            return None;
        }
        let groups = find(text, from)?;
        let whole = groups.whole();
        if !whole.is_empty() {
            return Some(groups);
        }
        let step = text[whole.start..].chars().next()?.len_utf8();
        from = whole.start + step;
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Pattern::Matcher(_) => f.write_str("Matcher(..)"),
            Pattern::PerScan(_) => f.write_str("PerScan(..)"),
        }
    }
}

/// A match handed to a rule's handler.
#[derive(Debug)]
pub struct Match<'a> {
    text: &'a str,
    groups: Groups,
    pattern: &'a Pattern,
}

impl<'a> Match<'a> {
    pub fn new(text: &'a str, groups: Groups, pattern: &'a Pattern) -> Self {
        Self {
            text,
            groups,
            pattern,
        }
    }

    /// The whole matched text.
    pub fn as_str(&self) -> &'a str {
        self.groups.whole().slice(self.text)
    }

    pub fn span(&self) -> Span {
        self.groups.whole()
    }

    /// Numbered capture group (0 is the whole match).
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.groups.get(index).map(|sp| sp.slice(self.text))
    }

    /// Named capture group.
    pub fn name(&self, name: &str) -> Option<&'a str> {
        self.get(self.pattern.group_index(name)?)
    }
}
