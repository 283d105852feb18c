use std::{fmt, sync::Arc};

use regex::Regex;

use crate::error::GrammarError;

use super::{
    pattern::{Match, Pattern},
    scan::Scanner,
};

/// Turns a match into a token. `None` consumes the span without output.
pub type Handler<T> = Arc<dyn Fn(&Match<'_>) -> Option<T> + Send + Sync>;

/// Where a rule's pattern comes from before the grammar is compiled.
pub enum PatternSource {
    /// Regex source text, compiled by [`GrammarBuilder::build`].
    Source(String),
    /// A ready pattern (regex or hand-written matcher).
    Compiled(Pattern),
}

impl From<&str> for PatternSource {
    fn from(s: &str) -> Self {
        PatternSource::Source(s.to_string())
    }
}

impl From<String> for PatternSource {
    fn from(s: String) -> Self {
        PatternSource::Source(s)
    }
}

impl From<Pattern> for PatternSource {
    fn from(p: Pattern) -> Self {
        PatternSource::Compiled(p)
    }
}

/// A named `(pattern, handler)` pair.
pub struct Rule<T> {
    name: String,
    pattern: Pattern,
    handler: Handler<T>,
}

impl<T> Rule<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub(crate) fn handle(&self, m: &Match<'_>) -> Option<T> {
        (self.handler)(m)
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// An ordered, immutable list of rules for one parsing level.
///
/// Rule order is the tie-break when several rules match at the same start
/// position: the earlier rule wins.
pub struct Grammar<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Grammar<T> {
    pub fn builder() -> GrammarBuilder<T> {
        GrammarBuilder::new()
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// A copy of this grammar without the named rules. Unknown names are
    /// ignored.
    pub fn without(&self, names: &[&str]) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|r| !names.contains(&r.name()))
                .cloned()
                .collect(),
        }
    }

    /// Scans `text`, yielding raw spans and handler output left to right.
    pub fn scan<'a>(&self, text: &'a str) -> Scanner<'_, 'a, T> {
        Scanner::new(self, text)
    }
}

impl<T> Clone for Grammar<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

struct PendingRule<T> {
    name: String,
    source: PatternSource,
    handler: Handler<T>,
}

/// Assembles a [`Grammar`], splicing custom rules into a default order.
///
/// Edits are recorded and validated lazily: the first problem (unknown anchor,
/// duplicate name, invalid regex) is reported by [`GrammarBuilder::build`].
pub struct GrammarBuilder<T> {
    pending: Vec<PendingRule<T>>,
    error: Option<GrammarError>,
}

impl<T> GrammarBuilder<T> {
    pub fn new() -> Self {
        Self {
            pending: vec![],
            error: None,
        }
    }

    /// Appends a rule with the lowest priority so far.
    pub fn push<F>(mut self, name: &str, pattern: impl Into<PatternSource>, handler: F) -> Self
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        let rule = self.pending_rule(name, pattern.into(), handler);
        if let Some(rule) = rule {
            self.pending.push(rule);
        }
        self
    }

    /// Inserts a rule directly before `anchor`, giving it priority over it.
    pub fn insert_before<F>(
        self,
        anchor: &str,
        name: &str,
        pattern: impl Into<PatternSource>,
        handler: F,
    ) -> Self
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        self.insert_at(anchor, 0, name, pattern.into(), handler)
    }

    /// Inserts a rule directly after `anchor`.
    pub fn insert_after<F>(
        self,
        anchor: &str,
        name: &str,
        pattern: impl Into<PatternSource>,
        handler: F,
    ) -> Self
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        self.insert_at(anchor, 1, name, pattern.into(), handler)
    }

    /// Swaps the pattern and handler of an existing rule, keeping its slot.
    pub fn replace<F>(mut self, name: &str, pattern: impl Into<PatternSource>, handler: F) -> Self
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        match self.position(name) {
            Some(idx) => {
                self.pending[idx] = PendingRule {
                    name: name.to_string(),
                    source: pattern.into(),
                    handler: Arc::new(handler),
                };
            }
            None => self.fail(GrammarError::UnknownRule(name.to_string())),
        }
        self
    }

    pub fn remove(mut self, name: &str) -> Self {
        match self.position(name) {
            Some(idx) => {
                self.pending.remove(idx);
            }
            None => self.fail(GrammarError::UnknownRule(name.to_string())),
        }
        self
    }

    /// Compiles every pattern and freezes the rule order.
    pub fn build(self) -> Result<Grammar<T>, GrammarError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let rules = self
            .pending
            .into_iter()
            .map(|rule| {
                let pattern = match rule.source {
                    PatternSource::Compiled(p) => p,
                    PatternSource::Source(src) => {
                        let re = Regex::new(&src).map_err(|source| {
                            GrammarError::InvalidPattern {
                                rule: rule.name.clone(),
                                source,
                            }
                        })?;
                        Pattern::Regex(re)
                    }
                };
                Ok(Rule {
                    name: rule.name,
                    pattern,
                    handler: rule.handler,
                })
            })
            .collect::<Result<Vec<_>, GrammarError>>()?;

        log::trace!(
            "built grammar: {:?}",
            rules.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
        );
        Ok(Grammar { rules })
    }

    fn insert_at<F>(
        mut self,
        anchor: &str,
        offset: usize,
        name: &str,
        pattern: PatternSource,
        handler: F,
    ) -> Self
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        let Some(idx) = self.position(anchor) else {
            self.fail(GrammarError::UnknownRule(anchor.to_string()));
            return self;
        };
        if let Some(rule) = self.pending_rule(name, pattern, handler) {
            self.pending.insert(idx + offset, rule);
        }
        self
    }

    fn pending_rule<F>(
        &mut self,
        name: &str,
        source: PatternSource,
        handler: F,
    ) -> Option<PendingRule<T>>
    where
        F: Fn(&Match<'_>) -> Option<T> + Send + Sync + 'static,
    {
        if self.position(name).is_some() {
            self.fail(GrammarError::DuplicateRule(name.to_string()));
            return None;
        }
        Some(PendingRule {
            name: name.to_string(),
            source,
            handler: Arc::new(handler),
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pending.iter().position(|s| s.name == name)
    }

    fn fail(&mut self, err: GrammarError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl<T> Default for GrammarBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
