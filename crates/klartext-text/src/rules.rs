// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ordered regex rewrite tables.
//
// Each normalization stage is a `RuleSet`: a list of (pattern, replacement)
// pairs applied in sequence, every rule seeing the output of the previous
// one. Each rule rewrites all of its matches in one pass.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// What a matched span is rewritten to.
#[derive(Clone, Copy)]
pub enum Replacement {
    /// A `regex` replacement template (`""` deletes, `"${1} ${2}"` rejoins groups).
    Template(&'static str),
    /// Computed from the captures, for rewrites a template cannot express.
    Computed(fn(&Captures<'_>) -> String),
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One named rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RewriteRule {
    /// Compile a rule, reporting an invalid pattern.
    pub fn try_new(
        name: &'static str,
        pattern: &str,
        replacement: Replacement,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    /// Compile a built-in rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Only use with patterns fixed
    /// at compile time.
    pub fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Self {
        match Self::try_new(name, pattern, replacement) {
            Ok(rule) => rule,
            Err(err) => panic!("built-in rule `{name}` has an invalid pattern: {err}"),
        }
    }

    /// Shorthand for a rule that deletes every match.
    pub fn delete(name: &'static str, pattern: &str) -> Self {
        Self::new(name, pattern, Replacement::Template(""))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Rewrite every non-overlapping match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.replacement {
            Replacement::Template(template) => self.pattern.replace_all(text, template),
            Replacement::Computed(f) => self.pattern.replace_all(text, |caps: &Captures<'_>| f(caps)),
        }
    }
}

/// An ordered table of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Append a rule after the existing ones.
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    /// Rule names in application order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(RewriteRule::name).collect()
    }

    /// Run every rule in order over `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_owned();
        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            current = rewritten;
        }
        current
    }
}

impl FromIterator<RewriteRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RewriteRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
