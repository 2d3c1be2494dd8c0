//! Fuzzy name patterns.
//!
//! A pattern matches an identifier when all of its characters occur in the
//! identifier in the same order, with anything in between. This lets a short
//! abbreviation pick out a long dotted test id: `abc` matches `test_abc_case`
//! as well as `a.b.c_method`.
//!
//! Each pattern is compiled into a regular expression in which every
//! character is escaped and joined to the next by a wildcard segment. The
//! expression is searched for anywhere in the identifier.

use regex::{Regex, RegexBuilder};

use crate::{Error, filter::TestFilter, test::TestMeta};

/// How the characters of a pattern may be spread over an identifier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Any characters may appear between pattern characters, ignoring case.
    #[default]
    Permissive,

    /// Gaps may not cross a `.` separator, and case must match.
    Segmented,
}

impl MatchMode {
    fn gap(self) -> &'static str {
        match self {
            MatchMode::Permissive => ".*",
            MatchMode::Segmented => "[^.]*",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str, mode: MatchMode) -> Result<Self, Error> {
        let mut buf = [0; 4];
        let expr = source
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut buf)))
            .collect::<Vec<_>>()
            .join(mode.gap());

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(mode == MatchMode::Permissive)
            .build()
            .map_err(|source_err| Error::Pattern {
                pattern: source.to_string(),
                source: source_err,
            })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, id: &str) -> bool {
        self.regex.is_match(id)
    }
}

/// An ordered set of patterns, any one of which has to match.
///
/// An empty set matches everything.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I, mode: MatchMode) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| Pattern::new(pattern.as_ref(), mode))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn matches(&self, id: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|pattern| pattern.is_match(id))
    }
}

impl TestFilter for PatternSet {
    fn keep(&self, meta: &TestMeta) -> bool {
        self.matches(&meta.id)
    }
}
