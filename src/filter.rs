//! Test filtering.
//!
//! A filter decides, test by test, whether a flattened leaf case makes it into
//! the package suite. Tests that are filtered out are dropped before anything
//! runs and only show up as a count.
//!
//! The default filter is a [`PatternSet`](crate::pattern::PatternSet).
//! Implement [`TestFilter`] (or pass a closure) to select tests differently.

use crate::test::TestMeta;

/// A strategy for selecting which tests are included in a run.
pub trait TestFilter {
    /// Whether the test described by `meta` should be kept.
    fn keep(&self, meta: &TestMeta) -> bool;
}

/// A [`TestFilter`] that keeps every test.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoFilter;

impl TestFilter for NoFilter {
    fn keep(&self, _: &TestMeta) -> bool {
        true
    }
}

impl<F> TestFilter for F
where
    F: Fn(&TestMeta) -> bool,
{
    fn keep(&self, meta: &TestMeta) -> bool {
        self(meta)
    }
}
