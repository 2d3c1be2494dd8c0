//! Helpers shared by formatter implementations.

use crate::{
    formatter::{FmtHookError, FmtTestOutcome, FmtTestStart},
    outcome::TestStatus,
};

pub mod color;

/// The label something is reported under.
///
/// For tests this is the test id, for package hooks the hook label like
/// `set_up_package (pkgx)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Label(pub String);

impl<'m> From<FmtTestStart<'m>> for Label {
    fn from(value: FmtTestStart<'m>) -> Self {
        Self(value.meta.id.to_string())
    }
}

impl<'h> From<FmtHookError<'h>> for Label {
    fn from(value: FmtHookError<'h>) -> Self {
        Self(value.failure.label())
    }
}

impl<'m> From<FmtTestOutcome<'m>> for TestStatus {
    fn from(value: FmtTestOutcome<'m>) -> Self {
        value.outcome.status.clone()
    }
}
