use std::{fmt, time::Duration};

use crate::{capture::TestOutputCapture, test::TestResult};

#[derive(Debug)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration: Duration,
    pub output: TestOutputCapture,
}

impl TestOutcome {
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.status.is_bad()
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    pub fn errored(&self) -> bool {
        self.status.errored()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    Failed(TestFailure),
}

impl TestStatus {
    pub fn is_good(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn is_bad(&self) -> bool {
        !self.is_good()
    }

    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    /// Whether the test failed an assertion, i.e. panicked.
    pub fn failed(&self) -> bool {
        matches!(self, TestStatus::Failed(TestFailure::Panicked(_)))
    }

    /// Whether the test stopped on an error it returned.
    pub fn errored(&self) -> bool {
        matches!(self, TestStatus::Failed(TestFailure::Error(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestFailure {
    Error(String),
    Panicked(String),
}

impl TestFailure {
    pub fn message(&self) -> &str {
        match self {
            TestFailure::Error(msg) | TestFailure::Panicked(msg) => msg,
        }
    }
}

impl From<TestResult> for TestStatus {
    fn from(value: TestResult) -> Self {
        match value.0 {
            Ok(_) => TestStatus::Passed,
            Err(err) => TestStatus::Failed(TestFailure::Error(err)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    SetUpPackage,
    TearDownPackage,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::SetUpPackage => f.write_str("set_up_package"),
            Hook::TearDownPackage => f.write_str("tear_down_package"),
        }
    }
}

/// A package hook that returned an error or panicked.
///
/// Hook failures count as errors of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub hook: Hook,
    pub package: String,
    pub failure: TestFailure,
}

impl HookFailure {
    /// The label used in place of a test id, e.g. `set_up_package (pkgx)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.hook, self.package)
    }
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.hook, self.package, self.failure.message())
    }
}
