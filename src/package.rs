//! Package level setup and teardown.
//!
//! A package may want to prepare shared state once before any of its tests
//! run and clean it up once after. It does so through its [`PackageHost`],
//! which can expose a [`BeforeAll`] and an [`AfterAll`] capability.
//!
//! [`PackageTestSuite::run`] treats the two hooks as a scope: teardown runs
//! whenever setup completed, even if running the tests unwinds. If setup
//! fails, neither the tests nor the teardown run, and the failure is reported
//! as an error of the run.

use std::fmt::{self, Debug};

use crate::{
    outcome::{Hook, HookFailure, TestStatus},
    panic::call_guarded,
    registry::Namespace,
    test::{Test, TestResult},
};

/// Runs once before the first test of a package.
pub trait BeforeAll {
    fn set_up_package(&self) -> TestResult;
}

/// Runs once after the last test of a package.
pub trait AfterAll {
    fn tear_down_package(&self) -> TestResult;
}

/// The object a package registers to describe its capabilities.
///
/// Both queries default to `None`. A host that wants a hook implements the
/// hook trait and returns itself:
///
/// ```ignore
/// struct Hooks;
///
/// impl PackageHost for Hooks {
///     fn before_all(&self) -> Option<&dyn BeforeAll> {
///         Some(self)
///     }
/// }
///
/// impl BeforeAll for Hooks {
///     fn set_up_package(&self) -> TestResult {
///         ().into()
///     }
/// }
/// ```
pub trait PackageHost: Sync {
    fn before_all(&self) -> Option<&dyn BeforeAll> {
        None
    }

    fn after_all(&self) -> Option<&dyn AfterAll> {
        None
    }
}

/// A [`PackageHost`] without any hooks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoHost;

impl PackageHost for NoHost {}

/// What a [`PackageTestSuite`] needs from whoever executes it.
pub trait RunContext {
    /// Whether the run asked to stop before the next test.
    fn should_stop(&self) -> bool;

    /// Execute a single test and record its outcome.
    fn run_test(&mut self, test: &Test);

    /// Record a failed package hook.
    fn hook_failed(&mut self, failure: HookFailure);
}

fn call_hook(hook: Hook, package: &str, f: impl FnOnce() -> TestResult) -> Result<(), HookFailure> {
    match call_guarded(f) {
        TestStatus::Passed => Ok(()),
        TestStatus::Failed(failure) => Err(HookFailure {
            hook,
            package: package.to_string(),
            failure,
        }),
    }
}

/// Holds a package's teardown until it is released or dropped.
struct PackageScope<'p> {
    package: &'p str,
    after_all: Option<&'static dyn AfterAll>,
}

impl<'p> PackageScope<'p> {
    fn enter(namespace: &'p Namespace) -> Result<Self, HookFailure> {
        let host = namespace.host();
        if let Some(before_all) = host.before_all() {
            tracing::debug!(package = namespace.name(), "running package setup");
            call_hook(Hook::SetUpPackage, namespace.name(), || {
                before_all.set_up_package()
            })?;
        }

        Ok(Self {
            package: namespace.name(),
            after_all: host.after_all(),
        })
    }

    fn release(mut self) -> Result<(), HookFailure> {
        match self.after_all.take() {
            Some(after_all) => {
                tracing::debug!(package = self.package, "running package teardown");
                call_hook(Hook::TearDownPackage, self.package, || {
                    after_all.tear_down_package()
                })
            }
            None => Ok(()),
        }
    }
}

impl Drop for PackageScope<'_> {
    fn drop(&mut self) {
        if let Some(after_all) = self.after_all.take() {
            let res = call_hook(Hook::TearDownPackage, self.package, || {
                after_all.tear_down_package()
            });
            if let Err(failure) = res {
                tracing::warn!(package = self.package, %failure, "teardown failed while unwinding");
            }
        }
    }
}

/// The matched tests of one package, run inside its setup/teardown scope.
pub struct PackageTestSuite {
    package: Namespace,
    tests: Vec<Test>,
}

impl Debug for PackageTestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageTestSuite")
            .field("package", &self.package.name())
            .field("tests", &self.tests.len())
            .finish()
    }
}

impl PackageTestSuite {
    pub fn new(package: Namespace) -> Self {
        Self {
            package,
            tests: Vec::new(),
        }
    }

    pub fn package(&self) -> &Namespace {
        &self.package
    }

    pub fn add_test(&mut self, test: Test) {
        self.tests.push(test);
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Run all contained tests in order.
    ///
    /// A suite without tests runs no hooks either.
    pub fn run<C: RunContext>(&self, ctx: &mut C) {
        if self.tests.is_empty() {
            return;
        }

        let scope = match PackageScope::enter(&self.package) {
            Ok(scope) => scope,
            Err(failure) => {
                ctx.hook_failed(failure);
                return;
            }
        };

        for test in &self.tests {
            if ctx.should_stop() {
                break;
            }
            ctx.run_test(test);
        }

        if let Err(failure) = scope.release() {
            ctx.hook_failed(failure);
        }
    }
}
