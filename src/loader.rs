use std::collections::HashSet;

use crate::{
    Error, Result,
    filter::TestFilter,
    importer::import_modules,
    package::PackageTestSuite,
    registry::{Namespace, Registry},
};

/// The filtered tests of one package.
#[derive(Debug)]
pub struct LoadedTests {
    pub suite: PackageTestSuite,
    pub filtered_out: usize,
}

impl LoadedTests {
    /// Number of tests the filter kept.
    pub fn matched(&self) -> usize {
        self.suite.len()
    }
}

/// Import all modules of `package`, flatten their tests and keep the ones
/// accepted by `filter`.
///
/// Test ids of the kept tests must be unique.
pub fn load_tests_from_package(
    registry: &Registry,
    package: &Namespace,
    filter: &impl TestFilter,
) -> Result<LoadedTests> {
    let modules = import_modules(registry, package)?;

    let mut suite = PackageTestSuite::new(package.clone());
    let mut seen = HashSet::new();
    let mut filtered_out = 0;
    for module in &modules {
        for test in module.load_tests().into_flat() {
            if !filter.keep(&test.meta) {
                filtered_out += 1;
                continue;
            }
            if !seen.insert(test.id.clone()) {
                return Err(Error::DuplicateTest(test.id.to_string()));
            }
            suite.add_test(test);
        }
    }

    tracing::debug!(
        package = package.name(),
        matched = suite.len(),
        filtered_out,
        "loaded tests"
    );
    Ok(LoadedTests {
        suite,
        filtered_out,
    })
}
