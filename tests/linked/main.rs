use pretty_assertions::assert_eq;
use testpkg::{
    AfterAll, BeforeAll, PackageHost, RunConfig, RunOutcome, Verbosity, registry::Registry,
    test::TestResult,
};

#[path = "../common/mod.rs"]
mod common;
use common::run_tests;

#[path = "pkgy/test_c.rs"]
mod test_c;

mod events {
    use std::cell::RefCell;

    thread_local! {
        static EVENTS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
    }

    pub fn record(event: &'static str) {
        EVENTS.with_borrow_mut(|events| events.push(event));
    }

    pub fn take() -> Vec<&'static str> {
        EVENTS.with_borrow_mut(std::mem::take)
    }
}

struct Hooks;

impl PackageHost for Hooks {
    fn before_all(&self) -> Option<&dyn BeforeAll> {
        Some(self)
    }

    fn after_all(&self) -> Option<&dyn AfterAll> {
        Some(self)
    }
}

impl BeforeAll for Hooks {
    fn set_up_package(&self) -> TestResult {
        events::record("set_up");
        ().into()
    }
}

impl AfterAll for Hooks {
    fn tear_down_package(&self) -> TestResult {
        events::record("tear_down");
        ().into()
    }
}

testpkg::package!(pkgy, dir = "tests/linked/pkgy", host = &Hooks);
testpkg::module!(pkgy.test_c, test_c::collect);

fn config() -> RunConfig {
    RunConfig::default()
        .with_verbosity(Verbosity::Quiet)
        .with_exit(false)
}

#[test]
fn macros_register_packages_and_modules() {
    let registry = Registry::linked().unwrap();
    assert_eq!(registry.package_names().collect::<Vec<_>>(), ["pkgy"]);

    let package = registry.resolve("pkgy").unwrap();
    assert!(package.is_package());
    assert!(registry.resolve("pkgy.test_c").is_ok());
}

#[test]
fn linked_package_runs_nested_tests_in_order() {
    let registry = Registry::linked().unwrap();
    let packages = [registry.resolve("pkgy").unwrap()];
    let outcome = run_tests::<&str>(&registry, &packages, &[], &config()).unwrap();

    let RunOutcome::Completed(report) = outcome else {
        panic!("expected tests to run");
    };
    let ids: Vec<_> = report
        .result
        .outcomes
        .iter()
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "pkgy.test_c.test_top_level",
            "pkgy.test_c.Outer.test_first",
            "pkgy.test_c.Outer.Inner.test_nested",
            "pkgy.test_c.Outer.test_last",
        ]
    );
    assert_eq!(events::take(), ["set_up", "nested", "tear_down"]);
}

#[test]
fn segmented_patterns_stay_within_a_segment() {
    let registry = Registry::linked().unwrap();
    let packages = [registry.resolve("pkgy").unwrap()];
    let config = config().with_match_mode(testpkg::pattern::MatchMode::Segmented);

    let outcome = run_tests(&registry, &packages, &["Outer.test_f"], &config).unwrap();
    let RunOutcome::Completed(report) = outcome else {
        panic!("expected tests to run");
    };
    assert_eq!(report.result.tests_run(), 1);
    events::take();

    let outcome = run_tests(&registry, &packages, &["outer"], &config).unwrap();
    assert!(matches!(outcome, RunOutcome::NoMatchedTests));
}
