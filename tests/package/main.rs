use std::path::Path;

use pretty_assertions::assert_eq;
use testpkg::{
    Error, RunConfig, RunOutcome, TestReport, Verbosity,
    registry::{Namespace, Registry},
    run,
};

#[path = "../common/mod.rs"]
mod common;
use common::{run_tests, run_tests_reported};

#[path = "fixtures/pkgx/__support.rs"]
mod support;

#[path = "fixtures/pkgx/test_a.rs"]
mod test_a;

#[path = "fixtures/pkgx/test_b.rs"]
mod test_b;

#[path = "fixtures/pkgf/test_mixed.rs"]
mod test_mixed;

fn fixtures() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/package/fixtures"))
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .add_package("pkgx", fixtures().join("pkgx"), &support::Hooks)
        .unwrap()
        .add_module("pkgx.test_a", test_a::collect)
        .unwrap()
        .add_module("pkgx.test_b", test_b::collect)
        .unwrap()
        .add_package("pkgf", fixtures().join("pkgf"), &testpkg::NoHost)
        .unwrap()
        .add_module("pkgf.test_mixed", test_mixed::collect)
        .unwrap();
    registry
}

fn config() -> RunConfig {
    RunConfig::default()
        .with_verbosity(Verbosity::Quiet)
        .with_exit(false)
}

fn resolve(registry: &Registry, name: &str) -> Vec<Namespace> {
    vec![registry.resolve(name).unwrap()]
}

fn completed(outcome: RunOutcome) -> TestReport<std::io::Error> {
    match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::NoMatchedTests => panic!("expected tests to run"),
    }
}

fn ids<E>(report: &TestReport<E>) -> Vec<&str> {
    report
        .result
        .outcomes
        .iter()
        .map(|(id, _)| id.as_str())
        .collect()
}

#[test]
fn pattern_selects_a_single_test() {
    let registry = registry();
    let packages = resolve(&registry, "pkgx");
    let outcome = run_tests(&registry, &packages, &["one"], &config()).unwrap();

    let report = completed(outcome);
    assert_eq!(ids(&report), ["pkgx.test_a.T.test_one"]);
    assert!(report.was_successful());
}

#[test]
fn no_patterns_run_every_module() {
    let registry = registry();
    let packages = resolve(&registry, "pkgx");
    let outcome = run_tests::<&str>(&registry, &packages, &[], &config()).unwrap();

    let report = completed(outcome);
    assert_eq!(
        ids(&report),
        ["pkgx.test_a.T.test_one", "pkgx.test_b.T.test_two"]
    );
    assert!(report.was_successful());
}

#[test]
fn setup_is_visible_to_tests_and_undone_after() {
    let registry = registry();
    let packages = resolve(&registry, "pkgx");
    assert!(!support::is_set_up());

    let outcome = run_tests::<&str>(&registry, &packages, &[], &config()).unwrap();

    assert!(outcome.was_successful());
    assert!(!support::is_set_up());
}

#[test]
fn unmatched_patterns_are_a_distinct_failure() {
    let registry = registry();
    let packages = resolve(&registry, "pkgx");
    let outcome = run_tests(&registry, &packages, &["zzz"], &config()).unwrap();

    assert!(matches!(outcome, RunOutcome::NoMatchedTests));
    assert!(!outcome.was_successful());
    assert!(!run(&registry, &packages, &["zzz"], &config()).unwrap());
}

#[test]
fn failures_do_not_stop_later_tests() {
    let registry = registry();
    let packages = resolve(&registry, "pkgf");
    let (outcome, text) = run_tests_reported::<&str>(&registry, &packages, &[], &config()).unwrap();
    let report = completed(outcome);

    assert!(text.starts_with("======"), "{text}");
    assert!(text.contains("ERROR: pkgf.test_mixed.T.test_broken\n"));
    assert!(text.contains("FAIL: pkgf.test_mixed.T.test_bad\n"));
    assert!(text.contains("Ran 3 tests in "));
    assert!(text.ends_with("FAILED (failures=1, errors=1)\n"));
    assert_eq!(
        ids(&report),
        [
            "pkgf.test_mixed.T.test_bad",
            "pkgf.test_mixed.T.test_broken",
            "pkgf.test_mixed.T.test_good"
        ]
    );
    assert_eq!(report.result.failure_count(), 1);
    assert_eq!(report.result.error_count(), 1);
    assert!(report.result.outcomes[2].1.passed());
    assert!(!report.was_successful());
}

#[test]
fn failfast_stops_at_the_first_failure() {
    let registry = registry();
    let packages = resolve(&registry, "pkgf");
    let config = config().with_failfast(true);
    let report = completed(run_tests::<&str>(&registry, &packages, &[], &config).unwrap());

    assert_eq!(ids(&report), ["pkgf.test_mixed.T.test_bad"]);
}

#[test]
fn several_packages_run_in_order() {
    let registry = registry();
    let packages = [
        registry.resolve("pkgx").unwrap(),
        registry.resolve("pkgf").unwrap(),
    ];
    let report = completed(run_tests(&registry, &packages, &["good", "one"], &config()).unwrap());

    assert_eq!(
        ids(&report),
        ["pkgx.test_a.T.test_one", "pkgf.test_mixed.T.test_good"]
    );
}

#[test]
fn modules_cannot_be_run_as_packages() {
    let registry = registry();
    let packages = resolve(&registry, "pkgx.test_a");
    let res = run_tests::<&str>(&registry, &packages, &[], &config());

    assert!(matches!(res, Err(Error::NotAPackage(name)) if name == "pkgx.test_a"));
}

#[test]
fn unknown_packages_are_not_found() {
    assert!(matches!(
        registry().resolve("pkgz"),
        Err(Error::NotFound(_))
    ));
}
