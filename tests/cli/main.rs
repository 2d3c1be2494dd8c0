//! Runs this binary as a linked `testpkg` executable and checks what the
//! command line reports.
//!
//! Started with `TESTPKG_CLI_CHILD` set, the binary is the linked executable
//! and hands over to [`testpkg::main`]. Without it, every check spawns a child
//! with the arguments under test.

use std::{
    env,
    process::{Command, ExitCode},
};

use pretty_assertions::assert_eq;

#[path = "../package/fixtures/pkgx/__support.rs"]
mod support;

#[path = "../package/fixtures/pkgx/test_a.rs"]
mod test_a;

#[path = "../package/fixtures/pkgx/test_b.rs"]
mod test_b;

testpkg::package!(pkgx, dir = "tests/package/fixtures/pkgx", host = &support::Hooks);
testpkg::module!(pkgx.test_a, test_a::collect);
testpkg::module!(pkgx.test_b, test_b::collect);

const CHILD_ENV: &str = "TESTPKG_CLI_CHILD";

struct Output {
    code: Option<i32>,
    stderr: String,
}

fn testpkg(args: &[&str]) -> Output {
    let output = Command::new(env::current_exe().unwrap())
        .args(args)
        .env(CHILD_ENV, "1")
        .env("TESTPKG_COLOR", "never")
        .env_remove("TESTPKG_LOG")
        .output()
        .unwrap();
    Output {
        code: output.status.code(),
        stderr: String::from_utf8(output.stderr).unwrap(),
    }
}

fn all_tests_pass() {
    let output = testpkg(&["pkgx"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stderr.starts_with("..\n"), "{}", output.stderr);
    assert!(output.stderr.contains("Ran 2 tests in "));
    assert!(output.stderr.ends_with("\nOK\n"));
}

fn pattern_selects_one_test() {
    let output = testpkg(&["pkgx", "one", "-v"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("pkgx.test_a.T.test_one ... ok\n"));
    assert!(!output.stderr.contains("test_two"));
    assert!(output.stderr.contains("Ran 1 test in "));
}

fn unmatched_pattern_exits_with_failure() {
    let output = testpkg(&["pkgx", "zzz"]);
    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr, "No matched tests.\n");
}

fn unknown_package_is_an_error() {
    let output = testpkg(&["pkgz"]);
    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stderr,
        "error: no package or module named `pkgz` is registered\n"
    );
}

fn module_is_not_a_package() {
    let output = testpkg(&["pkgx.test_a"]);
    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr, "error: `pkgx.test_a` is not a package\n");
}

const CHECKS: &[(&str, fn())] = &[
    ("all_tests_pass", all_tests_pass),
    ("pattern_selects_one_test", pattern_selects_one_test),
    ("unmatched_pattern_exits_with_failure", unmatched_pattern_exits_with_failure),
    ("unknown_package_is_an_error", unknown_package_is_an_error),
    ("module_is_not_a_package", module_is_not_a_package),
];

fn main() -> ExitCode {
    if env::var_os(CHILD_ENV).is_some() {
        return testpkg::main();
    }

    println!("\nrunning {} cli checks", CHECKS.len());
    for (name, check) in CHECKS {
        check();
        println!("check {name} ... ok");
    }
    println!();
    ExitCode::SUCCESS
}
