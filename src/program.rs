//! The top level of a run: load, filter, execute, exit.

use std::{io, process::ExitCode};

use clap::Parser;

use crate::{
    Result,
    cli::Cli,
    config::RunConfig,
    formatter::{TextFormatter, common::color::SupportsColor},
    interrupt,
    loader::load_tests_from_package,
    logging::init_logging,
    pattern::PatternSet,
    registry::{Namespace, Registry},
    report::TestReport,
    runner::TextTestRunner,
};

/// Message printed when the patterns filtered out every test.
pub const NO_MATCHED_TESTS: &str = "No matched tests.";

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The patterns filtered out every test, so nothing ran.
    NoMatchedTests,
    Completed(TestReport<io::Error>),
}

impl RunOutcome {
    pub fn was_successful(&self) -> bool {
        match self {
            RunOutcome::NoMatchedTests => false,
            RunOutcome::Completed(report) => report.was_successful(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.was_successful() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

/// Load the tests of every package in `packages`, keep the ones matching
/// `patterns` and run them with the text runner, reporting to stderr.
pub fn run_tests<S: AsRef<str>>(
    registry: &Registry,
    packages: &[Namespace],
    patterns: &[S],
    config: &RunConfig,
) -> Result<RunOutcome> {
    run_tests_with_target(registry, packages, patterns, config, io::stderr())
}

/// Like [`run_tests`], but writes the report to `target`.
pub fn run_tests_with_target<S: AsRef<str>, W: io::Write + SupportsColor>(
    registry: &Registry,
    packages: &[Namespace],
    patterns: &[S],
    config: &RunConfig,
    target: W,
) -> Result<RunOutcome> {
    let patterns = PatternSet::new(patterns, config.match_mode)?;

    let mut suites = Vec::with_capacity(packages.len());
    for package in packages {
        let loaded = load_tests_from_package(registry, package, &patterns)?;
        suites.push(loaded.suite);
    }

    if suites.iter().all(|suite| suite.is_empty()) {
        tracing::debug!(patterns = patterns.len(), "no test matched");
        return Ok(RunOutcome::NoMatchedTests);
    }

    if config.catch_interrupt {
        interrupt::install()?;
    }

    let formatter = TextFormatter::default()
        .with_target(target)
        .with_verbosity(config.verbosity)
        .with_color_setting(config.color);
    let report = TextTestRunner::default()
        .with_formatter(formatter)
        .with_failfast(config.failfast)
        .with_buffer(config.buffer)
        .with_catch(config.catch_interrupt)
        .run(&suites);

    for (event, err) in &report.fmt_errors {
        tracing::warn!(?event, %err, "failed to write the report");
    }

    Ok(RunOutcome::Completed(report))
}

/// Like [`run_tests`], but ends the process with the exit status when
/// [`RunConfig::exit`] is set. Otherwise returns whether the run succeeded.
pub fn run<S: AsRef<str>>(
    registry: &Registry,
    packages: &[Namespace],
    patterns: &[S],
    config: &RunConfig,
) -> Result<bool> {
    let outcome = run_tests(registry, packages, patterns, config)?;
    if matches!(outcome, RunOutcome::NoMatchedTests) {
        eprintln!("{NO_MATCHED_TESTS}");
    }

    let successful = outcome.was_successful();
    if config.exit {
        std::process::exit(match successful {
            true => 0,
            false => 1,
        });
    }
    Ok(successful)
}

/// Entry point for binaries that link packages with
/// [`package!`](crate::package) and [`module!`](crate::module).
pub fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let res = Registry::linked().and_then(|registry| {
        let package = registry.resolve(&cli.package)?;
        run_tests(&registry, &[package], cli.patterns.as_slice(), &cli.config())
    });

    match res {
        Ok(RunOutcome::NoMatchedTests) => {
            eprintln!("{NO_MATCHED_TESTS}");
            ExitCode::FAILURE
        }
        Ok(RunOutcome::Completed(report)) => report.exit_code(),
        Err(err) => {
            tracing::debug!(?err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
