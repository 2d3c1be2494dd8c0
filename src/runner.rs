use std::{io, time::Instant};

use crate::{
    capture::{self, CapturePanicHookGuard},
    formatter::*,
    interrupt::StopSignal,
    outcome::{HookFailure, TestOutcome},
    package::{PackageTestSuite, RunContext},
    panic::call_guarded,
    report::TestReport,
    result::TestRunResult,
    test::Test,
};

/// Runs package suites one after the other and reports through a formatter.
#[derive(Debug)]
pub struct TextTestRunner<Formatter> {
    formatter: Formatter,
    failfast: bool,
    buffer: bool,
    catch: bool,
    stop_signal: Option<StopSignal>,
}

impl Default for TextTestRunner<TextFormatter<io::Stderr>> {
    fn default() -> Self {
        Self {
            formatter: TextFormatter::default(),
            failfast: false,
            buffer: false,
            catch: false,
            stop_signal: None,
        }
    }
}

impl<Formatter> TextTestRunner<Formatter> {
    pub fn with_formatter<WithFormatter: TestFormatter>(
        self,
        formatter: WithFormatter,
    ) -> TextTestRunner<WithFormatter> {
        TextTestRunner {
            formatter,
            failfast: self.failfast,
            buffer: self.buffer,
            catch: self.catch,
            stop_signal: self.stop_signal,
        }
    }

    /// Stop after the first failure or error.
    pub fn with_failfast(self, failfast: bool) -> Self {
        Self { failfast, ..self }
    }

    /// Buffer test output and only show it for tests that did not pass.
    pub fn with_buffer(self, buffer: bool) -> Self {
        Self { buffer, ..self }
    }

    /// Stop before the next test once an interrupt arrives.
    pub fn with_catch(self, catch: bool) -> Self {
        Self { catch, ..self }
    }

    /// Stop before the next test once `stop_signal` is raised, regardless of
    /// [`with_catch`](Self::with_catch).
    pub fn with_stop_signal(self, stop_signal: StopSignal) -> Self {
        Self {
            stop_signal: Some(stop_signal),
            ..self
        }
    }
}

struct Execution<'f, Formatter: TestFormatter> {
    formatter: &'f mut Formatter,
    result: TestRunResult,
    buffer: bool,
    fmt_errors: Vec<(FormatError, Formatter::Error)>,
}

impl<Formatter: TestFormatter> RunContext for Execution<'_, Formatter> {
    fn should_stop(&self) -> bool {
        self.result.should_stop()
    }

    fn run_test(&mut self, test: &Test) {
        let formatter = &mut *self.formatter;
        let meta = &test.meta;
        self.fmt_errors
            .push_on_error(named_fmt!(formatter.fmt_test_start(FmtTestStart { meta }.into())));

        capture::begin(self.buffer);
        let now = Instant::now();
        let status = call_guarded(|| test.call());
        let duration = now.elapsed();
        let output = capture::finish();

        let outcome = TestOutcome {
            status,
            duration,
            output,
        };
        tracing::debug!(test = %meta.id, passed = outcome.passed(), ?duration, "test finished");
        self.fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_test_outcome(
                FmtTestOutcome {
                    meta,
                    outcome: &outcome
                }
                .into()
            )
        ));
        self.result.add_outcome(meta.id.to_string(), outcome);
    }

    fn hook_failed(&mut self, failure: HookFailure) {
        let formatter = &mut *self.formatter;
        tracing::debug!(%failure, "package hook failed");
        self.fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_hook_error(FmtHookError { failure: &failure }.into())
        ));
        self.result.add_hook_error(failure);
    }
}

impl<Formatter: TestFormatter> TextTestRunner<Formatter> {
    pub fn run(self, suites: &[PackageTestSuite]) -> TestReport<Formatter::Error> {
        let now = Instant::now();

        let mut formatter = self.formatter;
        let tests: usize = suites.iter().map(PackageTestSuite::len).sum();
        tracing::info!(tests, suites = suites.len(), "starting test run");

        let mut result = TestRunResult::new().with_failfast(self.failfast);
        if let Some(signal) = self.stop_signal.or_else(|| self.catch.then(StopSignal::new)) {
            result = result.with_stop_signal(signal);
        }

        let mut execution = Execution {
            formatter: &mut formatter,
            result,
            buffer: self.buffer,
            fmt_errors: Vec::new(),
        };

        {
            let _panic_hook = CapturePanicHookGuard::install();
            for suite in suites {
                if execution.should_stop() {
                    break;
                }
                suite.run(&mut execution);
            }
        }

        let Execution {
            result,
            mut fmt_errors,
            ..
        } = execution;

        let duration = now.elapsed();
        let interrupted = result.was_interrupted();
        tracing::info!(
            run = result.tests_run(),
            failures = result.failure_count(),
            errors = result.error_count(),
            interrupted,
            "finished test run"
        );
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_run_outcomes(
                FmtRunOutcomes {
                    result: &result,
                    duration,
                    interrupted
                }
                .into()
            )
        ));

        TestReport {
            result,
            duration,
            fmt_errors,
        }
    }
}
