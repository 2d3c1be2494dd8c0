use crate::{
    interrupt::StopSignal,
    outcome::{HookFailure, TestOutcome},
};

/// Accumulates everything a run produced.
///
/// Besides the outcomes, the result also owns the decision whether the run
/// should stop before the next test: either because fail-fast saw a bad
/// outcome, or because an interrupt arrived.
#[derive(Debug, Default)]
pub struct TestRunResult {
    pub outcomes: Vec<(String, TestOutcome)>,
    pub hook_errors: Vec<HookFailure>,
    failfast: bool,
    stopped: bool,
    stop_signal: Option<StopSignal>,
}

impl TestRunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failfast(self, failfast: bool) -> Self {
        Self { failfast, ..self }
    }

    /// Also stop once `signal` is raised.
    pub fn with_stop_signal(self, signal: StopSignal) -> Self {
        Self {
            stop_signal: Some(signal),
            ..self
        }
    }

    pub fn add_outcome(&mut self, id: impl Into<String>, outcome: TestOutcome) {
        if self.failfast && outcome.is_bad() {
            self.stop();
        }
        self.outcomes.push((id.into(), outcome));
    }

    pub fn add_hook_error(&mut self, failure: HookFailure) {
        if self.failfast {
            self.stop();
        }
        self.hook_errors.push(failure);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn should_stop(&self) -> bool {
        self.stopped || self.was_interrupted()
    }

    pub fn was_interrupted(&self) -> bool {
        self.stop_signal.is_some_and(|signal| signal.is_raised())
    }

    pub fn tests_run(&self) -> usize {
        self.outcomes.len()
    }

    /// Tests that panicked.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &TestOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.failed())
            .map(|(id, outcome)| (id.as_str(), outcome))
    }

    /// Tests that returned an error.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &TestOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.errored())
            .map(|(id, outcome)| (id.as_str(), outcome))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Errored tests plus failed package hooks.
    pub fn error_count(&self) -> usize {
        self.errors().count() + self.hook_errors.len()
    }

    pub fn was_successful(&self) -> bool {
        self.failure_count() == 0 && self.error_count() == 0
    }
}
