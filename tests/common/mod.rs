use std::{
    io,
    sync::{Arc, Mutex},
};

use testpkg::{
    RunConfig, RunOutcome,
    formatter::common::color::SupportsColor,
    registry::{Namespace, Registry},
    run_tests_with_target,
};

#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    pub fn contents(&self) -> String {
        let guard = self.0.lock().unwrap();
        String::from_utf8(guard.clone()).unwrap()
    }
}

/// Run like [`testpkg::run_tests`] but keep the report out of the test output.
pub fn run_tests<S: AsRef<str>>(
    registry: &Registry,
    packages: &[Namespace],
    patterns: &[S],
    config: &RunConfig,
) -> testpkg::Result<RunOutcome> {
    run_tests_reported(registry, packages, patterns, config).map(|(outcome, _)| outcome)
}

/// Run the tests and hand back the report text next to the outcome.
pub fn run_tests_reported<S: AsRef<str>>(
    registry: &Registry,
    packages: &[Namespace],
    patterns: &[S],
    config: &RunConfig,
) -> testpkg::Result<(RunOutcome, String)> {
    let report = Buffer::default();
    let outcome = run_tests_with_target(registry, packages, patterns, config, report.clone())?;
    Ok((outcome, report.contents()))
}
