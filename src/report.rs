use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, result::TestRunResult};

/// What a finished run hands back.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<FmtError> {
    pub result: TestRunResult,
    pub duration: Duration,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<FmtError> TestReport<FmtError> {
    pub fn was_successful(&self) -> bool {
        self.result.was_successful()
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.was_successful() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl<FmtError> Termination for TestReport<FmtError> {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
