//! Formatting of test runs.
//!
//! The runner reports what happens through a [`TestFormatter`]. Every event is
//! handed over as a `Fmt*` transfer object, which the formatter converts into
//! its own associated type first. A formatter only pays for what it reads:
//! an event it does not care about converts into `()`.
//!
//! Formatting errors never abort a run. The runner collects them together
//! with the name of the event that failed and puts them on the report.

use std::time::Duration;

use crate::{
    outcome::{HookFailure, TestOutcome},
    result::TestRunResult,
    test::TestMeta,
};

pub mod common;
mod no;
mod text;

pub use no::NoFormatter;
pub use text::{TextFormatter, TextRunOutcomes};

#[derive(Debug, Clone, Copy)]
pub struct FmtTestStart<'m> {
    pub meta: &'m TestMeta,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtTestOutcome<'m> {
    pub meta: &'m TestMeta,
    pub outcome: &'m TestOutcome,
}

/// A package hook failed.
#[derive(Debug, Clone, Copy)]
pub struct FmtHookError<'h> {
    pub failure: &'h HookFailure,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtRunOutcomes<'r> {
    pub result: &'r TestRunResult,
    pub duration: Duration,
    pub interrupted: bool,
}

pub trait TestFormatter {
    type Error;

    type TestStart: for<'m> From<FmtTestStart<'m>>;
    fn fmt_test_start(&mut self, data: Self::TestStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type TestOutcome: for<'m> From<FmtTestOutcome<'m>>;
    fn fmt_test_outcome(&mut self, data: Self::TestOutcome) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type HookError: for<'h> From<FmtHookError<'h>>;
    fn fmt_hook_error(&mut self, data: Self::HookError) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type RunOutcomes: for<'r> From<FmtRunOutcomes<'r>>;
    fn fmt_run_outcomes(&mut self, data: Self::RunOutcomes) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

/// Which formatter event failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    TestStart,
    TestOutcome,
    HookError,
    RunOutcomes,
}

/// Call a formatter method and tag a failure with the event it belongs to.
macro_rules! named_fmt {
    ($formatter:ident.fmt_test_start($data:expr)) => {
        $formatter
            .fmt_test_start($data)
            .map_err(|err| ($crate::formatter::FormatError::TestStart, err))
    };
    ($formatter:ident.fmt_test_outcome($data:expr)) => {
        $formatter
            .fmt_test_outcome($data)
            .map_err(|err| ($crate::formatter::FormatError::TestOutcome, err))
    };
    ($formatter:ident.fmt_hook_error($data:expr)) => {
        $formatter
            .fmt_hook_error($data)
            .map_err(|err| ($crate::formatter::FormatError::HookError, err))
    };
    ($formatter:ident.fmt_run_outcomes($data:expr)) => {
        $formatter
            .fmt_run_outcomes($data)
            .map_err(|err| ($crate::formatter::FormatError::RunOutcomes, err))
    };
}

pub(crate) use named_fmt;

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, res: Result<(), (FormatError, E)>);
}

impl<E> FmtErrors<E> for Vec<(FormatError, E)> {
    fn push_on_error(&mut self, res: Result<(), (FormatError, E)>) {
        if let Err(err) = res {
            self.push(err);
        }
    }
}
