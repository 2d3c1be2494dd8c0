use std::{io, time::Duration};

use crate::{
    capture::TestOutputCapture,
    config::Verbosity,
    formatter::{
        common::{
            Label,
            color::{ColorSetting, SupportsColor, colors::*},
        },
        *,
    },
    outcome::{TestFailure, TestStatus},
};

const SEPARATOR_HEAVY: &str =
    "======================================================================";
const SEPARATOR_LIGHT: &str =
    "----------------------------------------------------------------------";

/// The classic text report.
///
/// Depending on the verbosity it prints nothing, a mark per test or a line
/// per test while running, and afterwards the details of every error and
/// failure followed by a summary.
#[derive(Debug)]
pub struct TextFormatter<W: io::Write> {
    target: W,
    verbosity: Verbosity,
    color_setting: ColorSetting,
}

impl Default for TextFormatter<io::Stderr> {
    fn default() -> Self {
        Self {
            target: io::stderr(),
            verbosity: Verbosity::default(),
            color_setting: ColorSetting::default(),
        }
    }
}

impl<W: io::Write> TextFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> TextFormatter<WithTarget> {
        TextFormatter {
            target: with_target,
            verbosity: self.verbosity,
            color_setting: self.color_setting,
        }
    }

    pub fn with_verbosity(self, verbosity: Verbosity) -> Self {
        Self { verbosity, ..self }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        Self {
            color_setting: color_setting.into(),
            ..self
        }
    }
}

impl<W: io::Write + SupportsColor> TextFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        match self.color_setting {
            ColorSetting::Automatic => self.target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        match self.use_color() {
            true => write!(self.target, "{color}{text}{RESET}"),
            false => write!(self.target, "{text}"),
        }
    }

    fn write_mark(&mut self, mark: Mark) -> io::Result<()> {
        let (short, long, color) = match mark {
            Mark::Ok => (".", "ok", GREEN),
            Mark::Fail => ("F", "FAIL", RED),
            Mark::Error => ("E", "ERROR", YELLOW),
        };

        match self.verbosity {
            Verbosity::Quiet => Ok(()),
            Verbosity::Normal => {
                self.write_colored(short, color)?;
                self.target.flush()
            }
            Verbosity::Verbose => {
                self.write_colored(long, color)?;
                writeln!(self.target)
            }
        }
    }

    fn write_problem(&mut self, problem: &Problem) -> io::Result<()> {
        let kind = match problem.mark {
            Mark::Fail => "FAIL",
            _ => "ERROR",
        };
        writeln!(self.target, "{SEPARATOR_HEAVY}")?;
        writeln!(self.target, "{kind}: {}", problem.label)?;
        writeln!(self.target, "{SEPARATOR_LIGHT}")?;
        writeln!(self.target, "{}", problem.message.trim_end())?;

        for (name, stream) in [
            ("Stdout", &problem.output.stdout),
            ("Stderr", &problem.output.stderr),
        ] {
            if stream.is_empty() {
                continue;
            }
            writeln!(self.target)?;
            writeln!(self.target, "{name}:")?;
            self.target.write_all(stream)?;
            if !stream.ends_with(b"\n") {
                writeln!(self.target)?;
            }
        }

        writeln!(self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Ok,
    Fail,
    Error,
}

impl From<&TestStatus> for Mark {
    fn from(status: &TestStatus) -> Self {
        match status {
            TestStatus::Passed => Mark::Ok,
            TestStatus::Failed(TestFailure::Panicked(_)) => Mark::Fail,
            TestStatus::Failed(TestFailure::Error(_)) => Mark::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Problem {
    mark: Mark,
    label: String,
    message: String,
    output: TestOutputCapture,
}

/// Everything the summary needs, detached from the run result.
#[derive(Debug, Clone)]
pub struct TextRunOutcomes {
    pub tests_run: usize,
    pub failures: usize,
    pub errors: usize,
    pub duration: Duration,
    pub interrupted: bool,
    problems: Vec<Problem>,
}

impl<'r> From<FmtRunOutcomes<'r>> for TextRunOutcomes {
    fn from(value: FmtRunOutcomes<'r>) -> Self {
        let result = value.result;
        let problem = |id: &str, outcome: &crate::outcome::TestOutcome| Problem {
            mark: Mark::from(&outcome.status),
            label: id.to_string(),
            message: match &outcome.status {
                TestStatus::Failed(failure) => failure.message().to_string(),
                TestStatus::Passed => String::new(),
            },
            output: outcome.output.clone(),
        };

        let problems = result
            .errors()
            .map(|(id, outcome)| problem(id, outcome))
            .chain(result.hook_errors.iter().map(|failure| Problem {
                mark: Mark::Error,
                label: failure.label(),
                message: failure.failure.message().to_string(),
                output: TestOutputCapture::new(),
            }))
            .chain(result.failures().map(|(id, outcome)| problem(id, outcome)))
            .collect();

        Self {
            tests_run: result.tests_run(),
            failures: result.failure_count(),
            errors: result.error_count(),
            duration: value.duration,
            interrupted: value.interrupted,
            problems,
        }
    }
}

impl<W: io::Write + SupportsColor> TestFormatter for TextFormatter<W> {
    type Error = io::Error;

    type TestStart = Label;
    fn fmt_test_start(&mut self, Label(id): Self::TestStart) -> Result<(), Self::Error> {
        if self.verbosity == Verbosity::Verbose {
            write!(self.target, "{id} ... ")?;
            self.target.flush()?;
        }
        Ok(())
    }

    type TestOutcome = TestStatus;
    fn fmt_test_outcome(&mut self, status: Self::TestOutcome) -> Result<(), Self::Error> {
        self.write_mark(Mark::from(&status))
    }

    type HookError = Label;
    fn fmt_hook_error(&mut self, Label(label): Self::HookError) -> Result<(), Self::Error> {
        if self.verbosity == Verbosity::Verbose {
            write!(self.target, "{label} ... ")?;
        }
        self.write_mark(Mark::Error)
    }

    type RunOutcomes = TextRunOutcomes;
    fn fmt_run_outcomes(&mut self, data: Self::RunOutcomes) -> Result<(), Self::Error> {
        if self.verbosity != Verbosity::Quiet {
            writeln!(self.target)?;
        }

        for problem in &data.problems {
            self.write_problem(problem)?;
        }

        writeln!(self.target, "{SEPARATOR_LIGHT}")?;
        match data.tests_run {
            1 => writeln!(self.target, "Ran 1 test in {:.3}s", data.duration.as_secs_f64())?,
            n => writeln!(self.target, "Ran {n} tests in {:.3}s", data.duration.as_secs_f64())?,
        }
        writeln!(self.target)?;

        match (data.failures, data.errors) {
            (0, 0) => self.write_colored("OK", GREEN)?,
            (failures, errors) => {
                self.write_colored("FAILED", RED)?;
                let counts = [("failures", failures), ("errors", errors)]
                    .into_iter()
                    .filter(|(_, count)| *count > 0)
                    .map(|(name, count)| format!("{name}={count}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(self.target, " ({counts})")?;
            }
        }
        writeln!(self.target)?;

        if data.interrupted {
            writeln!(self.target, "Interrupted, not all tests ran.")?;
        }
        self.target.flush()
    }
}
