use crate::{formatter::common::color::ColorSetting, pattern::MatchMode};

/// How much the text report prints while tests run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only problems and the summary.
    Quiet,
    /// A mark per test.
    #[default]
    Normal,
    /// A line per test.
    Verbose,
}

/// Everything that shapes a run, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RunConfig {
    pub verbosity: Verbosity,
    pub failfast: bool,
    pub catch_interrupt: bool,
    pub buffer: bool,
    pub match_mode: MatchMode,
    pub color: ColorSetting,
    /// Whether [`run`](crate::run) ends the process with the exit status.
    pub exit: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            failfast: false,
            catch_interrupt: false,
            buffer: false,
            match_mode: MatchMode::default(),
            color: ColorSetting::default(),
            exit: true,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(self, verbosity: Verbosity) -> Self {
        Self { verbosity, ..self }
    }

    pub fn with_failfast(self, failfast: bool) -> Self {
        Self { failfast, ..self }
    }

    pub fn with_catch_interrupt(self, catch_interrupt: bool) -> Self {
        Self {
            catch_interrupt,
            ..self
        }
    }

    pub fn with_buffer(self, buffer: bool) -> Self {
        Self { buffer, ..self }
    }

    pub fn with_match_mode(self, match_mode: MatchMode) -> Self {
        Self { match_mode, ..self }
    }

    pub fn with_color(self, color: impl Into<ColorSetting>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    pub fn with_exit(self, exit: bool) -> Self {
        Self { exit, ..self }
    }
}
