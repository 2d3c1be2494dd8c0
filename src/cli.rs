use clap::{Parser, ValueEnum};

use crate::{
    config::{RunConfig, Verbosity},
    formatter::common::color::ColorSetting,
    pattern::MatchMode,
};

/// Run the tests of a registered package.
///
/// Every module of the package directory is imported, its tests are
/// collected and filtered, and the package setup and teardown hooks run
/// around them.
///
/// A pattern keeps a test when all of its characters appear in the test id
/// in order, e.g. `one` keeps `pkgx.test_a.T.test_one`.
///
/// Only packages linked into this binary can be run. Register them with
/// `testpkg::package!` and `testpkg::module!` in a binary whose `main`
/// calls `testpkg::main()`.
///
/// ENVIRONMENT VARIABLES:
///     TESTPKG_COLOR    Default for --color
///     TESTPKG_LOG      Log filter, e.g. `testpkg=debug`
#[derive(Debug, Parser)]
#[command(name = "testpkg")]
#[command(version)]
pub struct Cli {
    /// Dotted name of the package to test
    pub package: String,

    /// Only run tests matching one of these patterns
    pub patterns: Vec<String>,

    /// Print a line per test
    #[arg(long, short = 'v', overrides_with = "quiet")]
    pub verbose: bool,

    /// Only print problems and the summary
    #[arg(long, short = 'q', overrides_with = "verbose")]
    pub quiet: bool,

    /// Stop on the first failure or error
    #[arg(long, short = 'f')]
    pub failfast: bool,

    /// Let Ctrl-C finish the running test and report the partial results
    #[arg(long, short = 'c')]
    pub catch: bool,

    /// Buffer test output and only show it for tests that did not pass
    #[arg(long, short = 'b')]
    pub buffer: bool,

    /// Match pattern characters within a single id segment, case sensitive
    #[arg(long)]
    pub segmented: bool,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, env = "TESTPKG_COLOR")]
    pub color: ColorChoice,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorSetting {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => ColorSetting::Automatic,
            ColorChoice::Always => ColorSetting::Always,
            ColorChoice::Never => ColorSetting::Never,
        }
    }
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        match (self.verbose, self.quiet) {
            (true, _) => Verbosity::Verbose,
            (_, true) => Verbosity::Quiet,
            _ => Verbosity::Normal,
        }
    }

    pub fn config(&self) -> RunConfig {
        let match_mode = match self.segmented {
            true => MatchMode::Segmented,
            false => MatchMode::Permissive,
        };

        RunConfig::default()
            .with_verbosity(self.verbosity())
            .with_failfast(self.failfast)
            .with_catch_interrupt(self.catch)
            .with_buffer(self.buffer)
            .with_match_mode(match_mode)
            .with_color(self.color)
    }
}
