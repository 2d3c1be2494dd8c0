use std::{io, path::PathBuf};

/// Everything that can go wrong before or around a test run.
///
/// Failures inside tests are not errors here, they are recorded as outcomes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no package or module named `{0}` is registered")]
    NotFound(String),

    #[error("`{0}` is not a package")]
    NotAPackage(String),

    #[error("failed to list package directory `{}`", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{0}` is registered more than once")]
    DuplicateRegistration(String),

    #[error("test `{0}` is defined more than once")]
    DuplicateTest(String),

    #[error("invalid filter pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to install interrupt handler")]
    Interrupt(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
