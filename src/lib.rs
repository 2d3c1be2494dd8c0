//! Run the tests of a package.
//!
//! A package is a directory of test modules registered with the crate. A run
//! discovers every module of the package, flattens the test trees they
//! collect, keeps the tests matching the given patterns and executes them
//! between the package's setup and teardown hooks. The text runner reports
//! the outcome and the process exits with `0` only if every test passed.

pub mod capture;
pub mod filter;
pub mod formatter;
pub mod interrupt;
pub mod outcome;
pub mod panic;
pub mod pattern;
pub mod registry;
pub mod suite;

mod error;
pub use error::*;

mod cli;
pub use cli::*;

mod config;
pub use config::*;

mod importer;
pub use importer::*;

mod loader;
pub use loader::*;

mod logging;
pub use logging::*;

mod package;
pub use package::*;

mod program;
pub use program::*;

mod report;
pub use report::*;

mod result;
pub use result::*;

mod runner;
pub use runner::*;

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}

#[cfg(test)]
mod test_support;
