//! Turning test bodies into statuses.
//!
//! Running a test means calling its function with panics caught. A panic is
//! the way assertions fail in Rust, so a panicking test is a failure. A test
//! that returns an `Err` ran into an error instead.

use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::{
    capture,
    outcome::{TestFailure, TestStatus},
    test::TestResult,
};

/// Convert a panic payload into a string.
///
/// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
/// Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}

/// Call `f`, catching a panic and mapping the outcome to a [`TestStatus`].
pub fn call_guarded<F: FnOnce() -> TestResult>(f: F) -> TestStatus {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.into(),
        Err(payload) => {
            let message = payload_as_string(payload);
            let message = match capture::take_panic_location() {
                Some(location) => format!("panicked at {location}:\n{message}"),
                None => message,
            };
            TestStatus::Failed(TestFailure::Panicked(message))
        }
    }
}
