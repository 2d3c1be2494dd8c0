use std::{io, sync::Once};

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `TESTPKG_LOG=testpkg=debug`.
pub const LOG_ENV: &str = "TESTPKG_LOG";

/// Initialise tracing subscriber once per process.
///
/// Logs go to stderr, next to but separate from the test report.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("testpkg=warn"));

        fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}
