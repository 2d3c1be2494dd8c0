//! A small package to try the runner on.
//!
//! ```text
//! cargo run --example pkgx -- pkgx -v
//! cargo run --example pkgx -- pkgx one
//! ```

use std::{
    process::ExitCode,
    sync::atomic::{AtomicBool, Ordering},
};

use testpkg::{AfterAll, BeforeAll, PackageHost, test::TestResult};

#[path = "pkgx/test_a.rs"]
mod test_a;

#[path = "pkgx/test_b.rs"]
mod test_b;

static CONNECTED: AtomicBool = AtomicBool::new(false);

pub fn connected() -> bool {
    CONNECTED.load(Ordering::SeqCst)
}

struct Hooks;

impl PackageHost for Hooks {
    fn before_all(&self) -> Option<&dyn BeforeAll> {
        Some(self)
    }

    fn after_all(&self) -> Option<&dyn AfterAll> {
        Some(self)
    }
}

impl BeforeAll for Hooks {
    fn set_up_package(&self) -> TestResult {
        testpkg::println!("connecting");
        CONNECTED.store(true, Ordering::SeqCst);
        ().into()
    }
}

impl AfterAll for Hooks {
    fn tear_down_package(&self) -> TestResult {
        CONNECTED.store(false, Ordering::SeqCst);
        ().into()
    }
}

testpkg::package!(pkgx, dir = "demos/pkgx", host = &Hooks);
testpkg::module!(pkgx.test_a, test_a::collect);
testpkg::module!(pkgx.test_b, test_b::collect);

fn main() -> ExitCode {
    testpkg::main()
}
