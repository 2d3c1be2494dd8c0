use std::cell::Cell;

use testpkg::{AfterAll, BeforeAll, PackageHost, test::TestResult};

thread_local! {
    static SET_UP: Cell<bool> = const { Cell::new(false) };
}

pub fn is_set_up() -> bool {
    SET_UP.get()
}

pub struct Hooks;

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
        SET_UP.set(true);
        ().into()
    }
}

impl AfterAll for Hooks {
    fn tear_down_package(&self) -> TestResult {
        SET_UP.set(false);
        ().into()
    }
}
