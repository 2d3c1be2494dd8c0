use testpkg::suite::Collector;

use crate::support::is_set_up;

pub fn collect(tests: &mut Collector) {
    tests.group("T", |t| {
        t.test("test_two", || assert!(is_set_up(), "package setup did not run"));
    });
}
