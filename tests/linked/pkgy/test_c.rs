use testpkg::suite::Collector;

pub fn collect(tests: &mut Collector) {
    tests.test("test_top_level", || ());
    tests.group("Outer", |outer| {
        outer.test("test_first", || ());
        outer.group("Inner", |inner| {
            inner.test("test_nested", || crate::events::record("nested"));
        });
        outer.test("test_last", || ());
    });
}
