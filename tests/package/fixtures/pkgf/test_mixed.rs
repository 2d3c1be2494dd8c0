use testpkg::suite::Collector;

pub fn collect(tests: &mut Collector) {
    tests.group("T", |t| {
        t.test("test_bad", || assert_eq!(1 + 1, 3));
        t.test("test_broken", || "abc".parse::<u32>().map(drop));
        t.test("test_good", || assert_eq!(1 + 1, 2));
    });
}
