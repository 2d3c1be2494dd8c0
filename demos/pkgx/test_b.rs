use testpkg::suite::Collector;

pub fn collect(tests: &mut Collector) {
    tests.group("T", |t| {
        t.test("test_two", || "42".parse::<u32>().map(drop));
        t.test("test_upper", || assert_eq!("pkgx".to_uppercase(), "PKGX"));
    });
}
