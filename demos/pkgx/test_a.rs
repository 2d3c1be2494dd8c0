use testpkg::suite::Collector;

pub fn collect(tests: &mut Collector) {
    tests.group("T", |t| {
        t.test("test_one", || assert!(crate::connected()));
        t.test("test_output", || {
            testpkg::println!("only shown with --buffer when this fails");
            assert_eq!(2 + 2, 4);
        });
    });
}
