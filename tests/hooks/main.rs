use std::{
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use testpkg::{
    NoHost, PackageTestSuite, TextTestRunner, formatter::NoFormatter, registry::Registry,
    test::Test,
};

static HOST_HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);

fn boom() {
    panic!("boom");
}

fn suite() -> PackageTestSuite {
    let mut registry = Registry::new();
    registry.add_package("pkgh", "/nowhere", &NoHost).unwrap();
    let mut suite = PackageTestSuite::new(registry.resolve("pkgh").unwrap());
    suite.add_test(Test::from_fn("pkgh.boom", boom));
    suite.add_test(Test::from_fn("pkgh.fine", || ()));
    suite
}

#[test]
fn overlapping_runs_restore_the_host_panic_hook() {
    panic::set_hook(Box::new(|_| {
        HOST_HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
    }));

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    let report = TextTestRunner::default()
                        .with_formatter(NoFormatter)
                        .run(&[suite()]);
                    assert_eq!(report.result.failure_count(), 1);
                }
            });
        }

        // panics outside of a run still reach the host hook while runs are active
        let outside = scope.spawn(boom).join();
        assert!(outside.is_err());
    });
    let during_runs = HOST_HOOK_CALLS.load(Ordering::SeqCst);
    assert_eq!(during_runs, 1);

    assert!(thread::spawn(boom).join().is_err());
    assert_eq!(HOST_HOOK_CALLS.load(Ordering::SeqCst), during_runs + 1);

    drop(panic::take_hook());
}
