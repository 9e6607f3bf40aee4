// vim: tw=80
//! Mocks shared between threads.
#![deny(warnings)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
        Barrier,
    },
    thread,
};

use mimicry::*;

const THREADS: usize = 8;
const CALLS: usize = 25;

/// An exactly-limited expectation handles exactly its share of concurrent
/// calls, and the fallback takes the rest.
#[test]
fn counts_are_consistent() {
    let mock = Arc::new(Mock::<fn(usize) -> u32>::new());
    let limited = mock.expect_call().times(60).returns(1).register();
    let fallback = mock.expect_call().times_any().returns(2).register();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles = (0..THREADS).map(|i| {
        let mock = mock.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            (0..CALLS).map(|j| mock.call((i * CALLS + j,))).collect::<Vec<_>>()
        })
    }).collect::<Vec<_>>();
    let results = handles.into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(THREADS * CALLS, results.len());
    assert_eq!(60, results.iter().filter(|r| **r == 1).count());
    assert_eq!(THREADS * CALLS - 60,
        results.iter().filter(|r| **r == 2).count());
    assert!(limited.is_saturated());
    assert!(fallback.is_satisfied());
}

#[test]
fn side_effects_see_every_call() {
    let mock = Arc::new(Mock::<fn(usize)>::new());
    let sum = Arc::new(AtomicUsize::new(0));
    let s2 = sum.clone();
    let _e = mock.expect_call()
        .times(THREADS * CALLS)
        .then(move |&(x,)| { s2.fetch_add(x, Ordering::Relaxed); })
        .register();

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..CALLS {
                    mock.call((1,));
                }
            });
        }
    });
    assert_eq!(THREADS * CALLS, sum.load(Ordering::Relaxed));
}

/// Expectations can be registered and released while another thread calls.
/// The older expectation keeps handling every call.
#[test]
fn register_while_calling() {
    let mock = Arc::new(Mock::<fn() -> u32>::new());
    let _base = mock.expect_call().times_any().returns(0).register();

    let caller = {
        let mock = mock.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(0, mock.call(()));
            }
        })
    };
    for _ in 0..50 {
        let e = mock.expect_call().times_any().returns(1).register();
        drop(e);
    }
    caller.join().unwrap();
    assert_eq!(1, mock.collection::<ConstLvalue>().len());
}

/// A handle may be released on a different thread than it was created on.
#[test]
fn release_on_another_thread() {
    let reporter = Arc::new(CapturingReporter::new());
    let mock = Mock::<fn()>::with_settings(
        Settings::described().reporter(reporter.clone()));
    let e = mock.expect_call().times(2).register();
    mock.call(());
    thread::spawn(move || drop(e)).join().unwrap();
    assert_eq!(1, reporter.captured().unfulfilled.len());
    assert!(mock.collection::<ConstLvalue>().is_empty());
}
