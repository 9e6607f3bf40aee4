// vim: tw=80
//! How argument values show up in diagnostics.
#![deny(warnings)]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use mimicry::*;

#[allow(dead_code)]
#[derive(Debug)]
struct Point {
    x: i32,
    y: i32,
}

/// Lacks `Debug`.
struct Opaque(u32);

#[test]
fn describe_macro() {
    assert_eq!("42", mimicry::describe!(42u32));
    assert_eq!("\"s\"", mimicry::describe!("s"));
    assert_eq!("Point { x: 1, y: -2 }",
        mimicry::describe!(Point { x: 1, y: -2 }));
    assert_eq!(print::PLACEHOLDER, mimicry::describe!(Opaque(5)));
}

#[test]
fn debug_args() {
    let args = (Point { x: 0, y: 0 }, 'c', vec![1u8, 2]);
    assert_eq!(
        vec!["Point { x: 0, y: 0 }".to_owned(), "'c'".to_owned(),
            "[1, 2]".to_owned()],
        print::debug_args::<fn(Point, char, Vec<u8>)>(&args));
}

#[test]
fn placeholders() {
    let args = (Opaque(1), Opaque(2));
    assert_eq!(vec!["{?}".to_owned(), "{?}".to_owned()],
        print::placeholders::<fn(Opaque, Opaque)>(&args));
    assert!(print::placeholders::<fn()>(&()).is_empty());
}

/// Mocks of functions whose arguments can't be printed still work, and
/// report placeholders.
#[test]
fn opaque_mock() {
    let reporter = Arc::new(CapturingReporter::new());
    let mock = Mock::<fn(Opaque, u32) -> u32>::with_settings(
        Settings::opaque().name("opaque").reporter(reporter.clone()));
    let _e = mock.expect_call()
        .withf(|(o, x)| o.0 == *x)
        .times_any()
        .returning(|(o, x)| o.0 + x)
        .register();

    assert_eq!(4, mock.call((Opaque(2), 2)));
    let err = mock.try_call_as::<ConstLvalue>((Opaque(1), 2)).unwrap_err();
    assert_eq!("opaque({?}, {?}) as const lvalue", err.call().to_string());
    assert_eq!(
        SubMatch::Mismatched("args ({?}, {?}) do not match closure".to_owned()),
        reporter.captured().no_matches[0].1[0].result.sub_matches[2]);
}

/// A custom describer can print some arguments and hide others.
#[test]
fn custom_describer() {
    fn describe(args: &(Opaque, u32)) -> Vec<String> {
        vec![print::PLACEHOLDER.to_owned(), mimicry::describe!(args.1)]
    }
    let mock = Mock::<fn(Opaque, u32)>::with_settings(
        Settings::opaque().name("custom").describer(describe));
    let err = mock.try_call_as::<ConstLvalue>((Opaque(0), 7)).unwrap_err();
    assert_eq!("custom({?}, 7) as const lvalue", err.call().to_string());
}
