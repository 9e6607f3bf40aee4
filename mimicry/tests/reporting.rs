// vim: tw=80
//! The reports handed to reporters, and how they are rendered.
#![deny(warnings)]

use std::{panic, sync::{Arc, Mutex}};

use pretty_assertions::assert_eq;

use mimicry::*;
use mimicry::predicate::*;

fn capturing<S>(name: &str) -> (Arc<CapturingReporter>, Mock<S>)
    where S: Signature, S::Args: print::DescribeArgs
{
    let reporter = Arc::new(CapturingReporter::new());
    let mock = Mock::with_settings(
        Settings::described().name(name).reporter(reporter.clone()));
    (reporter, mock)
}

#[test]
fn full_match() {
    let (reporter, mock) = capturing::<fn(u32, &'static str)>("greet");
    let e = mock.expect_call().arg::<0, _>(eq(3)).register();
    mock.call((3, "hello"));

    let captured = reporter.captured();
    let (call, matched) = &captured.full_matches[0];
    assert_eq!("greet(3, \"hello\") as const lvalue", call.to_string());
    assert_eq!(ValueCategory::Lvalue, call.category);
    assert_eq!(Constness::AsConst, call.constness);
    assert_eq!(e.info(), matched.expectation);
    assert_eq!(MatchCategory::Full, matched.category());
}

/// Vacuous outcomes are left out of a rendered match report.
#[test]
fn match_report_display() {
    let info = ExpectationInfo::new();
    let report = MatchReport {
        expectation: info,
        result: MatchResult::new(vec![
            SubMatch::Vacuous,
            SubMatch::Matched("arg[0] is fine".to_owned()),
            SubMatch::Mismatched("arg[1] is not".to_owned()),
        ]),
    };
    assert_eq!(
        format!("  {info}: inapplicable match\n    ✓ arg[0] is fine\n    \
            ✗ arg[1] is not"),
        report.to_string());
}

#[test]
fn expectation_report_display() {
    let info = ExpectationInfo::new();
    let report = ExpectationReport {
        expectation: info,
        states: vec!["expected exactly 2 calls, but got 1 call (satisfied)"
            .to_owned()],
    };
    assert_eq!(
        format!("Unfulfilled {info}\n    expected exactly 2 calls, but got \
            1 call (satisfied)"),
        report.to_string());
}

#[test]
fn expectation_info() {
    let info = ExpectationInfo::new();
    let line = line!() - 1;
    assert_eq!(line, info.location().line());
    assert!(info.location().file().ends_with("reporting.rs"));
    assert_ne!(info.id(), ExpectationInfo::new().id());
    assert_eq!(format!("expectation #{} from {}", info.id(), info.location()),
        info.to_string());
}

/// Registered expectations remember where they were set up.
#[test]
fn expectation_location() {
    let mock = Mock::<fn()>::new();
    let e = mock.expect_call().register();
    let line = line!() - 1;
    assert_eq!(line, e.info().location().line());
    mock.call(());
}

#[test]
fn unfulfilled_states() {
    let (reporter, mock) = capturing::<fn()>("m");
    let e = mock.expect_call().times(3).register();
    mock.call(());
    drop(e);

    let captured = reporter.captured();
    assert_eq!(
        vec!["expected exactly 3 calls, but got 1 call (unsatisfied)"
            .to_owned()],
        captured.unfulfilled[0].states);
}

#[test]
fn no_match_error_lists_rejections() {
    let (reporter, mock) = capturing::<fn(u32)>("m");
    let e1 = mock.expect_call().arg::<0, _>(eq(1)).times_any().register();
    let e2 = mock.expect_call().arg::<0, _>(eq(2)).times_any().register();
    let err = mock.try_call_as::<ConstLvalue>((3,)).unwrap_err();

    let msg = err.to_string();
    let mut lines = msg.lines();
    assert_eq!(Some("m(3) as const lvalue: No matching expectation found"),
        lines.next());
    assert_eq!(Some(format!("  {}: no match", e1.info()).as_str()),
        lines.next());
    assert!(lines.next().is_some_and(|l| l.starts_with("    ✗ arg[0]")));
    assert_eq!(Some(format!("  {}: no match", e2.info()).as_str()),
        lines.next());

    let captured = reporter.captured();
    assert_eq!(err.call(), &captured.no_matches[0].0);
    assert_eq!(2, captured.no_matches[0].1.len());
}

/// Expectations that match none of a call are still reported alongside
/// those that match part of it.
#[test]
fn inapplicable_error_lists_rejections() {
    let (reporter, mock) = capturing::<fn(u32, u32)>("m");
    let e1 = mock.expect_call().arg::<0, _>(eq(7)).times_any().register();
    let e2 = mock.expect_call()
        .arg::<0, _>(eq(1))
        .arg::<1, _>(eq(9))
        .times_any()
        .register();
    let err = mock.try_call_as::<ConstLvalue>((1, 2)).unwrap_err();

    let CallError::Inapplicable { partial, rejected, .. } = &err else {
        panic!("Unexpected error {err:?}");
    };
    assert_eq!(1, partial.len());
    assert_eq!(e2.info(), partial[0].expectation);
    assert_eq!(1, rejected.len());
    assert_eq!(e1.info(), rejected[0].expectation);
    let msg = err.to_string();
    assert!(msg.contains(&format!("  {}: inapplicable match", e2.info())),
        "{msg}");
    assert!(msg.contains(&format!("  {}: no match", e1.info())), "{msg}");

    let captured = reporter.captured();
    assert!(captured.no_matches.is_empty());
    let (call, reported, others) = &captured.inapplicable_matches[0];
    assert_eq!(err.call(), call);
    assert_eq!(partial, reported);
    assert_eq!(rejected, others);
}

#[test]
fn clear() {
    let (reporter, mock) = capturing::<fn()>("m");
    assert!(mock.try_call_as::<ConstLvalue>(()).is_err());
    assert_eq!(1, reporter.captured().no_matches.len());
    reporter.clear();
    assert!(reporter.captured().no_matches.is_empty());
}

/// Reporters may query the handle of the expectation they are told about.
#[test]
fn reporter_queries_handle() {
    #[derive(Default)]
    struct Querying {
        handle: Mutex<Option<ScopedExpectation>>,
        seen: Mutex<Vec<bool>>,
    }
    impl Reporter for Querying {
        fn report_full_match(&self, _call: &CallReport,
            _matched: &MatchReport)
        {
            let handle = self.handle.lock().unwrap();
            let satisfied = handle.as_ref()
                .map(ScopedExpectation::is_satisfied);
            self.seen.lock().unwrap().extend(satisfied);
        }
        fn report_inapplicable_matches(&self, _call: &CallReport,
            _partial: &[MatchReport], _rejected: &[MatchReport]) {}
        fn report_no_matches(&self, _call: &CallReport,
            _rejected: &[MatchReport]) {}
        fn report_unfulfilled_expectation(&self,
            _report: &ExpectationReport) {}
    }

    let reporter = Arc::new(Querying::default());
    let mock = Mock::<fn()>::with_settings(
        Settings::described().reporter(reporter.clone()));
    *reporter.handle.lock().unwrap() =
        Some(mock.expect_call().times(2).register());
    mock.call(());
    mock.call(());
    assert_eq!(vec![false, true], *reporter.seen.lock().unwrap());
    let handle = reporter.handle.lock().unwrap().take();
    drop(handle);
}

/// Reporters are per mock.
#[test]
fn reporter_per_mock() {
    let (r1, m1) = capturing::<fn()>("one");
    let (r2, m2) = capturing::<fn()>("two");
    assert!(m1.try_call_as::<ConstLvalue>(()).is_err());
    assert!(m1.try_call_as::<ConstLvalue>(()).is_err());
    assert!(m2.try_call_as::<ConstLvalue>(()).is_err());
    assert_eq!(2, r1.captured().no_matches.len());
    assert_eq!(1, r2.captured().no_matches.len());
    assert_eq!("two", r2.captured().no_matches[0].0.mock);
}

mod default_reporter {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> ExpectationReport {
        ExpectationReport {
            expectation: ExpectationInfo::new(),
            states: Vec::new(),
        }
    }

    #[test]
    fn match_reports_dont_panic() {
        let call = CallReport {
            mock: "m".to_owned(),
            mock_id: MockId::anonymous(),
            category: ValueCategory::Lvalue,
            constness: Constness::AsConst,
            args: Vec::new(),
        };
        DefaultReporter.report_no_matches(&call, &[]);
        DefaultReporter.report_inapplicable_matches(&call, &[], &[]);
    }

    #[test]
    #[should_panic(expected = "Unfulfilled expectation #")]
    fn unfulfilled_panics() {
        DefaultReporter.report_unfulfilled_expectation(&report());
    }

    #[test]
    fn unfulfilled_while_panicking() {
        struct ReportOnDrop;
        impl Drop for ReportOnDrop {
            fn drop(&mut self) {
                DefaultReporter.report_unfulfilled_expectation(&report());
            }
        }
        let r = panic::catch_unwind(|| {
            let _guard = ReportOnDrop;
            panic!("original");
        });
        assert_eq!(Some(&"original"), r.unwrap_err().downcast_ref::<&str>());
    }
}
