// vim: tw=80
//! Composing expectations out of policies, including user-defined ones.
#![deny(warnings)]

use std::sync::{Arc, Mutex};

use mimicry::*;

type Sig = fn(u32) -> u32;

/// A policy with fixed answers that logs every consume.
struct Fixed {
    name: &'static str,
    satisfied: bool,
    saturated: bool,
    verdict: Option<bool>,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Fixed {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Fixed {
            name,
            satisfied: true,
            saturated: false,
            verdict: None,
            log: log.clone(),
        }
    }

    fn satisfied(mut self, satisfied: bool) -> Self {
        self.satisfied = satisfied;
        self
    }

    fn saturated(mut self, saturated: bool) -> Self {
        self.saturated = saturated;
        self
    }

    fn verdict(mut self, verdict: bool) -> Self {
        self.verdict = Some(verdict);
        self
    }
}

impl ExpectationPolicy<Sig> for Fixed {
    fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    fn is_saturated(&self) -> bool {
        self.saturated
    }

    fn matches(&self, _call: &Call<'_, Sig>) -> SubMatch {
        match self.verdict {
            None => SubMatch::Vacuous,
            Some(true) => SubMatch::Matched(self.name.to_owned()),
            Some(false) => SubMatch::Mismatched(self.name.to_owned()),
        }
    }

    fn consume(&mut self, _call: &Call<'_, Sig>) {
        self.log.lock().unwrap().push(self.name);
    }
}

fn call(args: &(u32,)) -> Call<'_, Sig> {
    Call::new(args, ValueCategory::Lvalue, Constness::AsConst)
}

fn log() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn no_policies() {
    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32));
    let args = (0,);
    assert!(exp.is_satisfied());
    assert!(!exp.is_saturated());
    let result = exp.matches(&call(&args));
    assert_eq!(MatchCategory::Full, result.category);
    assert!(result.sub_matches.is_empty());
}

#[test]
fn satisfied_is_conjunction() {
    let log = log();
    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("a", &log))
        .and(Fixed::new("b", &log).satisfied(false));
    assert!(!exp.is_satisfied());

    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("a", &log))
        .and(Fixed::new("b", &log));
    assert!(exp.is_satisfied());
}

#[test]
fn saturated_is_disjunction() {
    let log = log();
    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("a", &log).saturated(true))
        .and(Fixed::new("b", &log));
    assert!(exp.is_saturated());

    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("a", &log))
        .and(Fixed::new("b", &log));
    assert!(!exp.is_saturated());
}

#[test]
fn consumes_in_declaration_order() {
    let log = log();
    let mut exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("first", &log))
        .and(Fixed::new("second", &log))
        .and(Fixed::new("third", &log));
    let args = (0,);
    exp.consume(&call(&args));
    assert_eq!(vec!["first", "second", "third"], *log.lock().unwrap());
}

#[test]
fn matches_does_not_consume() {
    let log = log();
    let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Fixed::new("a", &log).verdict(true));
    let args = (0,);
    exp.matches(&call(&args));
    exp.matches(&call(&args));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn classification() {
    let log = log();
    let args = (0,);
    for (a, b, expected) in [
        (true, true, MatchCategory::Full),
        (true, false, MatchCategory::Inapplicable),
        (false, true, MatchCategory::Inapplicable),
        (false, false, MatchCategory::None),
    ] {
        let exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
            .and(Fixed::new("a", &log).verdict(a))
            .and(Fixed::new("vacuous", &log))
            .and(Fixed::new("b", &log).verdict(b));
        let result = exp.matches(&call(&args));
        assert_eq!(expected, result.category, "a={a} b={b}");
        assert_eq!(3, result.sub_matches.len());
        assert_eq!(SubMatch::Vacuous, result.sub_matches[1]);
    }
}

#[test]
fn appending_keeps_state() {
    let mut exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .and(Times::exactly(2));
    let args = (0,);
    exp.consume(&call(&args));
    let exp = exp.and(Times::at_least(1));
    assert!(!exp.is_satisfied());
    assert_eq!(1, exp.policies().0 .1.count());
}

#[test]
fn replacing_the_finalizer() {
    let mut exp = BasicExpectation::<Sig, _, _>::new(Returns::new(1u32))
        .finally(ReturnsWith::new(|args: &(u32,)| args.0 + 1));
    let args = (41,);
    assert_eq!(42, exp.finalize_call(&call(&args)));
}

#[test]
fn custom_policy_on_mock() {
    let log = log();
    let mock = Mock::<Sig>::new();
    let _e = mock.expect_call()
        .and(Fixed::new("custom", &log).verdict(true))
        .returns(5)
        .register();
    assert_eq!(5, mock.call((0,)));
    assert_eq!(vec!["custom"], *log.lock().unwrap());
}

/// Expectations that don't fit the policy model can implement the trait
/// directly.
#[test]
fn custom_expectation() {
    struct Constant(ExpectationInfo);

    impl Expectation<Sig> for Constant {
        fn info(&self) -> ExpectationInfo {
            self.0
        }
        fn is_satisfied(&self) -> bool {
            true
        }
        fn is_saturated(&self) -> bool {
            false
        }
        fn matches(&self, _call: &Call<'_, Sig>) -> MatchResult {
            MatchResult::new(Vec::new())
        }
        fn consume(&mut self, _call: &Call<'_, Sig>) {}
        fn finalize_call(&mut self, call: &Call<'_, Sig>) -> u32 {
            call.args().0 * 10
        }
    }

    let mock = Mock::<Sig>::new();
    let shared: SharedExpectation<Sig> =
        Arc::new(Mutex::new(Constant(ExpectationInfo::new())));
    let _e = ScopedExpectation::new(
        mock.collection::<ConstLvalue>().clone(), shared);
    assert_eq!(30, mock.call((3,)));
}
