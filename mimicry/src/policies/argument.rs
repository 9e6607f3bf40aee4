// vim: tw=80
//! Constraints on argument values, built on [`predicates`].
use std::fmt;

use predicates::Predicate;
use predicates_tree::CaseTreeExt;

use crate::{
    call::Call,
    policy::{ExpectationPolicy, SubMatch},
    signature::{ArgAt, Signature},
};

/// Describe why `predicate` rejected `value`.
fn explain<T, P>(predicate: &P, value: &T) -> String
    where T: ?Sized, P: Predicate<T>
{
    match predicate.find_case(false, value) {
        Some(case) => case.tree().to_string(),
        None => predicate.to_string(),
    }
}

/// Requires the `N`th argument to satisfy a predicate.
///
/// # Examples
/// ```
/// # use mimicry::*;
/// # use mimicry::predicate::*;
/// let matcher = ArgMatcher::<1, _>::new(eq(42u32));
/// let call = Call::<fn(&'static str, u32)>::new(&("x", 41),
///     ValueCategory::Lvalue, Constness::AsConst);
/// assert!(!matcher.matches(&call).is_matched());
/// ```
pub struct ArgMatcher<const N: usize, P> {
    predicate: P,
}

impl<const N: usize, P> ArgMatcher<N, P> {
    pub fn new(predicate: P) -> Self {
        ArgMatcher { predicate }
    }
}

impl<const N: usize, P: fmt::Display> fmt::Debug for ArgMatcher<N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arg[{N}] {}", self.predicate)
    }
}

impl<S, P, const N: usize> ExpectationPolicy<S> for ArgMatcher<N, P>
    where S: Signature,
          S::Args: ArgAt<N>,
          P: Predicate<<S::Args as ArgAt<N>>::Arg> + Send
{
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        let arg = <S::Args as ArgAt<N>>::arg_at(call.args());
        if self.predicate.eval(arg) {
            SubMatch::Matched(format!("arg[{N}] matches {}", self.predicate))
        } else {
            SubMatch::Mismatched(format!("arg[{N}] does not match {}",
                explain(&self.predicate, arg)))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {}
}

/// Requires the whole argument tuple to satisfy a predicate.
pub struct ArgsMatcher<P> {
    predicate: P,
}

impl<P> ArgsMatcher<P> {
    pub fn new(predicate: P) -> Self {
        ArgsMatcher { predicate }
    }
}

impl<S, P> ExpectationPolicy<S> for ArgsMatcher<P>
    where S: Signature, P: Predicate<S::Args> + Send
{
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        if self.predicate.eval(call.args()) {
            SubMatch::Matched(format!("args match {}", self.predicate))
        } else {
            SubMatch::Mismatched(format!("args do not match {}",
                explain(&self.predicate, call.args())))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {}
}

/// Requires a closure over the argument tuple to return `true`.
pub struct ArgsFnMatcher<G> {
    f: G,
}

impl<G> ArgsFnMatcher<G> {
    pub fn new(f: G) -> Self {
        ArgsFnMatcher { f }
    }
}

impl<S, G> ExpectationPolicy<S> for ArgsFnMatcher<G>
    where S: Signature, G: Fn(&S::Args) -> bool + Send
{
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        if (self.f)(call.args()) {
            SubMatch::Matched("args match closure".to_owned())
        } else {
            SubMatch::Mismatched(format!("args ({}) do not match closure",
                call.describe_args().join(", ")))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {}
}
