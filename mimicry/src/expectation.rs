// vim: tw=80
//! Expectations: a composition of policies that decides whether it accepts a
//! call, and what to return when it does.
use std::{
    fmt,
    marker::PhantomData,
    panic::Location,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    call::Call,
    policy::{ExpectationPolicy, FinalizePolicy, PolicyList, SubMatch},
    signature::Signature,
};

/// Identity of an expectation in diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExpectationInfo {
    id: usize,
    location: &'static Location<'static>,
}

impl ExpectationInfo {
    /// Allocate a new identity, located at the caller.
    #[track_caller]
    pub fn new() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        ExpectationInfo {
            id: NEXT.fetch_add(1, Ordering::Relaxed),
            location: Location::caller(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Where the expectation was created.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl Default for ExpectationInfo {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpectationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expectation #{} from {}", self.id, self.location)
    }
}

/// How well an expectation fits a call.  Ordered from worst to best.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MatchCategory {
    /// Every constraining policy rejected the call.
    None,
    /// Some policies accepted the call and some rejected it.
    Inapplicable,
    /// No policy rejected the call.
    Full,
}

impl MatchCategory {
    /// Aggregate per-policy outcomes.  Vacuous outcomes don't vote, so an
    /// expectation without constraints fully matches everything.
    pub fn classify(sub_matches: &[SubMatch]) -> Self {
        let mut matched = 0;
        let mut mismatched = 0;
        for sm in sub_matches {
            match sm {
                SubMatch::Vacuous => (),
                SubMatch::Matched(_) => matched += 1,
                SubMatch::Mismatched(_) => mismatched += 1,
            }
        }
        match (matched, mismatched) {
            (_, 0) => MatchCategory::Full,
            (0, _) => MatchCategory::None,
            _ => MatchCategory::Inapplicable,
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchCategory::None => "no match",
            MatchCategory::Inapplicable => "inapplicable match",
            MatchCategory::Full => "full match",
        })
    }
}

/// The verdict of one expectation on one call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchResult {
    pub category: MatchCategory,
    /// Per-policy outcomes in declaration order.
    pub sub_matches: Vec<SubMatch>,
}

impl MatchResult {
    pub fn new(sub_matches: Vec<SubMatch>) -> Self {
        let category = MatchCategory::classify(&sub_matches);
        MatchResult { category, sub_matches }
    }

    pub fn is_full(&self) -> bool {
        self.category == MatchCategory::Full
    }
}

/// What an [`ExpectationCollection`](crate::ExpectationCollection) needs
/// from an expectation.
///
/// This is object safe, so collections can hold expectations of arbitrary
/// composition.  Implement it directly for expectations that don't fit the
/// policy model.
pub trait Expectation<S: Signature>: Send {
    fn info(&self) -> ExpectationInfo;

    /// Has the expectation seen enough calls?
    fn is_satisfied(&self) -> bool;

    /// Would the expectation refuse any further call?
    fn is_saturated(&self) -> bool;

    /// Judge `call` without changing any state.
    fn matches(&self, call: &Call<'_, S>) -> MatchResult;

    /// Record `call` as handled by this expectation.
    fn consume(&mut self, call: &Call<'_, S>);

    /// Produce the return value for a consumed call.
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output;

    /// Human-readable state of each policy that has one.
    fn describe_state(&self) -> Vec<String> {
        Vec::new()
    }
}

/// An expectation built from a [`PolicyList`] and a [`FinalizePolicy`].
///
/// # Examples
/// ```
/// # use mimicry::*;
/// let mut exp = BasicExpectation::<fn(u32) -> u32, _, _>::new(
///         Returns::new(42u32))
///     .and(Times::exactly(1));
/// let call = Call::new(&(5,), ValueCategory::Lvalue, Constness::AsConst);
/// assert!(!exp.is_satisfied());
/// assert!(exp.matches(&call).is_full());
/// exp.consume(&call);
/// assert_eq!(42, exp.finalize_call(&call));
/// assert!(exp.is_satisfied());
/// assert!(exp.is_saturated());
/// ```
pub struct BasicExpectation<S, L, F> {
    info: ExpectationInfo,
    policies: L,
    finalizer: F,
    _signature: PhantomData<fn(S)>,
}

impl<S, F> BasicExpectation<S, (), F>
    where S: Signature, F: FinalizePolicy<S>
{
    /// An expectation with no constraints.  It is satisfied from the start
    /// and never saturates.
    #[track_caller]
    pub fn new(finalizer: F) -> Self {
        BasicExpectation::from_parts(ExpectationInfo::new(), (), finalizer)
    }
}

impl<S, L, F> BasicExpectation<S, L, F>
    where S: Signature, L: PolicyList<S>, F: FinalizePolicy<S>
{
    pub fn from_parts(info: ExpectationInfo, policies: L, finalizer: F)
        -> Self
    {
        BasicExpectation {
            info,
            policies,
            finalizer,
            _signature: PhantomData,
        }
    }

    /// Append `policy`, keeping the state of the existing ones.
    pub fn and<P>(self, policy: P) -> BasicExpectation<S, (L, P), F>
        where P: ExpectationPolicy<S>
    {
        BasicExpectation::from_parts(
            self.info,
            (self.policies, policy),
            self.finalizer,
        )
    }

    /// Replace the finalizer.
    pub fn finally<G>(self, finalizer: G) -> BasicExpectation<S, L, G>
        where G: FinalizePolicy<S>
    {
        BasicExpectation::from_parts(self.info, self.policies, finalizer)
    }

    pub fn policies(&self) -> &L {
        &self.policies
    }
}

impl<S, L, F> Expectation<S> for BasicExpectation<S, L, F>
    where S: Signature, L: PolicyList<S>, F: FinalizePolicy<S>
{
    fn info(&self) -> ExpectationInfo {
        self.info
    }

    fn is_satisfied(&self) -> bool {
        self.policies.all_satisfied()
    }

    fn is_saturated(&self) -> bool {
        self.policies.any_saturated()
    }

    fn matches(&self, call: &Call<'_, S>) -> MatchResult {
        let mut sub_matches = Vec::new();
        self.policies.collect_matches(call, &mut sub_matches);
        MatchResult::new(sub_matches)
    }

    fn consume(&mut self, call: &Call<'_, S>) {
        self.policies.consume_all(call);
    }

    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output {
        self.finalizer.finalize_call(call)
    }

    fn describe_state(&self) -> Vec<String> {
        let mut states = Vec::new();
        self.policies.collect_states(&mut states);
        states
    }
}

#[cfg(test)]
mod t {
    use super::*;

    fn m(s: &str) -> SubMatch {
        SubMatch::Matched(s.to_owned())
    }

    fn x(s: &str) -> SubMatch {
        SubMatch::Mismatched(s.to_owned())
    }

    #[test]
    fn classify_empty() {
        assert_eq!(MatchCategory::Full, MatchCategory::classify(&[]));
    }

    #[test]
    fn classify_vacuous_only() {
        let sm = [SubMatch::Vacuous, SubMatch::Vacuous];
        assert_eq!(MatchCategory::Full, MatchCategory::classify(&sm));
    }

    #[test]
    fn classify_mixed() {
        let sm = [m("a"), SubMatch::Vacuous, x("b")];
        assert_eq!(MatchCategory::Inapplicable, MatchCategory::classify(&sm));
    }

    #[test]
    fn classify_all_rejected() {
        let sm = [x("a"), SubMatch::Vacuous, x("b")];
        assert_eq!(MatchCategory::None, MatchCategory::classify(&sm));
    }

    #[test]
    fn ordering() {
        assert!(MatchCategory::None < MatchCategory::Inapplicable);
        assert!(MatchCategory::Inapplicable < MatchCategory::Full);
    }
}
