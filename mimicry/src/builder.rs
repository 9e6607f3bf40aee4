// vim: tw=80
//! Fluent configuration of a new expectation.
use std::{any::Any, fmt, ops::RangeBounds, sync::{Arc, Mutex}};

use predicates::Predicate;

use crate::{
    collection::{ExpectationCollection, SharedExpectation},
    expectation::{BasicExpectation, ExpectationInfo},
    policies::{
        ArgMatcher,
        ArgSideEffect,
        ArgsFnMatcher,
        ArgsMatcher,
        InSequence,
        Panics,
        ReturnOnce,
        Returns,
        ReturnsArg,
        ReturnsSt,
        ReturnsWith,
        Sequence,
        SideEffect,
        Throws,
        Times,
    },
    policy::{ExpectationPolicy, FinalizePolicy, PolicyList},
    scoped::ScopedExpectation,
    signature::{ArgAt, Signature},
};

/// An expectation under construction for a particular mock overload.
///
/// Every configuration method consumes the builder and returns a new one,
/// whose type records the policies added so far.  Policies are evaluated in
/// the order they were added; the call count is checked last.  Nothing is
/// active until [`register`](Self::register) is called.
///
/// # Examples
/// ```
/// # use mimicry::*;
/// # use mimicry::predicate::*;
/// let mock = Mock::<fn(u32, &'static str) -> usize>::new();
/// let _e = mock.expect_call()
///     .arg::<0, _>(gt(3))
///     .withf(|(_, s)| !s.is_empty())
///     .times(2)
///     .returning(|(_, s)| s.len())
///     .register();
/// assert_eq!(5, mock.call((4, "hello")));
/// assert_eq!(2, mock.call((9, "hi")));
/// ```
#[must_use = "an expectation has no effect until it is registered"]
pub struct ExpectationBuilder<S: Signature, L, F> {
    collection: Arc<ExpectationCollection<S>>,
    info: ExpectationInfo,
    times: Times,
    sequence: Option<InSequence>,
    policies: L,
    finalizer: F,
}

impl<S: Signature, L, F> fmt::Debug for ExpectationBuilder<S, L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectationBuilder")
            .field("info", &self.info)
            .field("times", &self.times)
            .finish_non_exhaustive()
    }
}

impl<S, L, F> ExpectationBuilder<S, L, F>
    where S: Signature, L: PolicyList<S>
{
    pub(crate) fn new(
        collection: Arc<ExpectationCollection<S>>,
        info: ExpectationInfo,
        policies: L,
        finalizer: F,
    ) -> Self {
        ExpectationBuilder {
            collection,
            info,
            times: Times::default(),
            sequence: None,
            policies,
            finalizer,
        }
    }

    pub fn info(&self) -> ExpectationInfo {
        self.info
    }

    /// Add an arbitrary policy.
    pub fn and<P>(self, policy: P) -> ExpectationBuilder<S, (L, P), F>
        where P: ExpectationPolicy<S>
    {
        ExpectationBuilder {
            collection: self.collection,
            info: self.info,
            times: self.times,
            sequence: self.sequence,
            policies: (self.policies, policy),
            finalizer: self.finalizer,
        }
    }

    fn finally<G>(self, finalizer: G) -> ExpectationBuilder<S, L, G> {
        ExpectationBuilder {
            collection: self.collection,
            info: self.info,
            times: self.times,
            sequence: self.sequence,
            policies: self.policies,
            finalizer,
        }
    }

    /// Require the `N`th argument to satisfy `predicate`.
    pub fn arg<const N: usize, P>(self, predicate: P)
        -> ExpectationBuilder<S, (L, ArgMatcher<N, P>), F>
        where S::Args: ArgAt<N>,
              P: Predicate<<S::Args as ArgAt<N>>::Arg> + Send
    {
        self.and(ArgMatcher::new(predicate))
    }

    /// Require the whole argument tuple to satisfy `predicate`.
    pub fn with<P>(self, predicate: P)
        -> ExpectationBuilder<S, (L, ArgsMatcher<P>), F>
        where P: Predicate<S::Args> + Send
    {
        self.and(ArgsMatcher::new(predicate))
    }

    /// Require `f` to return `true` for the argument tuple.
    pub fn withf<G>(self, f: G)
        -> ExpectationBuilder<S, (L, ArgsFnMatcher<G>), F>
        where G: Fn(&S::Args) -> bool + Send
    {
        self.and(ArgsFnMatcher::new(f))
    }

    /// Run `f` on the arguments of every call this expectation handles.
    pub fn then<G>(self, f: G) -> ExpectationBuilder<S, (L, SideEffect<G>), F>
        where G: FnMut(&S::Args) + Send
    {
        self.and(SideEffect::new(f))
    }

    /// Run `f` on the `N`th argument of every call this expectation handles.
    pub fn then_arg<const N: usize, G>(self, f: G)
        -> ExpectationBuilder<S, (L, ArgSideEffect<N, G>), F>
        where S::Args: ArgAt<N>,
              G: FnMut(&<S::Args as ArgAt<N>>::Arg) + Send
    {
        self.and(ArgSideEffect::new(f))
    }

    /// Make this expectation the next entry of `seq`.
    ///
    /// The entry lasts for as many calls as the final call count requires,
    /// which must be exact and nonzero by the time the expectation is built.
    ///
    /// # Panics
    ///
    /// If the expectation is already part of a sequence.
    #[track_caller]
    pub fn in_sequence(mut self, seq: &mut Sequence) -> Self {
        assert!(self.sequence.is_none(),
            "An expectation can only be part of one sequence");
        self.sequence = Some(seq.reserve());
        self
    }

    /// Replace the call-count constraint.
    pub fn with_times(mut self, times: Times) -> Self {
        self.times = times;
        self
    }

    /// Expect exactly `n` calls.
    pub fn times(self, n: usize) -> Self {
        self.with_times(Times::exactly(n))
    }

    /// Expect a number of calls within `range`.
    ///
    /// # Panics
    ///
    /// If `range` is empty.
    #[track_caller]
    pub fn times_range<R: RangeBounds<usize>>(self, range: R) -> Self {
        self.with_times(Times::range(range))
    }

    pub fn once(self) -> Self {
        self.with_times(Times::once())
    }

    pub fn twice(self) -> Self {
        self.with_times(Times::twice())
    }

    pub fn at_least(self, n: usize) -> Self {
        self.with_times(Times::at_least(n))
    }

    pub fn at_most(self, n: usize) -> Self {
        self.with_times(Times::at_most(n))
    }

    /// Forbid this expectation from ever being called.
    pub fn never(self) -> Self {
        self.with_times(Times::never())
    }

    /// Accept any number of calls, including none.
    pub fn times_any(self) -> Self {
        self.with_times(Times::any())
    }

    /// Finish with a custom finalizer.
    pub fn finalize_with<G>(self, finalizer: G) -> ExpectationBuilder<S, L, G>
        where G: FinalizePolicy<S>
    {
        self.finally(finalizer)
    }

    /// Return a clone of `value` from every call.
    pub fn returns(self, value: S::Output)
        -> ExpectationBuilder<S, L, Returns<S::Output>>
        where S::Output: Clone + Send
    {
        self.finally(Returns::new(value))
    }

    /// Compute the return value from the arguments.
    pub fn returning<G>(self, f: G) -> ExpectationBuilder<S, L, ReturnsWith<G>>
        where G: FnMut(&S::Args) -> S::Output + Send
    {
        self.finally(ReturnsWith::new(f))
    }

    /// Return `value` from a single call.  A second call panics.
    pub fn return_once(self, value: S::Output)
        -> ExpectationBuilder<S, L, ReturnOnce<S::Output>>
        where S::Output: Send
    {
        self.finally(ReturnOnce::new(value))
    }

    /// Single-threaded version of [`returning`](Self::returning).  Can be used
    /// when the closure isn't `Send`.
    pub fn returning_st<G>(self, f: G) -> ExpectationBuilder<S, L, ReturnsSt<G>>
        where G: FnMut(&S::Args) -> S::Output + 'static
    {
        self.finally(ReturnsSt::new(f))
    }

    /// Return a clone of the `N`th argument.
    pub fn returns_arg<const N: usize>(self)
        -> ExpectationBuilder<S, L, ReturnsArg<N>>
        where S::Args: ArgAt<N>,
              <S::Args as ArgAt<N>>::Arg: Clone + Into<S::Output>
    {
        self.finally(ReturnsArg::<N>)
    }

    /// Instead of returning, panic with `payload`, which callers can recover
    /// with [`catch_unwind`](std::panic::catch_unwind).
    pub fn throws<E>(self, payload: E) -> ExpectationBuilder<S, L, Throws<E>>
        where E: Any + Clone + Send
    {
        self.finally(Throws::new(payload))
    }

    /// Instead of returning, panic with `message`.
    pub fn panics<M: fmt::Display>(self, message: M)
        -> ExpectationBuilder<S, L, Panics>
    {
        self.finally(Panics::new(message))
    }
}

impl<S, L, F> ExpectationBuilder<S, L, F>
    where S: Signature, L: PolicyList<S> + 'static, F: FinalizePolicy<S> + 'static
{
    /// The finished expectation, without registering it.
    ///
    /// # Panics
    ///
    /// If the expectation is part of a sequence but its call count is not
    /// exact, or is zero.
    #[track_caller]
    pub fn build(self) -> (
        Arc<ExpectationCollection<S>>,
        BasicExpectation<S, ((L, Option<InSequence>), Times), F>,
    ) {
        let mut sequence = self.sequence;
        if let Some(entry) = sequence.as_mut() {
            assert!(self.times.is_exact(),
                "Only Expectations with an exact call count have sequences");
            entry.expect_calls(self.times.min());
        }
        let expectation = BasicExpectation::from_parts(
            self.info,
            ((self.policies, sequence), self.times),
            self.finalizer,
        );
        (self.collection, expectation)
    }

    /// Activate the expectation, and hand out the handle that keeps it
    /// active.
    #[track_caller]
    pub fn register(self) -> ScopedExpectation {
        let (collection, expectation) = self.build();
        let shared: SharedExpectation<S> = Arc::new(Mutex::new(expectation));
        ScopedExpectation::new(collection, shared)
    }
}

impl<S, L, F> From<ExpectationBuilder<S, L, F>> for ScopedExpectation
    where S: Signature, L: PolicyList<S> + 'static, F: FinalizePolicy<S> + 'static
{
    #[track_caller]
    fn from(builder: ExpectationBuilder<S, L, F>) -> Self {
        builder.register()
    }
}
