// vim: tw=80
//! The registry of active expectations for one overload of one mock.
use std::sync::{Arc, Mutex};

use crate::{
    call::Call,
    error::CallError,
    expectation::{Expectation, MatchCategory},
    log,
    report::{self, CallReport, ExpectationReport, MatchReport, Reporter},
    signature::Signature,
    sync::lock,
};

/// An expectation as it is shared between a collection and its owner.
pub type SharedExpectation<S> = Arc<Mutex<dyn Expectation<S>>>;

/// An ordered set of expectations, consulted first to last.
///
/// Dispatch is serialized: [`handle_call`] selects and consumes an
/// expectation under the collection's lock, so concurrent calls each observe
/// and consume a consistent state.  The reporter runs without any lock held.
/// The finalizer runs holding only its own expectation's lock, so it must not
/// call the same mock overload, nor query the expectation's
/// [`ScopedExpectation`](crate::ScopedExpectation).
///
/// [`handle_call`]: ExpectationCollection::handle_call
pub struct ExpectationCollection<S: Signature> {
    expectations: Mutex<Vec<SharedExpectation<S>>>,
    reporter: Arc<dyn Reporter>,
}

impl<S: Signature> ExpectationCollection<S> {
    /// An empty collection reporting to the installed backend.
    pub fn new() -> Self {
        Self::with_reporter(report::installed_reporter())
    }

    pub fn with_reporter(reporter: Arc<dyn Reporter>) -> Self {
        ExpectationCollection {
            expectations: Mutex::new(Vec::new()),
            reporter,
        }
    }

    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    pub fn len(&self) -> usize {
        lock(&self.expectations).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.expectations).is_empty()
    }

    /// Append an expectation.
    ///
    /// # Panics
    ///
    /// If `expectation` is already part of this collection.
    #[track_caller]
    pub fn push(&self, expectation: SharedExpectation<S>) {
        let mut expectations = lock(&self.expectations);
        assert!(
            !expectations.iter().any(|e| Arc::ptr_eq(e, &expectation)),
            "Expectation is already part of this collection"
        );
        expectations.push(expectation);
    }

    /// Remove a satisfied expectation.
    ///
    /// # Panics
    ///
    /// If `expectation` is not part of this collection, or is not satisfied.
    #[track_caller]
    pub fn remove(&self, expectation: &SharedExpectation<S>) {
        assert!(lock(expectation).is_satisfied(),
            "Removed an unsatisfied expectation");
        assert!(self.detach(expectation),
            "Expectation is not part of this collection");
    }

    /// Remove `expectation` regardless of its state.  Returns whether it was
    /// present.
    pub(crate) fn detach(&self, expectation: &SharedExpectation<S>) -> bool {
        let mut expectations = lock(&self.expectations);
        match expectations.iter().position(|e| Arc::ptr_eq(e, expectation)) {
            Some(i) => {
                expectations.remove(i);
                true
            }
            None => false,
        }
    }

    /// Release `expectation`, reporting it if unfulfilled.
    pub(crate) fn release(&self, expectation: &SharedExpectation<S>) {
        let unfulfilled = {
            let guard = lock(expectation);
            if guard.is_satisfied() {
                None
            } else {
                Some(ExpectationReport::new(&*guard))
            }
        };
        let present = self.detach(expectation);
        debug_assert!(present, "Released an expectation twice");
        if let Some(report) = unfulfilled {
            self.reporter.report_unfulfilled_expectation(&report);
        }
    }

    /// Dispatch `call` to the first non-saturated expectation that fully
    /// matches it, and return what that expectation's finalizer produces.
    ///
    /// If none fully matches, the call fails and the reporter is told about
    /// every expectation that rejected it.  Partial matches, if any, are
    /// reported apart from the outright rejections.
    pub fn handle_call(&self, call: &Call<'_, S>) -> Result<S::Output, CallError>
    {
        let source = call.source();
        let mut rejected = Vec::new();
        let mut handled = None;
        let expectations = lock(&self.expectations);
        for shared in expectations.iter() {
            let mut expectation = lock(shared);
            if expectation.is_saturated() {
                continue;
            }
            let info = expectation.info();
            let result = expectation.matches(call);
            log::consulted(&source, &info, &result);
            if result.is_full() {
                expectation.consume(call);
                let matched = MatchReport { expectation: info, result };
                handled = Some((shared.clone(), matched));
                break;
            }
            rejected.push(MatchReport { expectation: info, result });
        }
        drop(expectations);

        // Only finalizing needs a lock, and then only the expectation's own.
        if let Some((shared, matched)) = handled {
            self.reporter.report_full_match(&CallReport::new(call), &matched);
            let output = lock(&shared).finalize_call(call);
            return Ok(output);
        }

        let report = CallReport::new(call);
        if rejected.iter().any(|m| m.category() == MatchCategory::Inapplicable)
        {
            let (partial, rejected): (Vec<_>, Vec<_>) = rejected.into_iter()
                .partition(|m| m.category() == MatchCategory::Inapplicable);
            self.reporter.report_inapplicable_matches(&report, &partial,
                &rejected);
            Err(CallError::Inapplicable { call: report, partial, rejected })
        } else {
            self.reporter.report_no_matches(&report, &rejected);
            Err(CallError::NoMatch { call: report, rejected })
        }
    }
}

impl<S: Signature> Default for ExpectationCollection<S> {
    fn default() -> Self {
        Self::new()
    }
}
