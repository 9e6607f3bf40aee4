// vim: tw=80
//! Diagnostics for dispatch outcomes, and the backends that receive them.
//!
//! The core never decides how a failure is surfaced.  It hands a report to
//! the [`Reporter`] of the mock involved, which may log it, record it, or
//! panic.  Call-site failures are additionally surfaced as a
//! [`CallError`](crate::CallError) to the caller.
use std::{
    fmt,
    mem,
    sync::{Arc, Mutex, PoisonError, RwLock},
    thread,
};

use once_cell::sync::Lazy;

use crate::{
    call::{Call, Constness, MockId, ValueCategory},
    expectation::{Expectation, ExpectationInfo, MatchCategory, MatchResult},
    log,
    policy::SubMatch,
    signature::Signature,
    sync::lock,
};

/// An owned description of a call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallReport {
    pub mock: String,
    pub mock_id: MockId,
    pub category: ValueCategory,
    pub constness: Constness,
    /// One entry per argument; `{?}` for values that can't be described.
    pub args: Vec<String>,
}

impl CallReport {
    pub fn new<S: Signature>(call: &Call<'_, S>) -> Self {
        let source = call.source();
        CallReport {
            mock: source.name.to_owned(),
            mock_id: source.id,
            category: call.category(),
            constness: call.constness(),
            args: call.describe_args(),
        }
    }
}

impl fmt::Display for CallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) as {} {}", self.mock, self.args.join(", "),
            self.constness, self.category)
    }
}

/// How one expectation judged one call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchReport {
    pub expectation: ExpectationInfo,
    pub result: MatchResult,
}

impl MatchReport {
    pub fn category(&self) -> MatchCategory {
        self.result.category
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.expectation, self.result.category)?;
        for sm in self.result.sub_matches.iter()
            .filter(|sm| **sm != SubMatch::Vacuous)
        {
            write!(f, "\n    {sm}")?;
        }
        Ok(())
    }
}

/// The state of an expectation that was released unfulfilled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpectationReport {
    pub expectation: ExpectationInfo,
    pub states: Vec<String>,
}

impl ExpectationReport {
    pub fn new<S: Signature>(expectation: &dyn Expectation<S>) -> Self {
        ExpectationReport {
            expectation: expectation.info(),
            states: expectation.describe_state(),
        }
    }
}

impl fmt::Display for ExpectationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unfulfilled {}", self.expectation)?;
        for state in &self.states {
            write!(f, "\n    {state}")?;
        }
        Ok(())
    }
}

/// A reporting backend.
///
/// Reporters are shared between threads and may be invoked concurrently.
/// No dispatch lock is held while a reporter runs, so it may call mocks and
/// query [`ScopedExpectation`](crate::ScopedExpectation)s.
pub trait Reporter: Send + Sync {
    /// `call` was handled by the expectation described by `matched`.
    fn report_full_match(&self, call: &CallReport, matched: &MatchReport);

    /// No expectation fully matched `call`, but those in `partial` matched
    /// some of it.  The others, which matched none of it, are in `rejected`.
    fn report_inapplicable_matches(&self, call: &CallReport,
        partial: &[MatchReport], rejected: &[MatchReport]);

    /// Every non-saturated expectation rejected `call`.  `rejected` may be
    /// empty.
    fn report_no_matches(&self, call: &CallReport, rejected: &[MatchReport]);

    /// An expectation was released before it was satisfied.
    fn report_unfulfilled_expectation(&self, report: &ExpectationReport);
}

/// The backend used unless another is installed.
///
/// Match failures are logged; the failing call itself panics or returns an
/// error, depending on how it was made.  An unfulfilled expectation panics,
/// unless the thread is already panicking.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultReporter;

impl Reporter for DefaultReporter {
    fn report_full_match(&self, call: &CallReport, matched: &MatchReport) {
        log::full_match(call, matched);
    }

    fn report_inapplicable_matches(&self, call: &CallReport,
        partial: &[MatchReport], rejected: &[MatchReport])
    {
        log::inapplicable_matches(call, partial, rejected);
    }

    fn report_no_matches(&self, call: &CallReport, rejected: &[MatchReport]) {
        log::no_matches(call, rejected);
    }

    fn report_unfulfilled_expectation(&self, report: &ExpectationReport) {
        log::unfulfilled_expectation(report);
        if !thread::panicking() {
            panic!("{report}");
        }
    }
}

/// Everything a [`CapturingReporter`] has seen.
#[derive(Clone, Debug, Default)]
pub struct Captured {
    pub full_matches: Vec<(CallReport, MatchReport)>,
    /// Each with the partial matches, then the outright rejections.
    pub inapplicable_matches:
        Vec<(CallReport, Vec<MatchReport>, Vec<MatchReport>)>,
    pub no_matches: Vec<(CallReport, Vec<MatchReport>)>,
    pub unfulfilled: Vec<ExpectationReport>,
}

/// A backend that records every report and never panics.  Useful for
/// testing code that builds on this crate.
///
/// # Examples
/// ```
/// # use std::sync::Arc;
/// # use mimicry::*;
/// let reporter = Arc::new(CapturingReporter::default());
/// let mock = Mock::<fn(u32)>::with_settings(
///     Settings::described().reporter(reporter.clone()));
/// assert!(mock.try_call_as::<ConstLvalue>((5,)).is_err());
/// assert_eq!(1, reporter.captured().no_matches.len());
/// ```
#[derive(Debug, Default)]
pub struct CapturingReporter {
    captured: Mutex<Captured>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the reports so far.
    pub fn captured(&self) -> Captured {
        lock(&self.captured).clone()
    }

    /// Forget every report so far.
    pub fn clear(&self) {
        *lock(&self.captured) = Captured::default();
    }
}

impl Reporter for CapturingReporter {
    fn report_full_match(&self, call: &CallReport, matched: &MatchReport) {
        lock(&self.captured).full_matches
            .push((call.clone(), matched.clone()));
    }

    fn report_inapplicable_matches(&self, call: &CallReport,
        partial: &[MatchReport], rejected: &[MatchReport])
    {
        lock(&self.captured).inapplicable_matches
            .push((call.clone(), partial.to_vec(), rejected.to_vec()));
    }

    fn report_no_matches(&self, call: &CallReport, rejected: &[MatchReport]) {
        lock(&self.captured).no_matches
            .push((call.clone(), rejected.to_vec()));
    }

    fn report_unfulfilled_expectation(&self, report: &ExpectationReport) {
        lock(&self.captured).unfulfilled.push(report.clone());
    }
}

static INSTALLED: Lazy<RwLock<Arc<dyn Reporter>>> = Lazy::new(|| {
    let default: Arc<dyn Reporter> = Arc::new(DefaultReporter);
    RwLock::new(default)
});

/// Replace the process-wide default backend.
///
/// Only mocks created afterwards are affected.  Returns the previous
/// backend.
pub fn install_reporter(reporter: Arc<dyn Reporter>) -> Arc<dyn Reporter> {
    let mut installed = INSTALLED.write()
        .unwrap_or_else(PoisonError::into_inner);
    mem::replace(&mut *installed, reporter)
}

/// The process-wide default backend.
pub fn installed_reporter() -> Arc<dyn Reporter> {
    INSTALLED.read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
