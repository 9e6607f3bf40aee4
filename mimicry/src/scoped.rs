// vim: tw=80
//! Owning handles for registered expectations.
use std::{fmt, mem, sync::Arc};

use crate::{
    collection::{ExpectationCollection, SharedExpectation},
    expectation::ExpectationInfo,
    signature::Signature,
    sync::lock,
};

/// Type-erased view of one registration.
trait Registration: Send + Sync {
    fn info(&self) -> ExpectationInfo;
    fn is_satisfied(&self) -> bool;
    fn is_saturated(&self) -> bool;
    /// Remove the expectation, reporting it if unfulfilled.
    fn release(self: Box<Self>);
}

struct Registered<S: Signature> {
    collection: Arc<ExpectationCollection<S>>,
    expectation: SharedExpectation<S>,
}

impl<S: Signature> Registration for Registered<S> {
    fn info(&self) -> ExpectationInfo {
        lock(&self.expectation).info()
    }

    fn is_satisfied(&self) -> bool {
        lock(&self.expectation).is_satisfied()
    }

    fn is_saturated(&self) -> bool {
        lock(&self.expectation).is_saturated()
    }

    fn release(self: Box<Self>) {
        self.collection.release(&self.expectation);
    }
}

/// Owns one registered expectation.
///
/// The expectation stays active exactly as long as the handle holds it.
/// Dropping the handle (or calling [`reset`](Self::reset)) removes the
/// expectation from its collection, and reports it if it was not yet
/// satisfied.  With the [`DefaultReporter`](crate::DefaultReporter) that
/// report is a panic, unless the thread is already panicking.
///
/// Handles can't be cloned.  Moving one transfers the registration; use
/// [`take`](Self::take) or [`assign`](Self::assign) to move out of a place
/// that must stay usable.  A handle that holds no registration is *empty*,
/// and every query on it panics.
///
/// The expectation's own finalizer must not query the handle: the
/// expectation is locked while it finalizes a call.
///
/// # Examples
/// ```
/// # use mimicry::*;
/// let mock = Mock::<fn(u32) -> u32>::new();
/// let exp = mock.expect_call()
///     .returns(7)
///     .register();
/// assert!(!exp.is_satisfied());
/// assert_eq!(7, mock.call((1,)));
/// assert!(exp.is_satisfied());
/// ```
#[must_use = "dropping a ScopedExpectation immediately verifies and removes \
    its expectation"]
#[derive(Default)]
pub struct ScopedExpectation {
    registration: Option<Box<dyn Registration>>,
}

impl ScopedExpectation {
    /// Register `expectation` with `collection` and take ownership of the
    /// registration.
    ///
    /// # Panics
    ///
    /// If `expectation` is already part of `collection`.
    #[track_caller]
    pub fn new<S: Signature>(
        collection: Arc<ExpectationCollection<S>>,
        expectation: SharedExpectation<S>,
    ) -> Self {
        collection.push(expectation.clone());
        ScopedExpectation {
            registration: Some(Box::new(Registered { collection, expectation })),
        }
    }

    /// An empty handle.
    pub fn empty() -> Self {
        Self::default()
    }

    #[track_caller]
    fn registration(&self) -> &dyn Registration {
        match &self.registration {
            Some(registration) => registration.as_ref(),
            None => panic!("ScopedExpectation is empty: it was moved from \
                or released"),
        }
    }

    /// Does this handle currently own an expectation?
    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// # Panics
    ///
    /// If the handle is empty.
    #[track_caller]
    pub fn is_satisfied(&self) -> bool {
        self.registration().is_satisfied()
    }

    /// # Panics
    ///
    /// If the handle is empty.
    #[track_caller]
    pub fn is_saturated(&self) -> bool {
        self.registration().is_saturated()
    }

    /// # Panics
    ///
    /// If the handle is empty.
    #[track_caller]
    pub fn info(&self) -> ExpectationInfo {
        self.registration().info()
    }

    /// Move the registration into a new handle, leaving this one empty.
    pub fn take(&mut self) -> ScopedExpectation {
        mem::take(self)
    }

    /// Release the current registration, if any, then take over `other`'s.
    pub fn assign(&mut self, mut other: ScopedExpectation) {
        self.reset();
        self.registration = other.registration.take();
    }

    /// Release the registration now, leaving the handle empty.  Does nothing
    /// to an empty handle.
    pub fn reset(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.release();
        }
    }
}

impl Drop for ScopedExpectation {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for ScopedExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registration {
            Some(r) => f.debug_tuple("ScopedExpectation")
                .field(&r.info())
                .finish(),
            None => f.write_str("ScopedExpectation(<empty>)"),
        }
    }
}
