// vim: tw=80
//! The policy contracts from which expectations are composed.
//!
//! An expectation is a list of [`ExpectationPolicy`]s plus exactly one
//! [`FinalizePolicy`].  Policies are combined with a cons list: `()` is the
//! empty list and `(L, P)` appends `P` to the list `L`.  Appending therefore
//! moves the existing policies, with their state, into a new value.
use std::fmt;

use crate::{call::Call, signature::Signature};

/// What a single policy thinks of a call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubMatch {
    /// The policy places no constraint on calls.
    Vacuous,
    /// The policy accepts the call.
    Matched(String),
    /// The policy rejects the call.
    Mismatched(String),
}

impl SubMatch {
    /// Does this outcome permit the call?
    pub fn is_matched(&self) -> bool {
        !matches!(self, SubMatch::Mismatched(_))
    }
}

impl fmt::Display for SubMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubMatch::Vacuous => Ok(()),
            SubMatch::Matched(d) => write!(f, "✓ {d}"),
            SubMatch::Mismatched(d) => write!(f, "✗ {d}"),
        }
    }
}

/// A constraint on the calls an expectation accepts.
///
/// `matches` takes `&self` so that it can be evaluated speculatively for
/// every expectation in a collection; any state change belongs in
/// `consume`, which only runs for the expectation that handles the call.
pub trait ExpectationPolicy<S: Signature>: Send {
    /// Has the policy seen enough calls to be fulfilled?
    fn is_satisfied(&self) -> bool;

    /// Would the policy refuse any further call?
    fn is_saturated(&self) -> bool;

    fn matches(&self, call: &Call<'_, S>) -> SubMatch;

    /// Record `call` as handled.  Runs after `matches` accepted it.
    fn consume(&mut self, call: &Call<'_, S>);

    /// Human-readable state, used when the expectation is unfulfilled.
    fn describe_state(&self) -> Option<String> {
        None
    }
}

/// An absent policy places no constraint on calls.
impl<S, P> ExpectationPolicy<S> for Option<P>
    where S: Signature, P: ExpectationPolicy<S>
{
    fn is_satisfied(&self) -> bool {
        self.as_ref().map_or(true, |p| p.is_satisfied())
    }

    fn is_saturated(&self) -> bool {
        self.as_ref().map_or(false, |p| p.is_saturated())
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        self.as_ref().map_or(SubMatch::Vacuous, |p| p.matches(call))
    }

    fn consume(&mut self, call: &Call<'_, S>) {
        if let Some(p) = self.as_mut() {
            p.consume(call);
        }
    }

    fn describe_state(&self) -> Option<String> {
        self.as_ref().and_then(|p| p.describe_state())
    }
}

/// Produces the return value of a call.
///
/// May panic instead of returning, which the caller observes as if the
/// mocked function had thrown.
pub trait FinalizePolicy<S: Signature>: Send {
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output;
}

/// An ordered list of policies that behaves as one.
///
/// The list is satisfied only when all members are, saturated as soon as any
/// member is, and consumes in declaration order.  The empty list is
/// satisfied and never saturated.
pub trait PolicyList<S: Signature>: Send {
    fn all_satisfied(&self) -> bool;

    fn any_saturated(&self) -> bool;

    /// Evaluate every member, in declaration order.
    fn collect_matches(&self, call: &Call<'_, S>, out: &mut Vec<SubMatch>);

    fn consume_all(&mut self, call: &Call<'_, S>);

    fn collect_states(&self, out: &mut Vec<String>);
}

impl<S: Signature> PolicyList<S> for () {
    fn all_satisfied(&self) -> bool {
        true
    }

    fn any_saturated(&self) -> bool {
        false
    }

    fn collect_matches(&self, _call: &Call<'_, S>, _out: &mut Vec<SubMatch>) {}

    fn consume_all(&mut self, _call: &Call<'_, S>) {}

    fn collect_states(&self, _out: &mut Vec<String>) {}
}

impl<S, L, P> PolicyList<S> for (L, P)
    where S: Signature, L: PolicyList<S>, P: ExpectationPolicy<S>
{
    fn all_satisfied(&self) -> bool {
        self.0.all_satisfied() && self.1.is_satisfied()
    }

    fn any_saturated(&self) -> bool {
        self.0.any_saturated() || self.1.is_saturated()
    }

    fn collect_matches(&self, call: &Call<'_, S>, out: &mut Vec<SubMatch>) {
        self.0.collect_matches(call, out);
        out.push(self.1.matches(call));
    }

    fn consume_all(&mut self, call: &Call<'_, S>) {
        self.0.consume_all(call);
        self.1.consume(call);
    }

    fn collect_states(&self, out: &mut Vec<String>) {
        self.0.collect_states(out);
        out.extend(self.1.describe_state());
    }
}
