// vim: tw=80
use crate::{
    call::{Call, Constness, ValueCategory},
    policy::{ExpectationPolicy, SubMatch},
    signature::Signature,
};

/// Requires the call's [`ValueCategory`].
///
/// Like [`ConstnessPolicy`], this only guards against calls routed to the
/// wrong overload, so a match doesn't count towards a partial match.
#[derive(Clone, Copy, Debug)]
pub struct CategoryPolicy(pub ValueCategory);

impl<S: Signature> ExpectationPolicy<S> for CategoryPolicy {
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        if self.0.is_matching(call.category()) {
            SubMatch::Vacuous
        } else {
            SubMatch::Mismatched(format!("does not match category {}: \
                called as {}", self.0, call.category()))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {}
}

/// Requires the call's [`Constness`].
#[derive(Clone, Copy, Debug)]
pub struct ConstnessPolicy(pub Constness);

impl<S: Signature> ExpectationPolicy<S> for ConstnessPolicy {
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, call: &Call<'_, S>) -> SubMatch {
        if self.0.is_matching(call.constness()) {
            SubMatch::Vacuous
        } else {
            SubMatch::Mismatched(format!("does not match constness {}: \
                called as {}", self.0, call.constness()))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {}
}
