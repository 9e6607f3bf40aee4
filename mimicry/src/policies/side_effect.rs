// vim: tw=80
use crate::{
    call::Call,
    policy::{ExpectationPolicy, SubMatch},
    signature::{ArgAt, Signature},
};

/// Runs a closure over the arguments of every consumed call.
///
/// Side effects never constrain which calls match.  They run before the
/// finalizer, so their effects are visible even if the finalizer panics.
pub struct SideEffect<G> {
    f: G,
}

impl<G> SideEffect<G> {
    pub fn new(f: G) -> Self {
        SideEffect { f }
    }
}

impl<S, G> ExpectationPolicy<S> for SideEffect<G>
    where S: Signature, G: FnMut(&S::Args) + Send
{
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, _call: &Call<'_, S>) -> SubMatch {
        SubMatch::Vacuous
    }

    fn consume(&mut self, call: &Call<'_, S>) {
        (self.f)(call.args())
    }
}

/// Runs a closure over the `N`th argument of every consumed call.
pub struct ArgSideEffect<const N: usize, G> {
    f: G,
}

impl<const N: usize, G> ArgSideEffect<N, G> {
    pub fn new(f: G) -> Self {
        ArgSideEffect { f }
    }
}

impl<S, G, const N: usize> ExpectationPolicy<S> for ArgSideEffect<N, G>
    where S: Signature,
          S::Args: ArgAt<N>,
          G: FnMut(&<S::Args as ArgAt<N>>::Arg) + Send
{
    fn is_satisfied(&self) -> bool {
        true
    }

    fn is_saturated(&self) -> bool {
        false
    }

    fn matches(&self, _call: &Call<'_, S>) -> SubMatch {
        SubMatch::Vacuous
    }

    fn consume(&mut self, call: &Call<'_, S>) {
        (self.f)(<S::Args as ArgAt<N>>::arg_at(call.args()))
    }
}
