// vim: tw=80
//! Finalizers: what a matched call returns.
use std::{any::Any, fmt, panic};

use fragile::Fragile;

use crate::{
    call::Call,
    policy::FinalizePolicy,
    signature::{ArgAt, Signature},
};

/// The finalizer of a freshly created expectation.
///
/// It only exists for signatures returning `()`; any other signature must
/// choose a finalizer before the expectation can be registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitFinalize;

impl<S> FinalizePolicy<S> for InitFinalize
    where S: Signature<Output = ()>
{
    fn finalize_call(&mut self, _call: &Call<'_, S>) {}
}

/// Return a clone of a constant value.
#[derive(Clone, Debug)]
pub struct Returns<R> {
    value: R,
}

impl<R> Returns<R> {
    pub fn new(value: R) -> Self {
        Returns { value }
    }
}

impl<S, R> FinalizePolicy<S> for Returns<R>
    where S: Signature<Output = R>, R: Clone + Send
{
    fn finalize_call(&mut self, _call: &Call<'_, S>) -> R {
        self.value.clone()
    }
}

/// Compute the return value from the arguments.
pub struct ReturnsWith<G> {
    f: G,
}

impl<G> ReturnsWith<G> {
    pub fn new(f: G) -> Self {
        ReturnsWith { f }
    }
}

impl<S, G> FinalizePolicy<S> for ReturnsWith<G>
    where S: Signature, G: FnMut(&S::Args) -> S::Output + Send
{
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output {
        (self.f)(call.args())
    }
}

/// Return a value that can be moved out only once.
///
/// Pair it with a call count of one; a second call panics.
pub struct ReturnOnce<R> {
    value: Option<R>,
}

impl<R> ReturnOnce<R> {
    pub fn new(value: R) -> Self {
        ReturnOnce { value: Some(value) }
    }
}

impl<S, R> FinalizePolicy<S> for ReturnOnce<R>
    where S: Signature<Output = R>, R: Send
{
    fn finalize_call(&mut self, call: &Call<'_, S>) -> R {
        match self.value.take() {
            Some(value) => value,
            None => panic!("{}: called a method twice that was expected \
                only once", call_name(call)),
        }
    }
}

/// Single-threaded version of [`ReturnsWith`].
///
/// The closure need not be `Send`, but the call must happen on the thread
/// that configured it.  Calling from any other thread panics.
pub struct ReturnsSt<G> {
    f: Fragile<G>,
}

impl<G: 'static> ReturnsSt<G> {
    pub fn new(f: G) -> Self {
        ReturnsSt { f: Fragile::new(f) }
    }
}

impl<S, G> FinalizePolicy<S> for ReturnsSt<G>
    where S: Signature, G: FnMut(&S::Args) -> S::Output + 'static
{
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output {
        (self.f.get_mut())(call.args())
    }
}

/// Return a clone of the `N`th argument.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnsArg<const N: usize>;

impl<S, const N: usize> FinalizePolicy<S> for ReturnsArg<N>
    where S: Signature,
          S::Args: ArgAt<N>,
          <S::Args as ArgAt<N>>::Arg: Clone + Into<S::Output>
{
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output {
        <S::Args as ArgAt<N>>::arg_at(call.args()).clone().into()
    }
}

/// Raise a typed panic payload instead of returning.
///
/// The payload can be recovered with
/// [`catch_unwind`](std::panic::catch_unwind) and `downcast_ref`.
#[derive(Clone, Debug)]
pub struct Throws<E> {
    payload: E,
}

impl<E> Throws<E> {
    pub fn new(payload: E) -> Self {
        Throws { payload }
    }
}

impl<S, E> FinalizePolicy<S> for Throws<E>
    where S: Signature, E: Any + Clone + Send
{
    fn finalize_call(&mut self, _call: &Call<'_, S>) -> S::Output {
        panic::panic_any(self.payload.clone())
    }
}

/// Panic with a message instead of returning.
#[derive(Clone, Debug)]
pub struct Panics {
    message: String,
}

impl Panics {
    pub fn new<M: fmt::Display>(message: M) -> Self {
        Panics { message: message.to_string() }
    }
}

impl<S: Signature> FinalizePolicy<S> for Panics {
    fn finalize_call(&mut self, call: &Call<'_, S>) -> S::Output {
        panic!("{}: {}", call_name(call), self.message)
    }
}

fn call_name<'a, S: Signature>(call: &Call<'a, S>) -> &'a str {
    call.source().name
}
