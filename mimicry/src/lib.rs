// vim: tw=80
//! Expectation matching and call dispatch for mock objects.
//!
//! Mimicry is the engine underneath a mock: it decides which of a mock's
//! configured expectations handles each call, tracks how often every
//! expectation has been used, produces the return value, and reports every
//! call that nothing accepts as well as every expectation that is released
//! unfulfilled.
//!
//! # Usage
//!
//! * Create a [`Mock`] for a function signature, written as a function
//!   pointer type such as `fn(u32, String) -> bool`.
//! * Configure expectations with [`Mock::expect_call`] and friends.  Each one
//!   can have argument matchers, a call count, side effects, a position in a
//!   [`Sequence`], and a return value.  [`register`] activates it and yields a
//!   [`ScopedExpectation`] that keeps it active.
//! * Hand the mock to the code under test, and forward its calls to
//!   [`Mock::call`].  Each call is dispatched to the first active expectation,
//!   in registration order, that accepts it and is not yet used up.
//! * When a `ScopedExpectation` goes out of scope, its expectation is
//!   verified and removed.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Return values`](#return-values)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Call counts`](#call-counts)
//! * [`Side effects`](#side-effects)
//! * [`Sequences`](#sequences)
//! * [`Overloads`](#overloads)
//! * [`Custom policies`](#custom-policies)
//! * [`Reporting`](#reporting)
//! * [`Crate features`](#crate-features)
//!
//! ## Getting Started
//! ```
//! use mimicry::*;
//! use mimicry::predicate::*;
//!
//! fn call_with_four(f: &dyn Fn(u32) -> u32) -> u32 {
//!     f(4)
//! }
//!
//! let mock = Mock::<fn(u32) -> u32>::new();
//! let _e = mock.expect_call()
//!     .arg::<0, _>(eq(4))
//!     .returns(42)
//!     .register();
//! assert_eq!(42, call_with_four(&|x| mock.call((x,))));
//! ```
//!
//! Arguments are always passed as a tuple, even when there is only one.
//!
//! ## Return values
//!
//! Expectations for functions that return `()` need no return value.  All
//! others must set one before they can be registered, or the code won't
//! compile.
//!
//! * [`returns`] returns a clone of a constant.
//! * [`returning`] computes the value from the arguments.
//! * [`return_once`] moves a non-`Clone` value out, exactly once.
//! * [`returning_st`] takes a closure that isn't `Send`.
//! * [`returns_arg`] returns one of the arguments.
//! * [`throws`] and [`panics`] make the call panic instead.  A [`throws`]
//!   payload keeps its type, so it can be recovered with `catch_unwind`:
//!
//! ```
//! # use mimicry::*;
//! # use std::panic;
//! #[derive(Clone, Debug, PartialEq)]
//! struct Timeout;
//!
//! let mock = Mock::<fn() -> u32>::new();
//! let _e = mock.expect_call().throws(Timeout).register();
//! let r = panic::catch_unwind(panic::AssertUnwindSafe(|| mock.call(())));
//! assert_eq!(Some(&Timeout), r.unwrap_err().downcast_ref::<Timeout>());
//! ```
//!
//! ## Matching arguments
//!
//! Argument matchers are [`predicates`].  [`arg`] constrains one argument by
//! position, [`with`] the whole tuple, and [`withf`] applies a closure.  An
//! expectation may have any number of matchers; all of them must accept a
//! call.
//!
//! ```
//! # use mimicry::*;
//! # use mimicry::predicate::*;
//! let mock = Mock::<fn(u32, String)>::new();
//! let _e = mock.expect_call()
//!     .arg::<0, _>(in_iter(1..4))
//!     .arg::<1, _>(function(|s: &String| s.starts_with("foo")))
//!     .register();
//! mock.call((2, "foobar".to_owned()));
//! ```
//!
//! When a call matches none of the active expectations the call panics,
//! listing every expectation that was considered and which of its policies
//! rejected the call.
//!
//! ## Call counts
//!
//! By default, every expectation must be called exactly once.  [`times`],
//! [`times_range`], [`at_least`], [`at_most`], [`never`] and [`times_any`]
//! change that.  Once an expectation has been called its maximum number of
//! times it is *saturated*, and later calls fall through to the next
//! expectation.
//!
//! ```
//! # use mimicry::*;
//! let mock = Mock::<fn() -> u32>::new();
//! let _e1 = mock.expect_call().times(2).returns(1).register();
//! let _e2 = mock.expect_call().times_any().returns(2).register();
//! assert_eq!(1, mock.call(()));
//! assert_eq!(1, mock.call(()));
//! assert_eq!(2, mock.call(()));
//! ```
//!
//! ## Side effects
//!
//! [`then`] and [`then_arg`] run a closure on the arguments of every call the
//! expectation handles, before the return value is produced.
//!
//! ## Sequences
//!
//! A [`Sequence`] forces expectations, possibly of different mocks, to be
//! used in order.  Each member must have an exact call count.
//!
//! ```
//! # use mimicry::*;
//! let mut seq = Sequence::new();
//! let open = Mock::<fn()>::named("open");
//! let close = Mock::<fn()>::named("close");
//! let _e1 = open.expect_call().once().in_sequence(&mut seq).register();
//! let _e2 = close.expect_call().once().in_sequence(&mut seq).register();
//! open.call(());
//! close.call(());
//! ```
//!
//! ## Overloads
//!
//! A mock has four overloads, distinguished by how it is called: through
//! `&self`, through `&mut self`, by value, or by shared value.  Each overload
//! has its own expectations, so a test can tell them apart.  The generic
//! [`Mock::expect_call_as`] and [`Mock::call_as`] reach any of them by their
//! [`Overload`] tag.
//!
//! ## Custom policies
//!
//! Anything implementing [`ExpectationPolicy`] can be added to an expectation
//! with [`and`].  Anything implementing [`FinalizePolicy`] can produce its
//! return value with [`finalize_with`].  And anything implementing
//! [`Expectation`] can be registered directly with
//! [`ScopedExpectation::new`].
//!
//! ## Reporting
//!
//! Every outcome is sent to a [`Reporter`].  Unless configured otherwise,
//! each mock uses the backend installed with [`install_reporter`], which
//! defaults to [`DefaultReporter`].  [`CapturingReporter`] records reports
//! for inspection.  A mock built with [`Settings::reporter`] uses its own.
//!
//! ## Crate features
//!
//! * `tracing` (default) - Log dispatch and teardown with `tracing`.
//!
//! [`and`]: ExpectationBuilder::and
//! [`arg`]: ExpectationBuilder::arg
//! [`at_least`]: ExpectationBuilder::at_least
//! [`at_most`]: ExpectationBuilder::at_most
//! [`finalize_with`]: ExpectationBuilder::finalize_with
//! [`never`]: ExpectationBuilder::never
//! [`panics`]: ExpectationBuilder::panics
//! [`predicates`]: predicate
//! [`register`]: ExpectationBuilder::register
//! [`return_once`]: ExpectationBuilder::return_once
//! [`returning_st`]: ExpectationBuilder::returning_st
//! [`returning`]: ExpectationBuilder::returning
//! [`returns_arg`]: ExpectationBuilder::returns_arg
//! [`returns`]: ExpectationBuilder::returns
//! [`then_arg`]: ExpectationBuilder::then_arg
//! [`then`]: ExpectationBuilder::then
//! [`throws`]: ExpectationBuilder::throws
//! [`times_any`]: ExpectationBuilder::times_any
//! [`times_range`]: ExpectationBuilder::times_range
//! [`times`]: ExpectationBuilder::times
//! [`with`]: ExpectationBuilder::with
//! [`withf`]: ExpectationBuilder::withf

mod builder;
mod call;
mod collection;
mod error;
mod expectation;
mod log;
mod mock;
pub mod policies;
mod policy;
pub mod print;
pub mod report;
mod scoped;
mod signature;
mod sync;

pub use predicates::prelude::{Predicate, PredicateBooleanExt, predicate};

pub use crate::{
    builder::ExpectationBuilder,
    call::{
        ArgsDescriber,
        Call,
        CallSource,
        ConstLvalue,
        ConstRvalue,
        Constness,
        MockId,
        MutLvalue,
        MutRvalue,
        Overload,
        ValueCategory,
    },
    collection::{ExpectationCollection, SharedExpectation},
    error::{CallError, TimesError},
    expectation::{
        BasicExpectation,
        Expectation,
        ExpectationInfo,
        MatchCategory,
        MatchResult,
    },
    mock::{InitPolicies, Mock, Settings},
    policies::*,
    policy::{ExpectationPolicy, FinalizePolicy, PolicyList, SubMatch},
    report::{
        install_reporter,
        installed_reporter,
        CallReport,
        CapturingReporter,
        DefaultReporter,
        ExpectationReport,
        MatchReport,
        Reporter,
    },
    scoped::ScopedExpectation,
    signature::{ArgAt, Signature},
};
