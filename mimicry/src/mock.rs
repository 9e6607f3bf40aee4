// vim: tw=80
//! The call-site: what a mocked function forwards its invocations to.
use std::{fmt, sync::Arc};

use crate::{
    builder::ExpectationBuilder,
    call::{
        ArgsDescriber,
        Call,
        CallSource,
        ConstLvalue,
        MockId,
        MutLvalue,
        MutRvalue,
        Overload,
        OVERLOADS,
    },
    collection::ExpectationCollection,
    error::CallError,
    expectation::ExpectationInfo,
    policies::{CategoryPolicy, ConstnessPolicy, InitFinalize},
    print::{self, DescribeArgs},
    report::{self, Reporter},
    signature::Signature,
};

/// The policies every new expectation starts with: the value category and
/// constness of the overload it was created for.
pub type InitPolicies = (((), CategoryPolicy), ConstnessPolicy);

/// Construction-time configuration of a [`Mock`].
pub struct Settings<S: Signature> {
    name: Option<String>,
    reporter: Option<Arc<dyn Reporter>>,
    describer: ArgsDescriber<S>,
}

impl<S: Signature> Settings<S> {
    /// Settings that describe every argument as `{?}`.  Works for any
    /// argument types.
    pub fn opaque() -> Self {
        Settings {
            name: None,
            reporter: None,
            describer: print::placeholders::<S>,
        }
    }

    /// Settings that describe arguments with their `Debug` representation.
    pub fn described() -> Self
        where S::Args: DescribeArgs
    {
        Self::opaque().describer(print::debug_args::<S>)
    }

    /// The name used in diagnostics.  Defaults to `mock#<id>`.
    pub fn name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Report to `reporter` instead of the installed backend.
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn describer(mut self, describer: ArgsDescriber<S>) -> Self {
        self.describer = describer;
        self
    }
}

impl<S: Signature> Default for Settings<S>
    where S::Args: DescribeArgs
{
    fn default() -> Self {
        Self::described()
    }
}

/// A mock of a single function with signature `S`.
///
/// A mock keeps one [`ExpectationCollection`] for each of its four
/// overloads, selected statically by an [`Overload`] tag.  The common ones
/// have dedicated methods:
///
/// | Receiver    | Expect with            | Call with     |
/// |-------------|------------------------|---------------|
/// | `&self`     | [`expect_call`]        | [`call`]      |
/// | `&mut self` | [`expect_call_mut`]    | [`call_mut`]  |
/// | `self`      | [`expect_call_once`]   | [`call_once`] |
///
/// Expectations registered for one overload never see calls made through
/// another.
///
/// [`expect_call`]: Self::expect_call
/// [`expect_call_mut`]: Self::expect_call_mut
/// [`expect_call_once`]: Self::expect_call_once
/// [`call`]: Self::call
/// [`call_mut`]: Self::call_mut
/// [`call_once`]: Self::call_once
///
/// # Examples
/// ```
/// # use mimicry::*;
/// let mock = Mock::<fn(u32) -> u32>::named("double");
/// let _e = mock.expect_call()
///     .times_any()
///     .returning(|(x,)| x * 2)
///     .register();
/// assert_eq!(8, mock.call((4,)));
/// ```
pub struct Mock<S: Signature> {
    id: MockId,
    name: String,
    describer: ArgsDescriber<S>,
    overloads: [Arc<ExpectationCollection<S>>; OVERLOADS],
}

impl<S: Signature> Mock<S>
    where S::Args: DescribeArgs
{
    /// A mock with default [`Settings`].
    pub fn new() -> Self {
        Self::with_settings(Settings::described())
    }

    pub fn named<N: Into<String>>(name: N) -> Self {
        Self::with_settings(Settings::described().name(name))
    }
}

impl<S: Signature> Mock<S> {
    pub fn with_settings(settings: Settings<S>) -> Self {
        let id = MockId::next();
        let name = settings.name.unwrap_or_else(|| format!("mock{id}"));
        let reporter = settings.reporter
            .unwrap_or_else(report::installed_reporter);
        let overloads = [(); OVERLOADS].map(|_| Arc::new(
            ExpectationCollection::with_reporter(reporter.clone())));
        Mock { id, name, describer: settings.describer, overloads }
    }

    pub fn id(&self) -> MockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection behind overload `O`.
    pub fn collection<O: Overload>(&self) -> &Arc<ExpectationCollection<S>> {
        &self.overloads[O::INDEX]
    }

    fn source(&self) -> CallSource<'_> {
        CallSource { id: self.id, name: &self.name }
    }

    /// Start configuring an expectation for overload `O`.
    #[track_caller]
    pub fn expect_call_as<O: Overload>(&self)
        -> ExpectationBuilder<S, InitPolicies, InitFinalize>
    {
        let policies = (((), CategoryPolicy(O::CATEGORY)),
            ConstnessPolicy(O::CONSTNESS));
        ExpectationBuilder::new(
            self.collection::<O>().clone(),
            ExpectationInfo::new(),
            policies,
            InitFinalize,
        )
    }

    /// Start configuring an expectation for calls through `&self`.
    #[track_caller]
    pub fn expect_call(&self)
        -> ExpectationBuilder<S, InitPolicies, InitFinalize>
    {
        self.expect_call_as::<ConstLvalue>()
    }

    /// Start configuring an expectation for calls through `&mut self`.
    #[track_caller]
    pub fn expect_call_mut(&self)
        -> ExpectationBuilder<S, InitPolicies, InitFinalize>
    {
        self.expect_call_as::<MutLvalue>()
    }

    /// Start configuring an expectation for calls that consume the mock.
    #[track_caller]
    pub fn expect_call_once(&self)
        -> ExpectationBuilder<S, InitPolicies, InitFinalize>
    {
        self.expect_call_as::<MutRvalue>()
    }

    /// Dispatch a call through overload `O`.
    pub fn try_call_as<O: Overload>(&self, args: S::Args)
        -> Result<S::Output, CallError>
    {
        let call = Call::<S>::new(&args, O::CATEGORY, O::CONSTNESS)
            .from_source(self.source())
            .described_by(self.describer);
        self.collection::<O>().handle_call(&call)
    }

    /// Dispatch a call through overload `O`.
    ///
    /// # Panics
    ///
    /// If no expectation accepts the call.
    #[track_caller]
    pub fn call_as<O: Overload>(&self, args: S::Args) -> S::Output {
        match self.try_call_as::<O>(args) {
            Ok(output) => output,
            Err(e) => panic!("{e}"),
        }
    }

    /// Call through `&self`.
    ///
    /// # Panics
    ///
    /// If no expectation accepts the call.
    #[track_caller]
    pub fn call(&self, args: S::Args) -> S::Output {
        self.call_as::<ConstLvalue>(args)
    }

    /// Call through `&mut self`.
    ///
    /// # Panics
    ///
    /// If no expectation accepts the call.
    #[track_caller]
    pub fn call_mut(&mut self, args: S::Args) -> S::Output {
        self.call_as::<MutLvalue>(args)
    }

    /// Call by value, consuming the mock.  Expectations registered for it
    /// stay alive with their handles.
    ///
    /// # Panics
    ///
    /// If no expectation accepts the call.
    #[track_caller]
    pub fn call_once(self, args: S::Args) -> S::Output {
        self.call_as::<MutRvalue>(args)
    }
}

impl<S: Signature> Default for Mock<S>
    where S::Args: DescribeArgs
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signature> fmt::Debug for Mock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
