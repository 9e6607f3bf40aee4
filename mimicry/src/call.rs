// vim: tw=80
//! The record of a single invocation, as seen by expectations.
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{print, signature::Signature};

/// Turns an argument tuple into one description per argument.
pub type ArgsDescriber<S> = fn(&<S as Signature>::Args) -> Vec<String>;

/// Whether a call was made on an lvalue or an rvalue receiver.
///
/// In Rust terms, an lvalue call borrows the mock while an rvalue call
/// consumes it.  `Any` is only meaningful as an expectation's requirement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueCategory {
    Lvalue,
    Rvalue,
    Any,
}

impl ValueCategory {
    const fn bits(self) -> u8 {
        match self {
            ValueCategory::Lvalue => 0b01,
            ValueCategory::Rvalue => 0b10,
            ValueCategory::Any => 0b11,
        }
    }

    /// Does a call with category `actual` satisfy a requirement of `self`?
    pub const fn is_matching(self, actual: ValueCategory) -> bool {
        self.bits() & actual.bits() != 0
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueCategory::Lvalue => "lvalue",
            ValueCategory::Rvalue => "rvalue",
            ValueCategory::Any => "any",
        })
    }
}

/// Whether a call was made through a shared or an exclusive receiver.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Constness {
    NonConst,
    AsConst,
    Any,
}

impl Constness {
    const fn bits(self) -> u8 {
        match self {
            Constness::NonConst => 0b01,
            Constness::AsConst => 0b10,
            Constness::Any => 0b11,
        }
    }

    /// Does a call with qualification `actual` satisfy a requirement of
    /// `self`?
    pub const fn is_matching(self, actual: Constness) -> bool {
        self.bits() & actual.bits() != 0
    }
}

impl fmt::Display for Constness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Constness::NonConst => "mutable",
            Constness::AsConst => "const",
            Constness::Any => "any",
        })
    }
}

/// Static selector for one of the four overload variants of a mock.
///
/// The variant is chosen at compile time by the tag type, so no dispatch
/// happens at call time.
pub trait Overload: Send + Sync + 'static {
    const CATEGORY: ValueCategory;
    const CONSTNESS: Constness;
    /// Position of this variant's collection inside a mock.
    const INDEX: usize;
}

macro_rules! overload {
    ($(#[$attr:meta])* $name:ident, $cat:ident, $constness:ident, $idx:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Overload for $name {
            const CATEGORY: ValueCategory = ValueCategory::$cat;
            const CONSTNESS: Constness = Constness::$constness;
            const INDEX: usize = $idx;
        }
    };
}

overload!(
    /// A call through `&mut self`.
    MutLvalue, Lvalue, NonConst, 0);
overload!(
    /// A call through `&self`.
    ConstLvalue, Lvalue, AsConst, 1);
overload!(
    /// A call that consumes `self`.
    MutRvalue, Rvalue, NonConst, 2);
overload!(
    /// A call that consumes a shared receiver.
    ConstRvalue, Rvalue, AsConst, 3);

/// Number of overload variants every mock carries.
pub(crate) const OVERLOADS: usize = 4;

/// Opaque identity of a mock object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct MockId(usize);

impl MockId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        MockId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The id used by calls that were not issued by any mock.
    pub const fn anonymous() -> Self {
        MockId(0)
    }
}

impl fmt::Display for MockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a call came from.
#[derive(Clone, Copy, Debug)]
pub struct CallSource<'a> {
    pub id: MockId,
    pub name: &'a str,
}

impl<'a> CallSource<'a> {
    pub const fn anonymous() -> Self {
        CallSource { id: MockId::anonymous(), name: "<anonymous>" }
    }
}

/// A single invocation.
///
/// The record only borrows the arguments; nothing that inspects it may take
/// ownership of them.  It is valid for the duration of one dispatch.
pub struct Call<'a, S: Signature> {
    args: &'a S::Args,
    category: ValueCategory,
    constness: Constness,
    source: CallSource<'a>,
    describer: ArgsDescriber<S>,
}

impl<'a, S: Signature> Call<'a, S> {
    /// A call that arrived anonymously and whose arguments are described
    /// with placeholders.
    pub fn new(
        args: &'a S::Args,
        category: ValueCategory,
        constness: Constness,
    ) -> Self {
        Call {
            args,
            category,
            constness,
            source: CallSource::anonymous(),
            describer: print::placeholders::<S>,
        }
    }

    /// Attribute the call to a particular mock.
    pub fn from_source(mut self, source: CallSource<'a>) -> Self {
        self.source = source;
        self
    }

    /// Describe the arguments with `describer` in diagnostics.
    pub fn described_by(mut self, describer: ArgsDescriber<S>) -> Self {
        self.describer = describer;
        self
    }

    pub fn args(&self) -> &'a S::Args {
        self.args
    }

    pub fn category(&self) -> ValueCategory {
        self.category
    }

    pub fn constness(&self) -> Constness {
        self.constness
    }

    pub fn source(&self) -> CallSource<'a> {
        self.source
    }

    /// One description per argument, `{?}` for those that can't be printed.
    pub fn describe_args(&self) -> Vec<String> {
        (self.describer)(self.args)
    }
}
