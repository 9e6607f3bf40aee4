// vim: tw=80
//! Textual descriptions of argument values for diagnostics.
use std::fmt::Debug;

use crate::signature::Signature;

/// Stand-in for a value that has no textual representation.
pub const PLACEHOLDER: &str = "{?}";

/// Describes every element of an argument tuple.
pub trait DescribeArgs {
    fn describe_args(&self) -> Vec<String>;
}

impl DescribeArgs for () {
    fn describe_args(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! describe_args {
    ($($arg:ident . $idx:tt),+) => {
        impl<$($arg: Debug),+> DescribeArgs for ($($arg,)+) {
            fn describe_args(&self) -> Vec<String> {
                vec![$(format!("{:?}", self.$idx)),+]
            }
        }
    };
}

describe_args!(A0.0);
describe_args!(A0.0, A1.1);
describe_args!(A0.0, A1.1, A2.2);
describe_args!(A0.0, A1.1, A2.2, A3.3);
describe_args!(A0.0, A1.1, A2.2, A3.3, A4.4);
describe_args!(A0.0, A1.1, A2.2, A3.3, A4.4, A5.5);

/// Describe arguments with their `Debug` representation.
pub fn debug_args<S>(args: &S::Args) -> Vec<String>
    where S: Signature, S::Args: DescribeArgs
{
    args.describe_args()
}

/// Describe every argument with [`PLACEHOLDER`].
pub fn placeholders<S: Signature>(_args: &S::Args) -> Vec<String> {
    vec![PLACEHOLDER.to_owned(); S::ARITY]
}

/// Describe a single value of a concrete type, falling back to
/// [`PLACEHOLDER`] when the type does not implement `Debug`.
///
/// # Examples
/// ```
/// # use mimicry::describe;
/// struct Opaque;
/// assert_eq!("42", describe!(42u32));
/// assert_eq!("{?}", describe!(Opaque));
/// ```
#[macro_export]
macro_rules! describe {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::print::{NoDescribe as _, ProperDescribe as _};
        (&$value)
            .mimicry_describe()
            .unwrap_or_else(|| $crate::print::PLACEHOLDER.to_owned())
    }};
}

#[doc(hidden)]
pub trait ProperDescribe {
    fn mimicry_describe(&self) -> Option<String>;
}

impl<T: Debug> ProperDescribe for T {
    fn mimicry_describe(&self) -> Option<String> {
        Some(format!("{self:?}"))
    }
}

#[doc(hidden)]
pub trait NoDescribe {
    fn mimicry_describe(&self) -> Option<String>;
}

impl<T> NoDescribe for &T {
    fn mimicry_describe(&self) -> Option<String> {
        None
    }
}
