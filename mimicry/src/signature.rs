// vim: tw=80
//! Function signatures that a [`Mock`](crate::Mock) can stand in for.
//!
//! A signature is named by its function pointer type, e.g.
//! `fn(u32, String) -> bool`.  The argument list becomes a tuple, which is
//! what every policy, matcher and finalizer sees.

/// Compile-time description of a mocked function.
///
/// Implemented for function pointer types of up to six arguments.  Argument
/// and return types must be `'static`; pass owned values (or `&'static`
/// references) to a mock.
pub trait Signature: 'static {
    /// The arguments, as a tuple.  A nullary signature has `()`.
    type Args: 'static;
    /// The return type.
    type Output: 'static;
    /// Number of arguments.
    const ARITY: usize;
}

macro_rules! signature {
    ($arity:expr; $($arg:ident),*) => {
        impl<R: 'static, $($arg: 'static),*> Signature for fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;
            const ARITY: usize = $arity;
        }
    };
}

signature!(0;);
signature!(1; A0);
signature!(2; A0, A1);
signature!(3; A0, A1, A2);
signature!(4; A0, A1, A2, A3);
signature!(5; A0, A1, A2, A3, A4);
signature!(6; A0, A1, A2, A3, A4, A5);

/// Positional access to the `N`th element of an argument tuple.
pub trait ArgAt<const N: usize> {
    /// Type of the `N`th argument.
    type Arg;

    fn arg_at(&self) -> &Self::Arg;
}

macro_rules! arg_at {
    ($idx:tt => $sel:ident in ($($all:ident),+)) => {
        impl<$($all),+> ArgAt<$idx> for ($($all,)+) {
            type Arg = $sel;

            fn arg_at(&self) -> &$sel {
                &self.$idx
            }
        }
    };
}

arg_at!(0 => A0 in (A0));
arg_at!(0 => A0 in (A0, A1));
arg_at!(1 => A1 in (A0, A1));
arg_at!(0 => A0 in (A0, A1, A2));
arg_at!(1 => A1 in (A0, A1, A2));
arg_at!(2 => A2 in (A0, A1, A2));
arg_at!(0 => A0 in (A0, A1, A2, A3));
arg_at!(1 => A1 in (A0, A1, A2, A3));
arg_at!(2 => A2 in (A0, A1, A2, A3));
arg_at!(3 => A3 in (A0, A1, A2, A3));
arg_at!(0 => A0 in (A0, A1, A2, A3, A4));
arg_at!(1 => A1 in (A0, A1, A2, A3, A4));
arg_at!(2 => A2 in (A0, A1, A2, A3, A4));
arg_at!(3 => A3 in (A0, A1, A2, A3, A4));
arg_at!(4 => A4 in (A0, A1, A2, A3, A4));
arg_at!(0 => A0 in (A0, A1, A2, A3, A4, A5));
arg_at!(1 => A1 in (A0, A1, A2, A3, A4, A5));
arg_at!(2 => A2 in (A0, A1, A2, A3, A4, A5));
arg_at!(3 => A3 in (A0, A1, A2, A3, A4, A5));
arg_at!(4 => A4 in (A0, A1, A2, A3, A4, A5));
arg_at!(5 => A5 in (A0, A1, A2, A3, A4, A5));
