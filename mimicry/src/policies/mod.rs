// vim: tw=80
//! The built-in policy library.
mod argument;
mod finalize;
mod overload;
mod sequence;
mod side_effect;
mod times;

pub use self::{
    argument::{ArgMatcher, ArgsFnMatcher, ArgsMatcher},
    finalize::{
        InitFinalize,
        Panics,
        ReturnOnce,
        Returns,
        ReturnsArg,
        ReturnsSt,
        ReturnsWith,
        Throws,
    },
    overload::{CategoryPolicy, ConstnessPolicy},
    sequence::{InSequence, Sequence},
    side_effect::{ArgSideEffect, SideEffect},
    times::Times,
};
