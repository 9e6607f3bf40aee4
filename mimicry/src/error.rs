// vim: tw=80
use std::fmt;

use thiserror::Error;

use crate::report::{CallReport, MatchReport};

/// Why a call could not be dispatched to any expectation.
#[derive(Clone, Debug, Error)]
pub enum CallError {
    /// Every non-saturated expectation rejected the call outright.
    #[error("{call}: No matching expectation found{}", Listed(.rejected))]
    NoMatch {
        call: CallReport,
        rejected: Vec<MatchReport>,
    },
    /// Some expectations accepted parts of the call, but none all of it.
    #[error("{call}: No applicable expectation found{}{}", Listed(.partial),
        Listed(.rejected))]
    Inapplicable {
        call: CallReport,
        /// The partially matching expectations.
        partial: Vec<MatchReport>,
        /// The expectations that rejected the call outright.
        rejected: Vec<MatchReport>,
    },
}

impl CallError {
    pub fn call(&self) -> &CallReport {
        match self {
            CallError::NoMatch { call, .. } => call,
            CallError::Inapplicable { call, .. } => call,
        }
    }
}

/// An invalid call-count configuration.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TimesError {
    #[error("Invalid call count: min {min} exceeds max {max}")]
    InvertedRange { min: usize, max: usize },
    #[error("Invalid call count: the range is empty")]
    EmptyRange,
}

/// Lists match reports one per line.
struct Listed<'a>(&'a [MatchReport]);

impl fmt::Display for Listed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in self.0 {
            write!(f, "\n{report}")?;
        }
        Ok(())
    }
}
