// vim: tw=80
use std::{
    fmt,
    ops::{Bound, RangeBounds},
};

use crate::{
    call::Call,
    error::TimesError,
    policy::{ExpectationPolicy, SubMatch},
    signature::Signature,
};

/// Pretty-printed call count.
pub(crate) struct NCalls(pub usize);

impl fmt::Display for NCalls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "no calls"),
            1 => write!(f, "1 call"),
            n => write!(f, "{n} calls"),
        }
    }
}

/// How many times an expectation may be called.
///
/// Satisfied once it has seen at least `min` calls and saturated once it has
/// seen `max`.  Both bounds are inclusive.  A freshly created expectation
/// must be called exactly once, unless configured otherwise.
///
/// # Examples
/// ```
/// # use mimicry::Times;
/// let t = Times::try_new(2, 4).unwrap();
/// assert_eq!(2, t.min());
/// assert_eq!(4, t.max());
/// assert!(Times::try_new(3, 1).is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Times {
    /// Calls consumed so far.
    count: usize,
    min: usize,
    max: usize,
}

impl Times {
    /// Between `min` and `max` calls, inclusive.
    pub fn try_new(min: usize, max: usize) -> Result<Self, TimesError> {
        if min > max {
            return Err(TimesError::InvertedRange { min, max });
        }
        Ok(Times { count: 0, min, max })
    }

    /// Like [`Times::try_new`], but accepts any range expression.
    pub fn try_range<R>(range: R) -> Result<Self, TimesError>
        where R: RangeBounds<usize>
    {
        let min = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_add(1)
                .ok_or(TimesError::EmptyRange)?,
            Bound::Unbounded => 0,
        };
        let max = match range.end_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_sub(1)
                .ok_or(TimesError::EmptyRange)?,
            Bound::Unbounded => usize::MAX,
        };
        Self::try_new(min, max)
    }

    /// Like [`Times::try_range`], but panics on an invalid range.
    #[track_caller]
    pub fn range<R: RangeBounds<usize>>(range: R) -> Self {
        match Self::try_range(range) {
            Ok(times) => times,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn exactly(n: usize) -> Self {
        Times { count: 0, min: n, max: n }
    }

    pub fn at_least(n: usize) -> Self {
        Times { count: 0, min: n, max: usize::MAX }
    }

    pub fn at_most(n: usize) -> Self {
        Times { count: 0, min: 0, max: n }
    }

    pub fn once() -> Self {
        Self::exactly(1)
    }

    pub fn twice() -> Self {
        Self::exactly(2)
    }

    /// Forbid any call.
    pub fn never() -> Self {
        Self::exactly(0)
    }

    /// Allow any number of calls, including none.
    pub fn any() -> Self {
        Self::at_least(0)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// How many calls have been consumed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Is it required that this expectation be called an exact number of
    /// times, or may it be satisfied by a range of call counts?
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    pub fn is_satisfied(&self) -> bool {
        self.count >= self.min
    }

    pub fn is_saturated(&self) -> bool {
        self.count >= self.max
    }

    pub fn consume(&mut self) {
        // Dispatch never consumes a saturated expectation.
        debug_assert!(!self.is_saturated(), "consumed a saturated Times");
        self.count = self.count.saturating_add(1);
    }
}

impl Default for Times {
    fn default() -> Self {
        Times::once()
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (min, max) if min == max => write!(f, "exactly {}", NCalls(min)),
            (0, usize::MAX) => write!(f, "any number of calls"),
            (min, usize::MAX) => write!(f, "at least {}", NCalls(min)),
            (0, max) => write!(f, "at most {}", NCalls(max)),
            (min, max) => write!(f, "between {min} and {}", NCalls(max)),
        }
    }
}

impl<S: Signature> ExpectationPolicy<S> for Times {
    fn is_satisfied(&self) -> bool {
        Times::is_satisfied(self)
    }

    fn is_saturated(&self) -> bool {
        Times::is_saturated(self)
    }

    fn matches(&self, _call: &Call<'_, S>) -> SubMatch {
        SubMatch::Vacuous
    }

    fn consume(&mut self, _call: &Call<'_, S>) {
        Times::consume(self)
    }

    fn describe_state(&self) -> Option<String> {
        let state = if self.is_saturated() {
            "saturated"
        } else if self.is_satisfied() {
            "satisfied"
        } else {
            "unsatisfied"
        };
        Some(format!("expected {self}, but got {} ({state})",
            NCalls(self.count)))
    }
}
