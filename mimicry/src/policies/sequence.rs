// vim: tw=80
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{
    call::Call,
    policy::{ExpectationPolicy, SubMatch},
    signature::Signature,
};

#[derive(Debug, Default)]
struct SeqInner {
    /// Number of leading sequence entries that are fully satisfied.
    satisfaction_level: AtomicUsize,
}

impl SeqInner {
    fn level(&self) -> usize {
        self.satisfaction_level.load(Ordering::Relaxed)
    }

    /// Record the entry `seq` as fully satisfied.
    fn satisfy(&self, seq: usize) {
        let old = self.satisfaction_level.fetch_add(1, Ordering::Relaxed);
        debug_assert_eq!(old, seq, "Method sequence violation");
    }
}

/// Used to enforce that mock calls must happen in the order specified.
///
/// Each expectation in a sequence must expect to be called a fixed number of
/// times.  Once it has been called that often, the next expectation in the
/// sequence becomes eligible.  An expectation rejects calls until its turn
/// comes, and is saturated once its turn has passed.  Sequences may span
/// several mocks.
///
/// # Examples
/// ```
/// # use mimicry::*;
/// let mut seq = Sequence::new();
/// let a = Mock::<fn()>::named("a");
/// let b = Mock::<fn()>::named("b");
/// let _ea = a.expect_call().once().in_sequence(&mut seq).register();
/// let _eb = b.expect_call().once().in_sequence(&mut seq).register();
/// a.call(());
/// b.call(());
/// ```
#[derive(Debug, Default)]
pub struct Sequence {
    inner: Arc<SeqInner>,
    next_seq: usize,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry that must be called exactly `calls` times.
    #[track_caller]
    pub fn next(&mut self, calls: usize) -> InSequence {
        let mut handle = self.reserve();
        handle.expect_calls(calls);
        handle
    }

    /// Claim the next position, leaving its call count to be set later.
    pub(crate) fn reserve(&mut self) -> InSequence {
        let handle = InSequence {
            inner: self.inner.clone(),
            seq: self.next_seq,
            calls: 0,
            seen: 0,
        };
        self.next_seq += 1;
        handle
    }
}

/// The policy binding one expectation to its place in a [`Sequence`].
#[derive(Debug)]
pub struct InSequence {
    inner: Arc<SeqInner>,
    seq: usize,
    calls: usize,
    seen: usize,
}

impl InSequence {
    /// Position in the sequence, counting from 0.
    pub fn position(&self) -> usize {
        self.seq
    }

    #[track_caller]
    pub(crate) fn expect_calls(&mut self, calls: usize) {
        assert!(calls > 0, "A sequence entry must expect at least one call");
        self.calls = calls;
    }

    fn is_done(&self) -> bool {
        self.inner.level() > self.seq
    }
}

impl<S: Signature> ExpectationPolicy<S> for InSequence {
    fn is_satisfied(&self) -> bool {
        self.is_done()
    }

    fn is_saturated(&self) -> bool {
        self.is_done()
    }

    fn matches(&self, _call: &Call<'_, S>) -> SubMatch {
        let level = self.inner.level();
        if level == self.seq {
            SubMatch::Matched(format!("is #{} in sequence", self.seq))
        } else {
            SubMatch::Mismatched(format!(
                "is #{} in sequence, but the sequence is at #{}",
                self.seq, level))
        }
    }

    fn consume(&mut self, _call: &Call<'_, S>) {
        self.seen += 1;
        if self.seen == self.calls {
            self.inner.satisfy(self.seq);
        }
    }

    fn describe_state(&self) -> Option<String> {
        if self.is_done() {
            None
        } else {
            Some(format!("#{} in sequence is still pending", self.seq))
        }
    }
}
