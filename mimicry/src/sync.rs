// vim: tw=80
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `m`, ignoring poison.
///
/// A finalizer may panic while the lock is held; that is how a mocked
/// function "throws".  The protected state is still consistent then.
pub(crate) fn lock<T: ?Sized>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
