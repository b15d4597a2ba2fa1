pub mod logging;

use std::sync::{Mutex, MutexGuard};

/// Lock a std mutex, recovering the guard if a previous holder panicked.
pub(crate) fn lock_or_recover<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
