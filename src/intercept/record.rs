// Allow must_use_candidate since log accessors are often asserted through
// intermediate bindings
#![allow(clippy::must_use_candidate)]

//! The call-recording core shared by spies and stubs.

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// An append-only record of invocations: a call counter plus the arguments
/// of every call, in call order.
///
/// `CallLog` is the recording core behind [`Spy`](super::Spy) and
/// [`Stub`](super::Stub); it can also be driven directly when a test just
/// needs to count calls it makes itself.
///
/// The counter and the log move together: entry *i* holds the arguments of
/// the *(i+1)*-th call, and `count() == calls().len()` holds, also under
/// concurrent recording. Entries are never mutated once appended; accessors
/// hand out clones.
///
/// Cloning a `CallLog` shares its state: every clone records into, and reads
/// from, the same log.
///
/// # Example
///
/// ```rust
/// use spykit::intercept::CallLog;
///
/// let log = CallLog::new();
/// log.record((10, "foo"));
/// log.record((20, "bar"));
///
/// assert_eq!(log.count(), 2);
/// assert_eq!(log.calls(), vec![(10, "foo"), (20, "bar")]);
/// ```
pub struct CallLog<A> {
    inner: Arc<LogInner<A>>,
}

struct LogInner<A> {
    count: AtomicUsize,
    args: Mutex<Vec<A>>,
}

impl<A: Clone> CallLog<A> {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LogInner {
                count: AtomicUsize::new(0),
                args: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Record one call with the given arguments.
    pub fn record(&self, args: A) {
        let mut log = self.inner.args.lock();
        log.push(args);
        // The counter only advances while the log guard is held.
        self.inner.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Arguments of every recorded call, in call order.
    pub fn calls(&self) -> Vec<A> {
        self.inner.args.lock().clone()
    }

    /// Arguments of the Nth recorded call (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<A> {
        self.inner.args.lock().get(n).cloned()
    }

    /// Arguments of the most recent recorded call.
    pub fn last_call(&self) -> Option<A> {
        self.inner.args.lock().last().cloned()
    }

    /// Check if at least one call was recorded.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.count() > 0
    }

    /// Check if exactly N calls were recorded.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.count() == n
    }

    /// Check if any recorded call used the given arguments.
    pub fn was_called_with(&self, expected: &A) -> bool
    where
        A: PartialEq,
    {
        self.inner.args.lock().iter().any(|a| a == expected)
    }

    /// Clear the counter and the log in place.
    pub fn reset(&self) {
        let mut log = self.inner.args.lock();
        log.clear();
        self.inner.count.store(0, Ordering::SeqCst);
    }
}

impl<A: Clone> Default for CallLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for CallLog<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Debug> Debug for CallLog<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLog")
            .field("count", &self.inner.count.load(Ordering::SeqCst))
            .field("calls", &*self.inner.args.lock())
            .finish()
    }
}
