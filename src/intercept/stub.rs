// Allow must_use_candidate since stub methods often have useful side effects
#![allow(clippy::must_use_candidate)]

//! Stubs: replace behavior, record calls.
//!
//! [`Stub`] records invocations exactly like a [`Spy`](super::Spy) but never
//! forwards to the behavior it displaced: a supplied mock answers the call
//! instead, or nothing runs at all. The displaced original is captured only
//! so [`Stub::remove`] can put it back.
//!
//! # Example
//!
//! ```rust
//! use spykit::host::MethodTable;
//! use spykit::intercept::Stub;
//!
//! let table: MethodTable<(i32, &str), String> = MethodTable::new();
//! table.register("method", |(n, s)| format!("foo-{n}-{s}"));
//!
//! let stub = Stub::on_with(&table, "method", |(n, s)| {
//!     format!("MOCK:{n} @@ {s}")
//! })
//! .unwrap();
//!
//! assert_eq!(table.call("method", (10, "bar")).unwrap(), "MOCK:10 @@ bar");
//! assert_eq!(stub.call_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::host::{Method, MethodHost};

use super::capture_original;
use super::record::CallLog;

/// A host slot a stub has displaced; kept only for restoration.
struct SlotBinding<A, R> {
    host: Box<dyn MethodHost<A, R>>,
    name: String,
    original: Method<A, R>,
}

/// A stub that records calls while substituting behavior.
///
/// Every invocation increments the call count and appends the call's
/// arguments to the log before the mock (if any) runs. The displaced
/// original is never invoked by the stub; it is only held so
/// [`Stub::remove`] can restore it.
///
/// Cloning a `Stub` shares its state: the patched slot and every handle
/// clone record into one log.
///
/// # Type Parameters
///
/// - `A` - The argument type (a tuple at multi-argument use sites; must be
///   `Clone` for recording)
/// - `R` - The return type of the displaced behavior and of the mock
pub struct Stub<A, R> {
    log: CallLog<A>,
    mock: Option<Method<A, R>>,
    slot: Option<Arc<SlotBinding<A, R>>>,
}

impl<A, R> Stub<A, R>
where
    A: Clone + Send + 'static,
    R: 'static,
{
    /// Create a standalone stub with no mock.
    ///
    /// Invoking it records the call; nothing runs and no value is produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::intercept::Stub;
    ///
    /// let stub: Stub<(i32, &str), ()> = Stub::recorder();
    ///
    /// assert_eq!(stub.call((10, "foo")), None);
    /// assert_eq!(stub.call_count(), 1);
    /// ```
    #[must_use]
    pub fn recorder() -> Self {
        Self {
            log: CallLog::new(),
            mock: None,
            slot: None,
        }
    }

    /// Create a standalone stub that answers every call with `mock`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::intercept::Stub;
    ///
    /// let stub = Stub::new(|(n, s): (i32, &str)| format!("foo-{n}-{s}"));
    ///
    /// assert_eq!(stub.call((10, "bar")), Some("foo-10-bar".to_string()));
    /// assert_eq!(stub.calls()[0], (10, "bar"));
    /// ```
    pub fn new<F>(mock: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            log: CallLog::new(),
            mock: Some(Arc::new(mock)),
            slot: None,
        }
    }

    /// Replace the method registered under `name` on `host` with `mock`.
    ///
    /// The slot is replaced with an interceptor that records each call and
    /// answers it with `mock`. The displaced original is captured for
    /// restoration only and is never invoked by the stub.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MethodNameMissing`](crate::error::Error::MethodNameMissing)
    /// if `name` is empty, and
    /// [`Error::MethodNotFound`](crate::error::Error::MethodNotFound) if
    /// nothing is registered under `name`.
    pub fn on_with<H, F>(host: &H, name: &str, mock: F) -> Result<Self>
    where
        H: MethodHost<A, R> + Clone + 'static,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let original = capture_original(host, name)?;
        let mock: Method<A, R> = Arc::new(mock);
        let stub = Self {
            log: CallLog::new(),
            mock: Some(Arc::clone(&mock)),
            slot: Some(Arc::new(SlotBinding {
                host: Box::new(host.clone()),
                name: name.to_owned(),
                original,
            })),
        };

        let log = stub.log.clone();
        host.install(
            name,
            Arc::new(move |args: A| {
                log.record(args.clone());
                mock(args)
            }),
        );

        Ok(stub)
    }

    /// Invoke the stub directly.
    ///
    /// The call is recorded first; the mock (if any) then answers it with
    /// `Some(result)`, otherwise the call produces `None`. The displaced
    /// original never runs. A panic raised by the mock propagates after the
    /// call has been recorded.
    pub fn call(&self, args: A) -> Option<R> {
        self.log.record(args.clone());
        self.mock.as_ref().map(|mock| mock(args))
    }

    /// Restore the patched host slot to the captured original.
    ///
    /// Only meaningful for a stub attached with [`Stub::on`] or
    /// [`Stub::on_with`]; for standalone stubs this is a no-op. After
    /// removal, calls dispatched through the host reach the original without
    /// being recorded, while calls on this handle still record and still go
    /// to the mock - the handle and the slot are decoupled.
    pub fn remove(&self) {
        if let Some(slot) = &self.slot {
            slot.host.install(&slot.name, Arc::clone(&slot.original));
        }
    }

    /// Clear the recorded calls; the stub's mock and binding are unaffected.
    pub fn reset(&self) {
        self.log.reset();
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.log.count()
    }

    /// Arguments of every recorded call, in call order.
    pub fn calls(&self) -> Vec<A> {
        self.log.calls()
    }

    /// Arguments of the Nth recorded call (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<A> {
        self.log.nth_call(n)
    }

    /// Arguments of the most recent recorded call.
    pub fn last_call(&self) -> Option<A> {
        self.log.last_call()
    }

    /// Check if the stub was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.log.was_called()
    }

    /// Check if the stub was called exactly N times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.log.was_called_times(n)
    }

    /// Check if any recorded call used the given arguments.
    pub fn was_called_with(&self, expected: &A) -> bool
    where
        A: PartialEq,
    {
        self.log.was_called_with(expected)
    }
}

impl<A, R> Stub<A, R>
where
    A: Clone + Send + 'static,
    R: Default + 'static,
{
    /// Replace the method registered under `name` on `host` with nothing.
    ///
    /// Calls through the host are recorded and answered with `R::default()`;
    /// no behavior runs. Calls on the handle itself produce `None`, as there
    /// is no mock. The displaced original is captured for restoration only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MethodNameMissing`](crate::error::Error::MethodNameMissing)
    /// if `name` is empty, and
    /// [`Error::MethodNotFound`](crate::error::Error::MethodNotFound) if
    /// nothing is registered under `name`.
    pub fn on<H>(host: &H, name: &str) -> Result<Self>
    where
        H: MethodHost<A, R> + Clone + 'static,
    {
        let original = capture_original(host, name)?;
        let stub = Self {
            log: CallLog::new(),
            mock: None,
            slot: Some(Arc::new(SlotBinding {
                host: Box::new(host.clone()),
                name: name.to_owned(),
                original,
            })),
        };

        let log = stub.log.clone();
        host.install(
            name,
            Arc::new(move |args: A| {
                log.record(args);
                R::default()
            }),
        );

        Ok(stub)
    }
}

impl<A, R> Clone for Stub<A, R> {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
            mock: self.mock.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<A: Debug + Clone + Send + 'static, R: 'static> Debug for Stub<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stub")
            .field("call_count", &self.call_count())
            .field("calls", &self.calls())
            .field("has_mock", &self.mock.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::error::Error;
    use crate::host::MethodTable;

    fn greeting_table() -> MethodTable<(i32, &'static str), String> {
        let table = MethodTable::new();
        table.register("method", |(n, s)| format!("foo-{n}-{s}"));
        table
    }

    #[test]
    fn test_recorder_records_and_answers_nothing() {
        let stub: Stub<(i32, &str), ()> = Stub::recorder();

        assert_eq!(stub.call((10, "foo")), None);
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.calls()[0], (10, "foo"));
    }

    #[test]
    fn test_mock_answers_call() {
        let stub = Stub::new(|(n, s): (i32, &str)| format!("foo-{n}-{s}"));

        assert_eq!(stub.call((10, "bar")), Some("foo-10-bar".to_string()));
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.calls()[0], (10, "bar"));
    }

    #[test]
    fn test_on_with_replaces_method() {
        let table = greeting_table();
        let stub = Stub::on_with(&table, "method", |(n, s)| format!("MOCK:{n} @@ {s}")).unwrap();

        let result = table.call("method", (10, "bar")).unwrap();
        assert_eq!(result, "MOCK:10 @@ bar");
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.calls()[0], (10, "bar"));
    }

    #[test]
    fn test_on_with_never_runs_original() {
        let ran = Arc::new(AtomicBool::new(false));
        let table: MethodTable<(), &'static str> = MethodTable::new();
        let flag = Arc::clone(&ran);
        table.register("method", move |()| {
            flag.store(true, Ordering::SeqCst);
            "real"
        });

        let stub = Stub::on_with(&table, "method", |()| "mock").unwrap();

        assert_eq!(table.call("method", ()).unwrap(), "mock");
        assert_eq!(stub.call(()), Some("mock"));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_on_answers_default() {
        let table = greeting_table();
        let stub = Stub::on(&table, "method").unwrap();

        let result = table.call("method", (10, "bar")).unwrap();
        assert_eq!(result, String::new());
        assert_eq!(stub.call_count(), 1);

        // The handle itself has no mock to answer with.
        assert_eq!(stub.call((20, "qux")), None);
        assert_eq!(stub.call_count(), 2);
    }

    #[test]
    fn test_on_with_missing_method_errors() {
        let table: MethodTable<(), ()> = MethodTable::new();

        let err = Stub::on_with(&table, "prop", |()| ()).unwrap_err();
        assert_eq!(err, Error::MethodNotFound("prop".to_string()));
    }

    #[test]
    fn test_on_with_empty_name_errors() {
        let table: MethodTable<(), ()> = MethodTable::new();

        let err = Stub::on_with(&table, "", |()| ()).unwrap_err();
        assert_eq!(err, Error::MethodNameMissing);
    }

    #[test]
    fn test_remove_restores_original() {
        let table = greeting_table();
        let stub = Stub::on_with(&table, "method", |(n, s)| format!("MOCK:{n} @@ {s}")).unwrap();

        table.call("method", (10, "bar")).unwrap();
        stub.remove();

        let result = table.call("method", (20, "qux")).unwrap();
        assert_eq!(result, "foo-20-qux");
        assert_eq!(stub.call_count(), 1);
        assert!(stub.nth_call(1).is_none());
    }

    #[test]
    fn test_removed_handle_still_records() {
        let table = greeting_table();
        let stub = Stub::on_with(&table, "method", |(n, s)| format!("MOCK:{n} @@ {s}")).unwrap();
        stub.remove();

        assert_eq!(stub.call((30, "zap")), Some("MOCK:30 @@ zap".to_string()));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_reset_keeps_mock() {
        let stub = Stub::new(|x: i32| x + 1);

        stub.call(1);
        stub.reset();

        assert_eq!(stub.call_count(), 0);
        assert!(stub.calls().is_empty());
        assert_eq!(stub.call(2), Some(3));
    }

    #[test]
    fn test_clone_shares_state() {
        let stub = Stub::new(|x: i32| x);
        let alias = stub.clone();

        stub.call(1);
        alias.call(2);

        assert_eq!(stub.call_count(), 2);
        assert_eq!(alias.calls(), vec![1, 2]);
    }

    #[test]
    fn test_debug() {
        let stub = Stub::new(|x: i32| x);
        stub.call(42);

        let debug = format!("{stub:?}");
        assert!(debug.contains("Stub"));
        assert!(debug.contains("has_mock"));
    }
}
