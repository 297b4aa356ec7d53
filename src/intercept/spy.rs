// Allow must_use_candidate since spy methods often have useful side effects
#![allow(clippy::must_use_candidate)]

//! Spies: observe calls without changing behavior.
//!
//! [`Spy`] wraps a callable and records every invocation - how many times it
//! was called and with which arguments - while the wrapped behavior keeps
//! running exactly as before.
//!
//! # Example
//!
//! ```rust
//! use spykit::host::MethodTable;
//! use spykit::intercept::Spy;
//!
//! let table: MethodTable<(i32, &str), String> = MethodTable::new();
//! table.register("method", |(n, s)| format!("foo-{n}-{s}"));
//!
//! let spy = Spy::on(&table, "method").unwrap();
//!
//! let result = table.call("method", (10, "bar")).unwrap();
//! assert_eq!(result, "foo-10-bar");
//!
//! assert_eq!(spy.call_count(), 1);
//! assert_eq!(spy.calls()[0], (10, "bar"));
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::host::{Method, MethodHost};

use super::capture_original;
use super::record::CallLog;

enum Target<A, R> {
    /// Nothing to forward to; the spy only records.
    Recorder,
    /// A free callable the spy forwards to.
    Func(Method<A, R>),
    /// A host slot the spy has patched; `original` is what was there.
    Slot {
        host: Box<dyn MethodHost<A, R>>,
        name: String,
        original: Method<A, R>,
    },
}

/// A spy that records calls while preserving the original behavior.
///
/// Every invocation - whether made through a patched host slot or directly
/// via [`Spy::call`] - increments the call count and appends the call's
/// arguments to the log before the original behavior runs. The original's
/// return value (and any panic it raises) passes through unchanged.
///
/// Cloning a `Spy` shares its state: the patched slot and every handle clone
/// record into one log.
///
/// # Type Parameters
///
/// - `A` - The argument type (a tuple at multi-argument use sites; must be
///   `Clone` for recording)
/// - `R` - The return type of the spied behavior
pub struct Spy<A, R> {
    log: CallLog<A>,
    target: Arc<Target<A, R>>,
}

impl<A, R> Spy<A, R>
where
    A: Clone + Send + 'static,
    R: 'static,
{
    /// Create a standalone spy with nothing to forward to.
    ///
    /// Invoking it records the call and produces no value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::intercept::Spy;
    ///
    /// let spy: Spy<(i32, &str), ()> = Spy::recorder();
    ///
    /// assert_eq!(spy.call((10, "foo")), None);
    /// assert_eq!(spy.call_count(), 1);
    /// assert_eq!(spy.calls()[0], (10, "foo"));
    /// ```
    #[must_use]
    pub fn recorder() -> Self {
        Self {
            log: CallLog::new(),
            target: Arc::new(Target::Recorder),
        }
    }

    /// Wrap a free callable: calls are recorded, then forwarded to `f`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::intercept::Spy;
    ///
    /// let spy = Spy::wrap(|x: i32| x * 2);
    ///
    /// assert_eq!(spy.call(5), Some(10));
    /// assert!(spy.was_called());
    /// ```
    pub fn wrap<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            log: CallLog::new(),
            target: Arc::new(Target::Func(Arc::new(f))),
        }
    }

    /// Attach a spy to the method registered under `name` on `host`.
    ///
    /// The slot is replaced with an interceptor that records each call and
    /// forwards to the captured original, whose return value passes through
    /// unchanged. Calls made directly on the returned handle record into the
    /// same log and forward to the same original.
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
        let spy = Self {
            log: CallLog::new(),
            target: Arc::new(Target::Slot {
                host: Box::new(host.clone()),
                name: name.to_owned(),
                original: Arc::clone(&original),
            }),
        };

        let log = spy.log.clone();
        host.install(
            name,
            Arc::new(move |args: A| {
                log.record(args.clone());
                original(args)
            }),
        );

        Ok(spy)
    }

    /// Invoke the spy directly.
    ///
    /// The call is recorded first, then forwarded: a wrapped callable or a
    /// captured original answers with `Some(result)`, a standalone recorder
    /// with `None`. A panic raised by the forwarded callable propagates
    /// after the call has been recorded.
    pub fn call(&self, args: A) -> Option<R> {
        self.log.record(args.clone());
        match &*self.target {
            Target::Recorder => None,
            Target::Func(f) | Target::Slot { original: f, .. } => Some(f(args)),
        }
    }

    /// Restore the patched host slot to the captured original.
    ///
    /// Only meaningful for a spy attached with [`Spy::on`]; for recorder and
    /// wrapped spies this is a no-op. After removal, calls dispatched
    /// through the host reach the original without being recorded, while
    /// calls on this handle still record and forward - the handle and the
    /// slot are decoupled.
    pub fn remove(&self) {
        if let Target::Slot {
            host,
            name,
            original,
        } = &*self.target
        {
            host.install(name, Arc::clone(original));
        }
    }

    /// Clear the recorded calls; the spy's target is unaffected.
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

    /// Check if the spy was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.log.was_called()
    }

    /// Check if the spy was called exactly N times.
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

impl<A, R> Clone for Spy<A, R> {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
            target: Arc::clone(&self.target),
        }
    }
}

impl<A: Debug + Clone + Send + 'static, R: 'static> Debug for Spy<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spy")
            .field("call_count", &self.call_count())
            .field("calls", &self.calls())
            .finish()
    }
}
