// Allow must_use_candidate since table lookups are often driven for their
// side effects in test setup
#![allow(clippy::must_use_candidate)]

//! Host objects with patchable named methods.
//!
//! Spies and stubs intercept "a named method on a host object". Here that
//! host is modeled explicitly: [`MethodHost`] is the capability to read and
//! replace the callable stored under a name, and [`MethodTable`] is the
//! stock implementation a test constructs around the callables it wants to
//! intercept.
//!
//! # Example
//!
//! ```rust
//! use spykit::host::MethodTable;
//!
//! let table: MethodTable<(i32, &str), String> = MethodTable::new();
//! table.register("method", |(n, s)| format!("foo-{n}-{s}"));
//!
//! assert_eq!(table.call("method", (10, "bar")).unwrap(), "foo-10-bar");
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};

/// A named callable as stored on a host: shared, thread-safe, invocable.
pub type Method<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// Capability to read and replace the callable stored under a method name.
///
/// Spies and stubs only need these two operations to patch a slot and later
/// restore it; implement the trait for your own fixture types when a
/// [`MethodTable`] is not the right shape.
pub trait MethodHost<A, R>: Send + Sync {
    /// Get the callable currently stored under `name`, if any.
    fn method(&self, name: &str) -> Option<Method<A, R>>;

    /// Replace the callable stored under `name`.
    fn install(&self, name: &str, method: Method<A, R>);
}

/// A registry of named callables sharing one argument and return type.
///
/// Cloning a `MethodTable` is cheap and shares the underlying slots, so a
/// table handed to a spy or stub observes the same state as the original.
/// Each name holds exactly one current callable; [`MethodTable::register`]
/// and [`MethodHost::install`] replace it atomically under the table lock.
pub struct MethodTable<A, R> {
    methods: Arc<Mutex<HashMap<String, Method<A, R>>>>,
}

impl<A, R> MethodTable<A, R> {
    /// Create an empty table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::host::MethodTable;
    ///
    /// let table: MethodTable<i32, i32> = MethodTable::new();
    /// assert!(table.names().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register `f` under `name`, replacing any previous registration.
    pub fn register<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        self.methods.lock().insert(name.into(), Arc::new(f));
    }

    /// Whether a callable is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.lock().contains_key(name)
    }

    /// Names of all registered methods, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.methods.lock().keys().cloned().collect()
    }

    /// Invoke the callable registered under `name`.
    ///
    /// The callable runs outside the table lock, so a method is free to call
    /// back into the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MethodNotFound`] if nothing is registered under
    /// `name`.
    pub fn call(&self, name: &str, args: A) -> Result<R> {
        let method = self
            .method(name)
            .ok_or_else(|| Error::method_not_found(name))?;
        Ok(method(args))
    }
}

impl<A, R> MethodHost<A, R> for MethodTable<A, R> {
    fn method(&self, name: &str) -> Option<Method<A, R>> {
        self.methods.lock().get(name).map(Arc::clone)
    }

    fn install(&self, name: &str, method: Method<A, R>) {
        self.methods.lock().insert(name.to_owned(), method);
    }
}

impl<A, R> Default for MethodTable<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Clone for MethodTable<A, R> {
    fn clone(&self) -> Self {
        Self {
            methods: Arc::clone(&self.methods),
        }
    }
}

impl<A, R> Debug for MethodTable<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.names();
        names.sort();
        f.debug_struct("MethodTable")
            .field("methods", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_dispatches_by_name() {
        let table: MethodTable<i32, i32> = MethodTable::new();
        table.register("double", |x| x * 2);
        table.register("negate", |x| -x);

        assert_eq!(table.call("double", 21).unwrap(), 42);
        assert_eq!(table.call("negate", 21).unwrap(), -21);
    }

    #[test]
    fn test_call_unknown_name_errors() {
        let table: MethodTable<i32, i32> = MethodTable::new();

        let err = table.call("prop", 1).unwrap_err();
        assert_eq!(err, Error::MethodNotFound("prop".to_string()));
        assert_eq!(err.to_string(), "Object does not have method \"prop\"");
    }

    #[test]
    fn test_register_replaces_previous() {
        let table: MethodTable<i32, i32> = MethodTable::new();
        table.register("method", |x| x);
        table.register("method", |x| x + 1);

        assert_eq!(table.call("method", 1).unwrap(), 2);
    }

    #[test]
    fn test_install_replaces_slot() {
        let table: MethodTable<i32, i32> = MethodTable::new();
        table.register("method", |x| x);

        let original = table.method("method").unwrap();
        table.install("method", Arc::new(|x| x * 10));
        assert_eq!(table.call("method", 3).unwrap(), 30);

        table.install("method", original);
        assert_eq!(table.call("method", 3).unwrap(), 3);
    }

    #[test]
    fn test_clones_share_slots() {
        let table: MethodTable<(), &'static str> = MethodTable::new();
        let alias = table.clone();

        table.register("greet", |()| "hello");

        assert!(alias.contains("greet"));
        assert_eq!(alias.call("greet", ()).unwrap(), "hello");
    }

    #[test]
    fn test_debug_lists_names() {
        let table: MethodTable<(), ()> = MethodTable::new();
        table.register("b", |()| ());
        table.register("a", |()| ());

        let debug = format!("{table:?}");
        assert!(debug.contains("MethodTable"));
        assert!(debug.contains("\"a\""));
        assert!(debug.contains("\"b\""));
    }
}
