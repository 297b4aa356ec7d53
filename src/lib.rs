//! # spykit 🕵️
//!
//! > Function spies and stubs for Rust tests
//!
//! **spykit** wraps the callables your code under test depends on, records
//! every invocation, and either keeps the real behavior running (spy) or
//! substitutes a mock for it (stub).
//!
//! ## Quick Start
//!
//! ```rust
//! use spykit::prelude::*;
//!
//! let table: MethodTable<(i32, &str), String> = MethodTable::new();
//! table.register("method", |(n, s)| format!("foo-{n}-{s}"));
//!
//! let spy = Spy::on(&table, "method").unwrap();
//!
//! // The real behavior still runs...
//! assert_eq!(table.call("method", (10, "bar")).unwrap(), "foo-10-bar");
//!
//! // ...and the spy saw it happen.
//! assert!(spy.was_called());
//! assert_eq!(spy.calls()[0], (10, "bar"));
//! ```
//!
//! ## Features
//!
//! - 🔍 **Spies** - observe calls without changing behavior
//! - 🎭 **Stubs** - replace behavior with a mock, record everything
//! - 🗂️ **Method tables** - patch and restore named methods on a host
//! - 🧾 **Call logs** - counts and arguments, in call order

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod host;
pub mod intercept;

/// Prelude for convenient imports
///
/// ```rust
/// use spykit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::host::{Method, MethodHost, MethodTable};
    pub use crate::intercept::{CallLog, Spy, Stub};
}

// Re-exports
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use crate::intercept::Spy;

    #[test]
    fn recorder_smoke() {
        let spy: Spy<(), ()> = Spy::recorder();
        spy.call(());
        assert_eq!(spy.call_count(), 1);
    }
}
