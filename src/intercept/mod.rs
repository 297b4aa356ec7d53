//! Function interception: spies, stubs, and their shared call log.
//!
//! This module provides the test doubles themselves:
//!
//! - [`Spy`] - records calls and forwards to the original behavior
//! - [`Stub`] - records calls and substitutes a mock (or nothing at all)
//! - [`CallLog`] - the recording core shared by both
//!
//! # Spies
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
//! assert_eq!(table.call("method", (10, "bar")).unwrap(), "foo-10-bar");
//! assert_eq!(spy.call_count(), 1);
//! ```
//!
//! # Stubs
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
//!
//! stub.remove();
//! assert_eq!(table.call("method", (20, "qux")).unwrap(), "foo-20-qux");
//! ```

mod record;
mod spy;
mod stub;

pub use record::CallLog;
pub use spy::Spy;
pub use stub::Stub;

use crate::error::{Error, Result};
use crate::host::{Method, MethodHost};

/// Validate a host/method-name pair and capture the current callable.
///
/// Shared by the spy and stub factories: an empty name means the host was
/// supplied without saying which method to intercept, and an unknown name is
/// reported with the name included.
fn capture_original<A, R, H>(host: &H, method: &str) -> Result<Method<A, R>>
where
    H: MethodHost<A, R>,
{
    if method.is_empty() {
        return Err(Error::MethodNameMissing);
    }
    host.method(method)
        .ok_or_else(|| Error::method_not_found(method))
}
