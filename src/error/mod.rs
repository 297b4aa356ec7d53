//! Error definitions
//!
//! This module provides error types for spykit.

use thiserror::Error;

/// Main error type for spykit
///
/// Both variants are construction-time errors: a malformed host/method-name
/// combination is rejected when the interceptor is built, never while a call
/// is being recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A host was supplied without naming the method to intercept
    #[error("Object passed but method is missing")]
    MethodNameMissing,

    /// No method is registered on the host under the given name
    #[error("Object does not have method \"{0}\"")]
    MethodNotFound(String),
}

impl Error {
    /// Create a `MethodNotFound` error for the given method name.
    #[must_use]
    pub fn method_not_found(name: impl Into<String>) -> Self {
        Self::MethodNotFound(name.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
