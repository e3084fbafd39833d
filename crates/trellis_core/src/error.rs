//! Core error types

use thiserror::Error;

/// Errors from typed [`Bundle`](crate::Bundle) retrieval
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// No value stored under the requested key
    #[error("no value stored under key `{key}`")]
    Missing { key: String },

    /// The stored value is of a different type than requested
    #[error("value under key `{key}` is not a `{requested}`")]
    WrongType { key: String, requested: &'static str },
}
