//! Error types for factory operations.

use thiserror::Error;

/// Errors that can occur while defining factories or generating records.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// A factory declared an attribute whose name is reserved.
    #[error("Attribute '{0}' is reserved and can't be declared in a factory")]
    ReservedAttribute(String),

    /// An attribute was read that the factory never declared.
    #[error("Attribute not declared: {0}")]
    UnknownAttribute(String),

    /// A computed attribute depends on itself.
    #[error("Attribute '{0}' depends on itself")]
    CyclicAttribute(String),

    /// Failure raised by a user-supplied callback.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}
