use thiserror::Error;

use crate::runner::ds::value::Value;

/// Failures raised by the class system.
///
/// User method bodies can fail with an arbitrary value through [`ClassError::Thrown`].
#[derive(Debug, Error)]
pub enum ClassError {
    /// A class was registered at a path whose last segment is already taken.
    #[error("There's already something called {0}")]
    NameCollision(String),

    /// A proxy referenced a method name the receiver does not have.
    #[error("{owner} does not have a {method} method")]
    MissingMethod { owner: String, method: String },

    #[error("invalid class name {0}")]
    InvalidName(String),

    /// An intermediate namespace segment holds a value that cannot have members.
    #[error("'{0}' cannot hold namespace members")]
    NotAContainer(String),

    #[error("'{0}' is not a function")]
    NotCallable(String),

    #[error("'{0}' does not override a parent method")]
    NoSuperMethod(String),

    /// `newInstance` was called with something other than a class as `this`.
    #[error("'{0}' is not a class")]
    NotAClass(String),

    #[error("{0}.newInstance did not return an object")]
    NotAnInstance(String),

    #[error("'{0}' is read-only")]
    ReadOnly(String),

    #[error("namespace registry is no longer available")]
    RegistryUnavailable,

    #[error("config error: {0}")]
    Config(String),

    #[error("uncaught {0}")]
    Thrown(Value),
}
