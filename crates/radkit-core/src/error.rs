//! Error types for the radkit object runtime.
//!
//! This module defines the error types used throughout the runtime:
//! constructor and clone failures, binding conflicts, and type registry
//! errors. Container misses (an absent key or an out-of-range index) are
//! ordinary `None` results, never errors.

use std::fmt;

/// Errors that can occur in the radkit object runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type's constructor (or deep-clone) rejected the operation.
    ConstructorFailure {
        /// Name of the type being constructed.
        type_name: &'static str,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// The type does not declare the clone capability.
    CloneUnsupported {
        /// Name of the type that was asked to clone.
        type_name: &'static str,
    },

    /// Attempted to bind an instance already bound to a different peer.
    BindingConflict {
        /// Name of the bound instance's type.
        type_name: &'static str,
    },

    /// A type with this name is already present in the registry.
    TypeAlreadyRegistered {
        /// The duplicate type name.
        name: &'static str,
    },

    /// No type with this name is present in the registry.
    TypeNotRegistered {
        /// The requested type name.
        name: String,
    },

    /// An operation was given an argument it cannot accept.
    InvalidArgument {
        /// Name of the type whose operation rejected the argument.
        type_name: &'static str,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// An aggregate was handed an instance of the wrong type.
    TypeMismatch {
        /// Name of the expected type.
        expected: &'static str,
        /// Name of the type actually provided.
        got: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConstructorFailure { type_name, reason } => {
                write!(f, "Constructor for '{type_name}' failed: {reason}")
            }
            Error::CloneUnsupported { type_name } => {
                write!(f, "Type '{type_name}' does not support cloning")
            }
            Error::BindingConflict { type_name } => {
                write!(
                    f,
                    "Instance of '{type_name}' is already bound to a different peer"
                )
            }
            Error::TypeAlreadyRegistered { name } => {
                write!(f, "Type '{name}' is already registered")
            }
            Error::TypeNotRegistered { name } => {
                write!(f, "Type '{name}' is not registered")
            }
            Error::InvalidArgument { type_name, reason } => {
                write!(f, "Invalid argument for '{type_name}': {reason}")
            }
            Error::TypeMismatch { expected, got } => {
                write!(f, "Expected an instance of '{expected}', got '{got}'")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for radkit runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
