//! crates/cocktail_core/src/error.rs
//!
//! The error taxonomy surfaced by the logic layer.

use crate::ports::PortError;

/// A precondition on an argument was violated. Raised before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ArgumentError {
    pub message: String,
}

impl ArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A remote call completed but reported a domain failure, or a policy
/// decision (such as an empty search) rejected the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LogicError {
    pub message: String,
}

impl LogicError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything a `CocktailLogic` operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CocktailError {
    #[error("Invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    #[error("{0}")]
    Logic(#[from] LogicError),

    /// Transport faults from the service ports, untouched.
    #[error(transparent)]
    Port(#[from] PortError),
}

pub type CocktailResult<T> = Result<T, CocktailError>;
