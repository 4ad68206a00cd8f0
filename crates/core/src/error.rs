//! Primitive-level error model.

use thiserror::Error;

/// Malformed input at the value boundary.
///
/// Authorization and dispatch failures live in their own crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A numeric string could not be parsed.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}
