//! Reference table validation errors.

use crate::error::{ErrorSeverity, OverlayError};

/// Errors raised while building reference tables from the client info.
///
/// These reject the whole initialization message; the previously loaded
/// tables (if any) stay in place.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceError {
    /// The level table has no entries.
    #[error("level experience table is empty")]
    EmptyLevelTable,

    /// A threshold is not strictly greater than its predecessor.
    #[error("level {level} threshold {threshold} does not exceed the previous threshold {previous}")]
    NonIncreasingLevelTable {
        level: usize,
        threshold: f64,
        previous: f64,
    },

    /// A threshold is NaN or infinite.
    #[error("level {level} threshold is not a finite number")]
    NonFiniteThreshold { level: usize },
}

impl OverlayError for ReferenceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ReferenceError::*;
        match self {
            EmptyLevelTable => "REFERENCE_EMPTY_LEVEL_TABLE",
            NonIncreasingLevelTable { .. } => "REFERENCE_NON_INCREASING_LEVEL_TABLE",
            NonFiniteThreshold { .. } => "REFERENCE_NON_FINITE_THRESHOLD",
        }
    }
}
