//! Error types surfaced by the dispatcher.

use overlay_content::DecodeError;
use overlay_core::{ErrorSeverity, OverlayError, ProjectionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A message that could not be turned into state or a report.
///
/// Always local to one message: the dispatcher stays usable afterwards.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl OverlayError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Decode(err) => err.severity(),
            RuntimeError::Projection(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Decode(err) => err.error_code(),
            RuntimeError::Projection(err) => err.error_code(),
        }
    }
}
