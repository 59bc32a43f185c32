//! Common error infrastructure for overlay-core.
//!
//! Domain-specific errors (`ProjectionError`, `ReferenceError`) live next to the
//! code that raises them and implement [`OverlayError`] so callers can decide
//! how to react without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the event is skipped and processing continues normally
/// - **Validation**: the input (event or reference data) is inconsistent
/// - **Internal**: the upstream feed contradicted itself
/// - **Fatal**: the request cannot be served until initialization completes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Unsupported input; skip it and keep going.
    ///
    /// Examples: multi-skill (combat) action events
    Recoverable,

    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: unknown action hrid, experience past the level table
    Validation,

    /// The event stream disagrees with itself.
    ///
    /// Examples: current completion count above the maximum
    Internal,

    /// Required state is missing for this request.
    ///
    /// Examples: action completed before the client info was received
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the caller should simply skip the event.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error points at inconsistent or missing state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all overlay-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on how the caller should react, not impact
/// - Keep `error_code` values stable; they end up in logs
pub trait OverlayError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
