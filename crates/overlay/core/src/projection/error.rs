//! Projection errors.
//!
//! Every error is local to the event being projected: the builder keeps no
//! state between calls, so a failed event never affects the next one.

use crate::error::{ErrorSeverity, OverlayError};
use crate::reference::DefinitionKind;

/// Initialization input a projection depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferencePart {
    /// Skill/action/item tables and the level curve (client info).
    #[strum(serialize = "reference definitions")]
    Definitions,

    /// Active boosts (character info).
    #[strum(serialize = "character snapshot")]
    CharacterSnapshot,
}

/// Errors that prevent a report from being built.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionError {
    /// A lookup hrid is absent from the reference tables.
    #[error("unknown {kind} identifier '{hrid}'")]
    UnknownIdentifier { kind: DefinitionKind, hrid: String },

    /// A projection was requested before initialization completed.
    #[error("{0} has not been initialized")]
    UninitializedReferenceData(ReferencePart),

    /// The experience lies outside the levels the table can resolve.
    #[error("experience {experience} is outside the modeled level range")]
    ExperienceOutOfRange { experience: f64 },

    /// Speed boosts make the effective duration non-positive.
    #[error("action speed boost {speed_boost} for '{action_hrid}' makes the duration non-positive")]
    InvalidBoostConfiguration { action_hrid: String, speed_boost: f64 },

    /// The action definition carries no base duration.
    #[error("action '{action_hrid}' has a zero base duration")]
    ZeroActionDuration { action_hrid: String },

    /// The event changed more (or fewer) than one skill, e.g. combat.
    #[error("action '{action_hrid}' changed {skill_count} skills; only single-skill actions are supported")]
    UnsupportedMultiSkillAction {
        action_hrid: String,
        skill_count: usize,
    },

    /// The event reports more completions than its cap.
    #[error("action '{action_hrid}' reports {current} completions out of a maximum of {max}")]
    NegativeRemainingCount {
        action_hrid: String,
        current: u64,
        max: u64,
    },
}

impl ProjectionError {
    pub(crate) fn unknown(kind: DefinitionKind, hrid: &str) -> Self {
        ProjectionError::UnknownIdentifier {
            kind,
            hrid: hrid.to_owned(),
        }
    }
}

impl OverlayError for ProjectionError {
    fn severity(&self) -> ErrorSeverity {
        use ProjectionError::*;
        match self {
            UnsupportedMultiSkillAction { .. } => ErrorSeverity::Recoverable,
            UnknownIdentifier { .. } | ExperienceOutOfRange { .. } => ErrorSeverity::Validation,
            InvalidBoostConfiguration { .. } | ZeroActionDuration { .. } => {
                ErrorSeverity::Validation
            }
            NegativeRemainingCount { .. } => ErrorSeverity::Internal,
            UninitializedReferenceData(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ProjectionError::*;
        match self {
            UnknownIdentifier { .. } => "PROJECTION_UNKNOWN_IDENTIFIER",
            UninitializedReferenceData(_) => "PROJECTION_UNINITIALIZED_REFERENCE_DATA",
            ExperienceOutOfRange { .. } => "PROJECTION_EXPERIENCE_OUT_OF_RANGE",
            InvalidBoostConfiguration { .. } => "PROJECTION_INVALID_BOOST_CONFIGURATION",
            ZeroActionDuration { .. } => "PROJECTION_ZERO_ACTION_DURATION",
            UnsupportedMultiSkillAction { .. } => "PROJECTION_UNSUPPORTED_MULTI_SKILL_ACTION",
            NegativeRemainingCount { .. } => "PROJECTION_NEGATIVE_REMAINING_COUNT",
        }
    }
}
