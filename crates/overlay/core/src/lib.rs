//! Pure projection engine for the action overview overlay.
//!
//! `overlay-core` turns a decoded "action completed" event, the live character
//! snapshot, and the static reference tables into a [`ProjectionReport`]. It
//! owns no I/O: the runtime decides where events come from and where reports
//! go, and every function here is deterministic for the same inputs.
//!
//! Calculators are layered leaf-first:
//! - [`boost`] sums ratio modifiers per action and category
//! - [`level`] maps experience onto the level threshold table
//! - [`timing`] derives the effective duration of one completion
//! - [`remaining`] estimates how many completions are still possible
//! - [`projection`] combines them into the final report
pub mod boost;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod level;
pub mod projection;
pub mod reference;
pub mod remaining;
pub mod timing;

pub use boost::{ActiveBoost, BoostCategory, CharacterSnapshot, aggregate_ratio_boost};
pub use config::{MessageTags, OverlayConfig};
pub use error::{ErrorSeverity, OverlayError};
pub use event::{CompletedActionEvent, InventoryEntry, SkillExperience};
pub use format::format_hms;
pub use level::LevelExperienceTable;
pub use projection::{
    CompletionProgress, ExhaustionProjection, HourlyProjection, NextLevelProjection,
    ProjectionBuilder, ProjectionError, ProjectionReport, ReferencePart,
};
pub use reference::{
    ActionDefinition, DefinitionKind, ItemDefinition, ReferenceError, ReferenceOracle,
    ReferenceStore, ReferenceTables, SkillDefinition,
};
pub use remaining::{RemainingActions, remaining_actions};
pub use timing::{NANOS_PER_SECOND, effective_action_seconds};
