//! Static reference data: skills, actions, items, and the level curve.
//!
//! [`ReferenceOracle`] is the read-only view the calculators depend on.
//! [`ReferenceTables`] is the loaded data; [`ReferenceStore`] wraps it in an
//! explicit `Uninitialized → Loaded` lifecycle so that lookups issued before
//! the client info arrives fail fast instead of observing partial state.
mod definitions;
mod error;
mod tables;

pub use definitions::{ActionDefinition, ItemDefinition, SkillDefinition};
pub use error::ReferenceError;
pub use tables::ReferenceTables;

use crate::level::LevelExperienceTable;
use crate::projection::{ProjectionError, ReferencePart};

/// Which table a lookup was addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DefinitionKind {
    Skill,
    Action,
    Item,
}

/// Read-only access to the reference tables.
///
/// Lookups never fall back to defaults: a missing hrid is an
/// [`ProjectionError::UnknownIdentifier`].
pub trait ReferenceOracle {
    fn skill(&self, hrid: &str) -> Result<&SkillDefinition, ProjectionError>;

    fn action(&self, hrid: &str) -> Result<&ActionDefinition, ProjectionError>;

    fn item(&self, hrid: &str) -> Result<&ItemDefinition, ProjectionError>;

    fn level_table(&self) -> Result<&LevelExperienceTable, ProjectionError>;

    /// Level reached with `experience`; see [`LevelExperienceTable::level_for_experience`].
    fn level_for_experience(&self, experience: f64) -> Result<u32, ProjectionError> {
        self.level_table()?.level_for_experience(experience)
    }

    /// Experience still missing for the next level.
    fn experience_to_next_level(&self, experience: f64) -> Result<f64, ProjectionError> {
        self.level_table()?.experience_to_next_level(experience)
    }
}

/// Lifecycle holder for the reference tables.
///
/// A store starts uninitialized. Every client info message replaces the
/// tables wholesale; they are never patched in place.
#[derive(Clone, Debug, Default)]
pub struct ReferenceStore {
    tables: Option<ReferenceTables>,
}

impl ReferenceStore {
    /// Creates an uninitialized store.
    pub const fn new() -> Self {
        Self { tables: None }
    }

    /// Creates a store that is already loaded.
    pub fn loaded(tables: ReferenceTables) -> Self {
        Self {
            tables: Some(tables),
        }
    }

    /// Installs `tables`, returning the tables they replace.
    pub fn load(&mut self, tables: ReferenceTables) -> Option<ReferenceTables> {
        self.tables.replace(tables)
    }

    pub fn is_loaded(&self) -> bool {
        self.tables.is_some()
    }

    /// Returns the loaded tables.
    ///
    /// # Errors
    ///
    /// Returns `UninitializedReferenceData` before the first [`Self::load`].
    pub fn tables(&self) -> Result<&ReferenceTables, ProjectionError> {
        self.tables
            .as_ref()
            .ok_or(ProjectionError::UninitializedReferenceData(
                ReferencePart::Definitions,
            ))
    }
}

impl ReferenceOracle for ReferenceStore {
    fn skill(&self, hrid: &str) -> Result<&SkillDefinition, ProjectionError> {
        self.tables()?.skill(hrid)
    }

    fn action(&self, hrid: &str) -> Result<&ActionDefinition, ProjectionError> {
        self.tables()?.action(hrid)
    }

    fn item(&self, hrid: &str) -> Result<&ItemDefinition, ProjectionError> {
        self.tables()?.item(hrid)
    }

    fn level_table(&self) -> Result<&LevelExperienceTable, ProjectionError> {
        self.tables()?.level_table()
    }
}
