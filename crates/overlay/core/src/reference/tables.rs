use std::collections::HashMap;

use super::definitions::{ActionDefinition, ItemDefinition, SkillDefinition};
use super::{DefinitionKind, ReferenceOracle};
use crate::level::LevelExperienceTable;
use crate::projection::ProjectionError;

/// Fully loaded reference data from one client info message.
///
/// Tables are filled once while decoding and never mutated after they are
/// handed to a [`super::ReferenceStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTables {
    skills: HashMap<String, SkillDefinition>,
    actions: HashMap<String, ActionDefinition>,
    items: HashMap<String, ItemDefinition>,
    levels: LevelExperienceTable,
}

impl ReferenceTables {
    pub fn new(levels: LevelExperienceTable) -> Self {
        Self {
            skills: HashMap::new(),
            actions: HashMap::new(),
            items: HashMap::new(),
            levels,
        }
    }

    pub fn insert_skill(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.hrid.clone(), skill);
    }

    pub fn insert_action(&mut self, action: ActionDefinition) {
        self.actions.insert(action.hrid.clone(), action);
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.hrid.clone(), item);
    }

    /// Adds a skill definition (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.insert_skill(skill);
        self
    }

    /// Adds an action definition (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.insert_action(action);
        self
    }

    /// Adds an item definition (builder pattern).
    #[must_use]
    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.insert_item(item);
        self
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn levels(&self) -> &LevelExperienceTable {
        &self.levels
    }

    /// Input item hrids referenced by actions but absent from the item table.
    ///
    /// Projections still work for such actions; the loader only reports them.
    pub fn dangling_inputs(&self) -> Vec<(&str, &str)> {
        let mut dangling: Vec<(&str, &str)> = self
            .actions
            .values()
            .flat_map(|action| {
                action
                    .inputs()
                    .filter(|(item, _)| !self.items.contains_key(*item))
                    .map(move |(item, _)| (action.hrid.as_str(), item))
            })
            .collect();
        dangling.sort_unstable();
        dangling
    }
}

impl ReferenceOracle for ReferenceTables {
    fn skill(&self, hrid: &str) -> Result<&SkillDefinition, ProjectionError> {
        self.skills
            .get(hrid)
            .ok_or_else(|| ProjectionError::unknown(DefinitionKind::Skill, hrid))
    }

    fn action(&self, hrid: &str) -> Result<&ActionDefinition, ProjectionError> {
        self.actions
            .get(hrid)
            .ok_or_else(|| ProjectionError::unknown(DefinitionKind::Action, hrid))
    }

    fn item(&self, hrid: &str) -> Result<&ItemDefinition, ProjectionError> {
        self.items
            .get(hrid)
            .ok_or_else(|| ProjectionError::unknown(DefinitionKind::Item, hrid))
    }

    fn level_table(&self) -> Result<&LevelExperienceTable, ProjectionError> {
        Ok(&self.levels)
    }
}
