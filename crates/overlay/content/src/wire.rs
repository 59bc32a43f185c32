//! Serde mirrors of the game's JSON messages.
//!
//! Only the fields the projection needs are declared; everything else in the
//! payload is ignored. Field names follow the game's camelCase.

use std::collections::BTreeMap;

use overlay_core::{
    ActionDefinition, ActiveBoost, BoostCategory, CharacterSnapshot, CompletedActionEvent,
    InventoryEntry, ItemDefinition, LevelExperienceTable, ReferenceError, ReferenceTables,
    SkillDefinition, SkillExperience,
};
use serde::Deserialize;

/// Just the `type` tag of any message.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// init_client_info
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoMessage {
    #[serde(default)]
    pub skill_detail_map: BTreeMap<String, NamedDetail>,
    #[serde(default)]
    pub action_detail_map: BTreeMap<String, ActionDetail>,
    #[serde(default)]
    pub item_detail_map: BTreeMap<String, NamedDetail>,
    pub level_experience_table: Vec<f64>,
}

/// Skill and item details share the same shape as far as the overlay cares.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedDetail {
    pub hrid: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDetail {
    pub hrid: String,
    pub name: String,

    /// Nanoseconds.
    #[serde(default)]
    pub base_time_cost: u64,

    #[serde(default)]
    pub experience_gain: Option<ExperienceGain>,

    /// `null` for actions that consume nothing.
    #[serde(default)]
    pub input_items: Option<Vec<ItemCount>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceGain {
    #[serde(default)]
    pub skill_hrid: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCount {
    pub item_hrid: String,
    pub count: u64,
}

impl From<ActionDetail> for ActionDefinition {
    fn from(detail: ActionDetail) -> Self {
        let (experience_gain, experience_skill_hrid) = match detail.experience_gain {
            Some(gain) if !gain.skill_hrid.is_empty() => (gain.value, Some(gain.skill_hrid)),
            Some(gain) => (gain.value, None),
            None => (0.0, None),
        };

        let mut action =
            ActionDefinition::new(detail.hrid, detail.name, detail.base_time_cost, experience_gain);
        action.experience_skill_hrid = experience_skill_hrid;
        action.input_items = detail.input_items.map(|inputs| {
            let mut required = BTreeMap::new();
            for input in inputs {
                *required.entry(input.item_hrid).or_insert(0) += input.count;
            }
            required
        });
        action
    }
}

impl TryFrom<ClientInfoMessage> for ReferenceTables {
    type Error = ReferenceError;

    fn try_from(message: ClientInfoMessage) -> Result<Self, Self::Error> {
        let levels = LevelExperienceTable::new(message.level_experience_table)?;
        let mut tables = ReferenceTables::new(levels);

        for skill in message.skill_detail_map.into_values() {
            tables.insert_skill(SkillDefinition::new(skill.hrid, skill.name));
        }
        for item in message.item_detail_map.into_values() {
            tables.insert_item(ItemDefinition::new(item.hrid, item.name));
        }
        for action in message.action_detail_map.into_values() {
            tables.insert_action(action.into());
        }

        Ok(tables)
    }
}

// ============================================================================
// init_character_info
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfoMessage {
    /// Boosts keyed by the action they apply to; values may be `null`.
    #[serde(default)]
    pub skilling_action_buffs_map: BTreeMap<String, Option<Vec<Buff>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buff {
    pub type_hrid: String,
    #[serde(default)]
    pub ratio_boost: f64,
}

impl From<CharacterInfoMessage> for CharacterSnapshot {
    fn from(message: CharacterInfoMessage) -> Self {
        let boosts = message
            .skilling_action_buffs_map
            .into_iter()
            .flat_map(|(action_hrid, buffs)| {
                buffs.into_iter().flatten().map(move |buff| {
                    ActiveBoost::new(
                        action_hrid.clone(),
                        BoostCategory::from_hrid(&buff.type_hrid),
                        buff.ratio_boost,
                    )
                })
            })
            .collect();
        CharacterSnapshot::new(boosts)
    }
}

// ============================================================================
// action_completed
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCompletedMessage {
    pub end_character_action: CharacterAction,
    #[serde(default)]
    pub end_character_skills: Option<Vec<CharacterSkill>>,
    #[serde(default)]
    pub end_character_items: Option<Vec<CharacterItem>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAction {
    pub action_hrid: String,
    #[serde(default)]
    pub has_max_count: bool,
    #[serde(default)]
    pub max_count: u64,
    #[serde(default)]
    pub current_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSkill {
    pub skill_hrid: String,
    pub experience: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterItem {
    pub item_hrid: String,
    pub count: u64,
}

impl From<ActionCompletedMessage> for CompletedActionEvent {
    fn from(message: ActionCompletedMessage) -> Self {
        let action = message.end_character_action;
        CompletedActionEvent {
            action_hrid: action.action_hrid,
            current_count: action.current_count,
            max_count: action.has_max_count.then_some(action.max_count),
            affected_skills: message
                .end_character_skills
                .into_iter()
                .flatten()
                .map(|skill| SkillExperience::new(skill.skill_hrid, skill.experience))
                .collect(),
            inventory: message
                .end_character_items
                .into_iter()
                .flatten()
                .map(|item| InventoryEntry::new(item.item_hrid, item.count))
                .collect(),
        }
    }
}
