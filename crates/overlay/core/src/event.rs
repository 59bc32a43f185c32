//! Decoded "action completed" events.

/// Experience total of one skill after the completion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillExperience {
    pub skill_hrid: String,
    pub experience: f64,
}

impl SkillExperience {
    pub fn new(skill_hrid: impl Into<String>, experience: f64) -> Self {
        Self {
            skill_hrid: skill_hrid.into(),
            experience,
        }
    }
}

/// One inventory stack after the completion.
///
/// The same item hrid may appear several times (e.g. different enhancement
/// levels); estimators sum them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub item_hrid: String,
    pub count: u64,
}

impl InventoryEntry {
    pub fn new(item_hrid: impl Into<String>, count: u64) -> Self {
        Self {
            item_hrid: item_hrid.into(),
            count,
        }
    }
}

/// State reported by the game right after one completion of the current action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedActionEvent {
    pub action_hrid: String,
    pub current_count: u64,

    /// Present when the player queued a fixed number of completions.
    pub max_count: Option<u64>,

    /// Skills whose experience changed, in the order the game reported them.
    pub affected_skills: Vec<SkillExperience>,

    /// Inventory entries reported with the event.
    pub inventory: Vec<InventoryEntry>,
}

impl CompletedActionEvent {
    pub fn new(action_hrid: impl Into<String>, current_count: u64) -> Self {
        Self {
            action_hrid: action_hrid.into(),
            current_count,
            max_count: None,
            affected_skills: Vec::new(),
            inventory: Vec::new(),
        }
    }

    /// Sets the count cap (builder pattern).
    #[must_use]
    pub fn with_max_count(mut self, max_count: u64) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Appends an affected skill (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, skill_hrid: impl Into<String>, experience: f64) -> Self {
        self.affected_skills
            .push(SkillExperience::new(skill_hrid, experience));
        self
    }

    /// Appends an inventory entry (builder pattern).
    #[must_use]
    pub fn with_item(mut self, item_hrid: impl Into<String>, count: u64) -> Self {
        self.inventory.push(InventoryEntry::new(item_hrid, count));
        self
    }

    /// Total count of `item_hrid` across every inventory entry; `0` when absent.
    pub fn available(&self, item_hrid: &str) -> u64 {
        self.inventory
            .iter()
            .filter(|entry| entry.item_hrid == item_hrid)
            .map(|entry| entry.count)
            .sum()
    }
}
