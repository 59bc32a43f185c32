use std::collections::BTreeMap;

/// A skill as described by the client info tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub hrid: String,
    pub display_name: String,
}

impl SkillDefinition {
    pub fn new(hrid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            hrid: hrid.into(),
            display_name: display_name.into(),
        }
    }
}

/// An item as described by the client info tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub hrid: String,
    pub display_name: String,
}

impl ItemDefinition {
    pub fn new(hrid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            hrid: hrid.into(),
            display_name: display_name.into(),
        }
    }
}

/// Static description of one repeatable action.
///
/// # Stop conditions
///
/// - `max_completion_count` set: the action is count-bounded
/// - `input_items` set and non-empty: the action is resource-bounded
/// - neither: the number of remaining completions is undetermined
///
/// A count cap reported by the live event takes precedence over the cap stored
/// here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub hrid: String,
    pub display_name: String,

    /// Duration of one completion before speed boosts, in nanoseconds.
    pub base_duration_nanos: u64,

    /// Experience awarded per completion.
    pub experience_gain: f64,

    /// Skill that receives the experience, when the tables say so.
    pub experience_skill_hrid: Option<String>,

    /// Items consumed per completion, keyed by item hrid.
    pub input_items: Option<BTreeMap<String, u64>>,

    pub max_completion_count: Option<u64>,
}

impl ActionDefinition {
    pub fn new(
        hrid: impl Into<String>,
        display_name: impl Into<String>,
        base_duration_nanos: u64,
        experience_gain: f64,
    ) -> Self {
        Self {
            hrid: hrid.into(),
            display_name: display_name.into(),
            base_duration_nanos,
            experience_gain,
            experience_skill_hrid: None,
            input_items: None,
            max_completion_count: None,
        }
    }

    /// Sets the skill credited with the experience (builder pattern).
    #[must_use]
    pub fn with_experience_skill(mut self, skill_hrid: impl Into<String>) -> Self {
        self.experience_skill_hrid = Some(skill_hrid.into());
        self
    }

    /// Adds one consumed input (builder pattern).
    #[must_use]
    pub fn with_input(mut self, item_hrid: impl Into<String>, count: u64) -> Self {
        self.input_items
            .get_or_insert_with(BTreeMap::new)
            .insert(item_hrid.into(), count);
        self
    }

    /// Caps the number of completions (builder pattern).
    #[must_use]
    pub fn with_max_completion_count(mut self, max: u64) -> Self {
        self.max_completion_count = Some(max);
        self
    }

    /// Iterates over consumed inputs; empty when the action consumes nothing.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.input_items
            .iter()
            .flatten()
            .map(|(hrid, count)| (hrid.as_str(), *count))
    }
}
