//! Boost aggregation.
//!
//! Boosts are ratio modifiers (e.g. `0.1` = +10%) attached to one action and
//! one category. All active sources for the same pair are summed; the sum is
//! commutative, so the order boosts arrive in never matters.

/// What a boost modifies.
///
/// Parsed from the game's `/buff_types/...` hrids. Categories the projection
/// does not use are kept as [`BoostCategory::Other`] so that they never match
/// `Efficiency` or `ActionSpeed` by accident.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoostCategory {
    /// Fraction of completions granted for free.
    #[strum(serialize = "/buff_types/efficiency")]
    Efficiency,

    /// Speeds up every completion: duration is divided by `1 + ratio`.
    #[strum(serialize = "/buff_types/action_speed")]
    ActionSpeed,

    #[strum(default)]
    Other(String),
}

impl BoostCategory {
    /// Maps a buff type hrid onto a category; unknown hrids become `Other`.
    pub fn from_hrid(hrid: &str) -> Self {
        // `Other` is the default variant, so parsing is infallible.
        hrid.parse()
            .unwrap_or_else(|_| BoostCategory::Other(hrid.to_owned()))
    }

    /// The buff type hrid this category was parsed from.
    pub fn hrid(&self) -> &str {
        match self {
            BoostCategory::Other(hrid) => hrid,
            known => {
                let hrid: &'static str = known.into();
                hrid
            }
        }
    }
}

/// One active ratio modifier for one action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBoost {
    pub target_action_hrid: String,
    pub category: BoostCategory,
    pub ratio: f64,
}

impl ActiveBoost {
    pub fn new(target_action_hrid: impl Into<String>, category: BoostCategory, ratio: f64) -> Self {
        Self {
            target_action_hrid: target_action_hrid.into(),
            category,
            ratio,
        }
    }

    pub fn applies_to(&self, action_hrid: &str, category: &BoostCategory) -> bool {
        self.target_action_hrid == action_hrid && &self.category == category
    }
}

/// Sums the ratios of every boost matching `action_hrid` and `category`.
///
/// Returns `0.0` when nothing matches, including for actions the character has
/// never seen.
pub fn aggregate_ratio_boost(
    action_hrid: &str,
    category: &BoostCategory,
    boosts: &[ActiveBoost],
) -> f64 {
    boosts
        .iter()
        .filter(|boost| boost.applies_to(action_hrid, category))
        .map(|boost| boost.ratio)
        .sum()
}

/// Live character state relevant to projections.
///
/// Replaced wholesale whenever a character info message arrives.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub boosts: Vec<ActiveBoost>,
}

impl CharacterSnapshot {
    pub fn new(boosts: Vec<ActiveBoost>) -> Self {
        Self { boosts }
    }

    /// Adds a boost (builder pattern).
    #[must_use]
    pub fn with_boost(mut self, boost: ActiveBoost) -> Self {
        self.boosts.push(boost);
        self
    }

    pub fn ratio_boost(&self, action_hrid: &str, category: &BoostCategory) -> f64 {
        aggregate_ratio_boost(action_hrid, category, &self.boosts)
    }
}
