//! Projection report types.
//!
//! Reports are plain values rebuilt from scratch for every event.

pub(crate) const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Everything derived from one completed action event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionReport {
    pub skill_hrid: String,
    pub skill_name: String,
    pub action_hrid: String,
    pub action_name: String,

    /// Experience of the affected skill after this completion.
    pub current_experience: f64,
    pub current_level: u32,

    /// Effective duration of one completion, after speed boosts.
    pub seconds_per_action: f64,

    /// Summed efficiency ratio (`0.2` = one in five completions is free).
    pub efficiency_boost: f64,

    pub hourly: HourlyProjection,
    pub next_level: NextLevelProjection,

    /// Present only when the remaining completions are determined.
    pub exhaustion: Option<ExhaustionProjection>,

    /// Present only for count-bounded actions.
    pub progress: Option<CompletionProgress>,
}

/// What one more hour of the current action yields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyProjection {
    /// `round(3600 / seconds_per_action)`
    pub actions: u64,

    /// `round(actions × efficiency)`
    pub skipped_actions: i64,

    /// `experience_gain × actions`
    pub experience: f64,
}

impl HourlyProjection {
    pub fn new(seconds_per_action: f64, efficiency: f64, experience_gain: f64) -> Self {
        let actions = (SECONDS_PER_HOUR / seconds_per_action).round() as u64;
        Self {
            actions,
            skipped_actions: (actions as f64 * efficiency).round() as i64,
            experience: experience_gain * actions as f64,
        }
    }
}

/// Time and completions until the skill reaches its next level.
///
/// Free completions granted by efficiency still award experience, so only
/// `1 - efficiency` of the raw completions cost time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextLevelProjection {
    pub experience_remaining: f64,

    /// Completions needed, ignoring efficiency.
    pub actions: f64,

    /// Completions that actually take time.
    pub effective_actions: f64,

    pub seconds: f64,
}

impl NextLevelProjection {
    pub fn new(
        experience_remaining: f64,
        experience_gain: f64,
        efficiency: f64,
        seconds_per_action: f64,
    ) -> Self {
        let actions = experience_remaining / experience_gain;
        let effective_actions = actions * (1.0 - efficiency);
        Self {
            experience_remaining,
            actions,
            effective_actions,
            seconds: effective_actions * seconds_per_action,
        }
    }
}

/// Outcome of running the action until its stop condition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustionProjection {
    pub remaining_actions: f64,

    /// Input that runs out first, for resource-bounded actions.
    pub limiting_item_hrid: Option<String>,

    /// Time left, with efficiency-skipped completions removed.
    pub remaining_seconds: f64,

    pub skipped_actions: i64,
    pub experience_gained: f64,

    /// Level reached once every remaining completion is done.
    pub projected_level: u32,
}

/// Verbatim progress of a count-bounded action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionProgress {
    pub current: u64,
    pub max: u64,
}
