//! Action timing calculator.
//!
//! Formula:
//! `seconds = base_duration_nanos / (1 + action_speed) / 1e9`

use crate::boost::{ActiveBoost, BoostCategory, aggregate_ratio_boost};
use crate::projection::ProjectionError;
use crate::reference::ActionDefinition;

pub const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Effective duration of one completion of `action`, in seconds.
///
/// # Errors
///
/// - `ZeroActionDuration` if the definition has no base duration
/// - `InvalidBoostConfiguration` if the summed speed ratio is `<= -1`, which
///   would make the duration infinite or negative. The value is never clamped.
///
/// # Examples
/// - base 5s, no speed boost: 5.0
/// - base 5s, speed +0.25: 4.0
/// - base 6s, speed +0.5: 4.0
pub fn effective_action_seconds(
    action: &ActionDefinition,
    boosts: &[ActiveBoost],
) -> Result<f64, ProjectionError> {
    if action.base_duration_nanos == 0 {
        return Err(ProjectionError::ZeroActionDuration {
            action_hrid: action.hrid.clone(),
        });
    }

    let speed_boost = aggregate_ratio_boost(&action.hrid, &BoostCategory::ActionSpeed, boosts);
    let multiplier = 1.0 + speed_boost;
    if multiplier <= 0.0 || multiplier.is_nan() {
        return Err(ProjectionError::InvalidBoostConfiguration {
            action_hrid: action.hrid.clone(),
            speed_boost,
        });
    }

    Ok(action.base_duration_nanos as f64 / multiplier / NANOS_PER_SECOND)
}
