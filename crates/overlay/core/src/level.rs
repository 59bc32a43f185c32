//! Level/experience calculator.
//!
//! The table holds cumulative experience thresholds indexed by level, so
//! `thresholds[0]` is the experience needed for level 0. A character is at the
//! greatest level whose threshold does not exceed its experience.
//!
//! # Final entry
//!
//! The last threshold has no successor and is treated as an unbounded cap:
//! experience at or above it is [`ProjectionError::ExperienceOutOfRange`], and
//! the highest level ever returned is `level_count - 2`. The game may well intend the
//! last entry to be a reachable level of its own; this behavior is kept as is
//! until that is confirmed.

use crate::projection::ProjectionError;
use crate::reference::ReferenceError;

/// Cumulative experience thresholds per level, strictly increasing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelExperienceTable {
    thresholds: Vec<f64>,
}

impl LevelExperienceTable {
    /// Validates and wraps a threshold table.
    ///
    /// # Errors
    ///
    /// Rejects empty tables, non-finite thresholds, and thresholds that do not
    /// strictly increase with the level index.
    pub fn new(thresholds: Vec<f64>) -> Result<Self, ReferenceError> {
        if thresholds.is_empty() {
            return Err(ReferenceError::EmptyLevelTable);
        }

        for (level, threshold) in thresholds.iter().copied().enumerate() {
            if !threshold.is_finite() {
                return Err(ReferenceError::NonFiniteThreshold { level });
            }
            if level > 0 {
                let previous = thresholds[level - 1];
                if threshold <= previous {
                    return Err(ReferenceError::NonIncreasingLevelTable {
                        level,
                        threshold,
                        previous,
                    });
                }
            }
        }

        Ok(Self { thresholds })
    }

    /// Number of thresholds, including the final cap.
    pub fn level_count(&self) -> usize {
        self.thresholds.len()
    }

    /// Threshold for `level`, if the table defines it.
    pub fn threshold(&self, level: u32) -> Option<f64> {
        self.thresholds.get(level as usize).copied()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns the greatest level `i` with `thresholds[i] <= experience`.
    ///
    /// # Errors
    ///
    /// `ExperienceOutOfRange` when the experience lies below the first threshold
    /// or at/above the last one (see the module docs).
    pub fn level_for_experience(&self, experience: f64) -> Result<u32, ProjectionError> {
        self.next_threshold_index(experience)
            .map(|next| (next - 1) as u32)
    }

    /// Experience still missing to reach the level after the current one.
    ///
    /// Every resolvable level has a successor threshold, so this fails only
    /// where [`Self::level_for_experience`] fails.
    pub fn experience_to_next_level(&self, experience: f64) -> Result<f64, ProjectionError> {
        let next = self.next_threshold_index(experience)?;
        Ok(self.thresholds[next] - experience)
    }

    /// Index of the first threshold above `experience`; never `0`.
    ///
    /// The table is small and fixed, so a linear scan is used.
    fn next_threshold_index(&self, experience: f64) -> Result<usize, ProjectionError> {
        match self
            .thresholds
            .iter()
            .position(|&threshold| threshold > experience)
        {
            Some(0) | None => Err(ProjectionError::ExperienceOutOfRange { experience }),
            Some(next) => Ok(next),
        }
    }
}
