//! Remaining-actions estimator.
//!
//! How many more completions are possible depends on the stop condition:
//!
//! | Stop condition   | Remaining                                      |
//! |------------------|------------------------------------------------|
//! | count cap        | `max - current`                                |
//! | consumed inputs  | `min(available / required)` over every input   |
//! | neither          | undetermined                                   |
//!
//! Resource-bounded results are not floored: 10 items at 3 per completion
//! yields `3.33…`.

use crate::event::CompletedActionEvent;
use crate::projection::ProjectionError;
use crate::reference::ActionDefinition;

/// Result of the remaining-actions estimate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemainingActions {
    /// The action stops after a fixed number of completions.
    CountBounded { remaining: u64 },

    /// The action stops when an input runs out.
    ResourceBounded {
        remaining: f64,
        /// The input that runs out first.
        limiting_item_hrid: String,
    },

    /// No cap and no inputs: the action can run indefinitely, so no
    /// exhaustion metrics are derived.
    Undetermined,
}

impl RemainingActions {
    /// Remaining completions, or `None` when undetermined.
    pub fn count(&self) -> Option<f64> {
        match self {
            RemainingActions::CountBounded { remaining } => Some(*remaining as f64),
            RemainingActions::ResourceBounded { remaining, .. } => Some(*remaining),
            RemainingActions::Undetermined => None,
        }
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, RemainingActions::Undetermined)
    }
}

/// Estimates how many completions of `action` are still possible after `event`.
///
/// The cap reported by the event wins over the definition's cap.
///
/// # Errors
///
/// `NegativeRemainingCount` when the event reports more completions than its
/// cap; the event is inconsistent and the value is not clamped to zero.
pub fn remaining_actions(
    action: &ActionDefinition,
    event: &CompletedActionEvent,
) -> Result<RemainingActions, ProjectionError> {
    if let Some(max) = event.max_count.or(action.max_completion_count) {
        let remaining = max.checked_sub(event.current_count).ok_or_else(|| {
            ProjectionError::NegativeRemainingCount {
                action_hrid: event.action_hrid.clone(),
                current: event.current_count,
                max,
            }
        })?;
        return Ok(RemainingActions::CountBounded { remaining });
    }

    let limiting = action
        .inputs()
        .filter(|(_, required)| *required > 0)
        .map(|(item_hrid, required)| {
            let available = event.available(item_hrid) as f64;
            (item_hrid, available / required as f64)
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b));

    Ok(match limiting {
        Some((item_hrid, remaining)) => RemainingActions::ResourceBounded {
            remaining,
            limiting_item_hrid: item_hrid.to_owned(),
        },
        None => RemainingActions::Undetermined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHEESE: &str = "/actions/cheesesmithing/cheese";

    fn crafting() -> ActionDefinition {
        ActionDefinition::new(CHEESE, "Cheese", 10_000_000_000, 8.0)
            .with_input("/items/item_a", 2)
            .with_input("/items/item_b", 3)
    }

    #[test]
    fn count_bounded_subtracts_current_from_max() {
        let event = CompletedActionEvent::new(CHEESE, 40).with_max_count(100);

        assert_eq!(
            remaining_actions(&crafting(), &event),
            Ok(RemainingActions::CountBounded { remaining: 60 })
        );
    }

    #[test]
    fn definition_cap_applies_when_event_has_none() {
        let action = crafting().with_max_completion_count(10);
        let event = CompletedActionEvent::new(CHEESE, 4);

        assert_eq!(
            remaining_actions(&action, &event).unwrap().count(),
            Some(6.0)
        );
    }

    #[test]
    fn count_above_max_is_reported_not_clamped() {
        let event = CompletedActionEvent::new(CHEESE, 101).with_max_count(100);

        assert_eq!(
            remaining_actions(&crafting(), &event),
            Err(ProjectionError::NegativeRemainingCount {
                action_hrid: CHEESE.to_owned(),
                current: 101,
                max: 100,
            })
        );
    }

    #[test]
    fn resource_bounded_takes_the_scarcest_input() {
        let event = CompletedActionEvent::new(CHEESE, 7)
            .with_item("/items/item_a", 10)
            .with_item("/items/item_b", 9)
            .with_item("/items/unrelated", 1);

        assert_eq!(
            remaining_actions(&crafting(), &event),
            Ok(RemainingActions::ResourceBounded {
                remaining: 3.0,
                limiting_item_hrid: "/items/item_b".to_owned(),
            })
        );
    }

    #[test]
    fn resource_bounded_is_not_floored() {
        let event = CompletedActionEvent::new(CHEESE, 1)
            .with_item("/items/item_a", 20)
            .with_item("/items/item_b", 10);

        let remaining = remaining_actions(&crafting(), &event).unwrap().count().unwrap();
        assert!((remaining - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_stacks_of_an_input_are_summed() {
        let event = CompletedActionEvent::new(CHEESE, 1)
            .with_item("/items/item_a", 4)
            .with_item("/items/item_a", 4)
            .with_item("/items/item_b", 30);

        assert_eq!(
            remaining_actions(&crafting(), &event).unwrap().count(),
            Some(4.0)
        );
    }

    #[test]
    fn absent_input_means_nothing_remains() {
        let event = CompletedActionEvent::new(CHEESE, 1).with_item("/items/item_a", 10);

        assert_eq!(
            remaining_actions(&crafting(), &event),
            Ok(RemainingActions::ResourceBounded {
                remaining: 0.0,
                limiting_item_hrid: "/items/item_b".to_owned(),
            })
        );
    }

    #[test]
    fn no_cap_and_no_inputs_is_undetermined() {
        let gathering = ActionDefinition::new("/actions/foraging/egg", "Egg", 1, 1.0);
        let event = CompletedActionEvent::new("/actions/foraging/egg", 12);

        let remaining = remaining_actions(&gathering, &event).unwrap();
        assert_eq!(remaining, RemainingActions::Undetermined);
        assert_eq!(remaining.count(), None);
        assert!(!remaining.is_determined());
    }
}
