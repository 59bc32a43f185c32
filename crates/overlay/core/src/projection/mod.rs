//! Projection builder.
//!
//! Combines the calculators into one [`ProjectionReport`] per completed action
//! event:
//!
//! ```text
//! [ event.affected_skills == 1 ]   otherwise UnsupportedMultiSkillAction
//!      ↓
//! [ seconds per action ]           timing + ActionSpeed boosts
//!      ↓
//! [ efficiency ratio ]             Efficiency boosts
//!      ↓
//! [ hourly / next level ]          level table
//!      ↓
//! [ exhaustion / progress ]        remaining-actions estimate, when determined
//! ```
//!
//! The builder is a pure function of its inputs and holds only borrows.
mod error;
mod report;

pub use error::{ProjectionError, ReferencePart};
pub use report::{
    CompletionProgress, ExhaustionProjection, HourlyProjection, NextLevelProjection,
    ProjectionReport,
};

use crate::boost::{BoostCategory, CharacterSnapshot};
use crate::event::CompletedActionEvent;
use crate::reference::ReferenceOracle;
use crate::remaining::{RemainingActions, remaining_actions};
use crate::timing::effective_action_seconds;

/// Builds reports against one reference oracle and character snapshot.
#[derive(Debug)]
pub struct ProjectionBuilder<'a, O>
where
    O: ReferenceOracle + ?Sized,
{
    reference: &'a O,
    snapshot: &'a CharacterSnapshot,
}

impl<'a, O> ProjectionBuilder<'a, O>
where
    O: ReferenceOracle + ?Sized,
{
    pub fn new(reference: &'a O, snapshot: &'a CharacterSnapshot) -> Self {
        Self {
            reference,
            snapshot,
        }
    }

    /// Derives the report for one completed action event.
    ///
    /// # Errors
    ///
    /// - `UnsupportedMultiSkillAction` unless exactly one skill changed
    /// - lookup and lifecycle errors from the reference oracle
    /// - timing, level, and remaining-count errors from the calculators
    pub fn build(&self, event: &CompletedActionEvent) -> Result<ProjectionReport, ProjectionError> {
        let skill_experience = match event.affected_skills.as_slice() {
            [single] => single,
            skills => {
                return Err(ProjectionError::UnsupportedMultiSkillAction {
                    action_hrid: event.action_hrid.clone(),
                    skill_count: skills.len(),
                });
            }
        };

        let action = self.reference.action(&event.action_hrid)?;
        let skill = self.reference.skill(&skill_experience.skill_hrid)?;
        let experience = skill_experience.experience;

        let seconds_per_action = effective_action_seconds(action, &self.snapshot.boosts)?;
        let efficiency = self
            .snapshot
            .ratio_boost(&action.hrid, &BoostCategory::Efficiency);

        let hourly = HourlyProjection::new(seconds_per_action, efficiency, action.experience_gain);
        let current_level = self.reference.level_for_experience(experience)?;
        let next_level = NextLevelProjection::new(
            self.reference.experience_to_next_level(experience)?,
            action.experience_gain,
            efficiency,
            seconds_per_action,
        );

        let remaining = remaining_actions(action, event)?;
        let exhaustion = match remaining.count() {
            Some(count) => {
                let experience_gained = action.experience_gain * count;
                Some(ExhaustionProjection {
                    remaining_actions: count,
                    limiting_item_hrid: match &remaining {
                        RemainingActions::ResourceBounded {
                            limiting_item_hrid, ..
                        } => Some(limiting_item_hrid.clone()),
                        _ => None,
                    },
                    remaining_seconds: count * seconds_per_action * (1.0 - efficiency),
                    skipped_actions: (count * efficiency).round() as i64,
                    experience_gained,
                    projected_level: self
                        .reference
                        .level_for_experience(experience + experience_gained)?,
                })
            }
            None => None,
        };

        let progress = match remaining {
            RemainingActions::CountBounded { .. } => event
                .max_count
                .or(action.max_completion_count)
                .map(|max| CompletionProgress {
                    current: event.current_count,
                    max,
                }),
            _ => None,
        };

        Ok(ProjectionReport {
            skill_hrid: skill.hrid.clone(),
            skill_name: skill.display_name.clone(),
            action_hrid: action.hrid.clone(),
            action_name: action.display_name.clone(),
            current_experience: experience,
            current_level,
            seconds_per_action,
            efficiency_boost: efficiency,
            hourly,
            next_level,
            exhaustion,
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boost::ActiveBoost;
    use crate::level::LevelExperienceTable;
    use crate::reference::{
        ActionDefinition, DefinitionKind, ItemDefinition, ReferenceStore, ReferenceTables,
        SkillDefinition,
    };

    const CHEESE: &str = "/actions/cheesesmithing/cheese";
    const COW: &str = "/actions/milking/cow";
    const SMITHING: &str = "/skills/cheesesmithing";
    const MILKING: &str = "/skills/milking";

    fn tables() -> ReferenceTables {
        let levels = LevelExperienceTable::new(vec![
            0.0, 33.0, 76.0, 132.0, 202.0, 286.0, 386.0, 503.0, 637.0, 791.0, 964.0,
        ])
        .unwrap();

        ReferenceTables::new(levels)
            .with_skill(SkillDefinition::new(SMITHING, "Cheesesmithing"))
            .with_skill(SkillDefinition::new(MILKING, "Milking"))
            .with_item(ItemDefinition::new("/items/item_a", "Item A"))
            .with_item(ItemDefinition::new("/items/item_b", "Item B"))
            .with_action(
                ActionDefinition::new(CHEESE, "Cheese", 5_000_000_000, 10.0)
                    .with_experience_skill(SMITHING)
                    .with_input("/items/item_a", 2)
                    .with_input("/items/item_b", 3),
            )
            .with_action(
                ActionDefinition::new(COW, "Cow", 6_000_000_000, 10.0)
                    .with_experience_skill(MILKING),
            )
    }

    fn boosted() -> CharacterSnapshot {
        CharacterSnapshot::default()
            .with_boost(ActiveBoost::new(CHEESE, BoostCategory::ActionSpeed, 0.25))
            .with_boost(ActiveBoost::new(CHEESE, BoostCategory::Efficiency, 0.25))
    }

    #[test]
    fn resource_bounded_report() {
        let tables = tables();
        let snapshot = boosted();
        let event = CompletedActionEvent::new(CHEESE, 7)
            .with_skill(SMITHING, 40.0)
            .with_item("/items/item_a", 100)
            .with_item("/items/item_b", 90);

        let report = ProjectionBuilder::new(&tables, &snapshot).build(&event).unwrap();

        assert_eq!(report.skill_name, "Cheesesmithing");
        assert_eq!(report.action_name, "Cheese");
        assert_eq!(report.current_level, 1);
        assert_eq!(report.seconds_per_action, 4.0);
        assert_eq!(report.efficiency_boost, 0.25);

        // 3600 / 4.0 = 900 per hour, a quarter of them free
        assert_eq!(report.hourly.actions, 900);
        assert_eq!(report.hourly.skipped_actions, 225);
        assert_eq!(report.hourly.experience, 9_000.0);

        // 76 - 40 = 36 experience = 3.6 completions, 2.7 of them timed
        assert_eq!(report.next_level.experience_remaining, 36.0);
        assert!((report.next_level.actions - 3.6).abs() < 1e-9);
        assert!((report.next_level.effective_actions - 2.7).abs() < 1e-9);
        assert!((report.next_level.seconds - 10.8).abs() < 1e-9);

        // min(100 / 2, 90 / 3) = 30 completions
        let exhaustion = report.exhaustion.unwrap();
        assert_eq!(exhaustion.remaining_actions, 30.0);
        assert_eq!(exhaustion.limiting_item_hrid.as_deref(), Some("/items/item_b"));
        assert_eq!(exhaustion.remaining_seconds, 90.0);
        assert_eq!(exhaustion.skipped_actions, 8);
        assert_eq!(exhaustion.experience_gained, 300.0);
        assert_eq!(exhaustion.projected_level, 5);

        assert_eq!(report.progress, None);
    }

    #[test]
    fn count_bounded_report_includes_progress() {
        let tables = tables();
        let snapshot = CharacterSnapshot::default();
        let event = CompletedActionEvent::new(COW, 40)
            .with_max_count(100)
            .with_skill(MILKING, 40.0);

        let report = ProjectionBuilder::new(&tables, &snapshot).build(&event).unwrap();

        assert_eq!(report.seconds_per_action, 6.0);
        assert_eq!(report.hourly.actions, 600);

        let exhaustion = report.exhaustion.unwrap();
        assert_eq!(exhaustion.remaining_actions, 60.0);
        assert_eq!(exhaustion.limiting_item_hrid, None);
        assert_eq!(exhaustion.experience_gained, 600.0);
        assert_eq!(exhaustion.projected_level, 8);

        assert_eq!(
            report.progress,
            Some(CompletionProgress {
                current: 40,
                max: 100,
            })
        );
    }

    #[test]
    fn undetermined_remaining_omits_exhaustion() {
        let tables = tables();
        let snapshot = CharacterSnapshot::default();
        let event = CompletedActionEvent::new(COW, 3).with_skill(MILKING, 0.0);

        let report = ProjectionBuilder::new(&tables, &snapshot).build(&event).unwrap();

        assert_eq!(report.exhaustion, None);
        assert_eq!(report.progress, None);
    }

    #[test]
    fn zero_efficiency_skips_nothing() {
        let tables = tables();
        let snapshot = CharacterSnapshot::default()
            .with_boost(ActiveBoost::new(CHEESE, BoostCategory::ActionSpeed, 0.25));
        let event = CompletedActionEvent::new(CHEESE, 1)
            .with_skill(SMITHING, 40.0)
            .with_item("/items/item_a", 10)
            .with_item("/items/item_b", 9);

        let report = ProjectionBuilder::new(&tables, &snapshot).build(&event).unwrap();

        assert_eq!(report.efficiency_boost, 0.0);
        assert_eq!(report.hourly.skipped_actions, 0);
        assert_eq!(report.next_level.effective_actions, report.next_level.actions);
        assert_eq!(report.exhaustion.unwrap().skipped_actions, 0);
    }

    #[test]
    fn multi_skill_events_are_unsupported() {
        let tables = tables();
        let snapshot = boosted();
        let event = CompletedActionEvent::new(CHEESE, 1)
            .with_skill(SMITHING, 40.0)
            .with_skill(MILKING, 40.0);

        assert_eq!(
            ProjectionBuilder::new(&tables, &snapshot).build(&event),
            Err(ProjectionError::UnsupportedMultiSkillAction {
                action_hrid: CHEESE.to_owned(),
                skill_count: 2,
            })
        );

        let no_skill = CompletedActionEvent::new(CHEESE, 1);
        assert!(matches!(
            ProjectionBuilder::new(&tables, &snapshot).build(&no_skill),
            Err(ProjectionError::UnsupportedMultiSkillAction { skill_count: 0, .. })
        ));
    }

    #[test]
    fn unknown_action_is_propagated() {
        let tables = tables();
        let snapshot = boosted();
        let event = CompletedActionEvent::new("/actions/brewing/tea", 1).with_skill(SMITHING, 1.0);

        assert_eq!(
            ProjectionBuilder::new(&tables, &snapshot).build(&event),
            Err(ProjectionError::UnknownIdentifier {
                kind: DefinitionKind::Action,
                hrid: "/actions/brewing/tea".to_owned(),
            })
        );
    }

    #[test]
    fn uninitialized_store_fails_fast() {
        let store = ReferenceStore::new();
        let snapshot = boosted();
        let event = CompletedActionEvent::new(CHEESE, 1).with_skill(SMITHING, 1.0);

        assert_eq!(
            ProjectionBuilder::new(&store, &snapshot).build(&event),
            Err(ProjectionError::UninitializedReferenceData(
                ReferencePart::Definitions
            ))
        );
    }

    #[test]
    fn projected_level_past_the_table_is_propagated() {
        let tables = tables();
        let snapshot = CharacterSnapshot::default();
        let event = CompletedActionEvent::new(COW, 0)
            .with_max_count(100)
            .with_skill(MILKING, 900.0);

        assert_eq!(
            ProjectionBuilder::new(&tables, &snapshot).build(&event),
            Err(ProjectionError::ExperienceOutOfRange {
                experience: 1_900.0
            })
        );
    }

    #[test]
    fn failed_event_does_not_affect_the_next_one() {
        let tables = tables();
        let snapshot = boosted();
        let builder = ProjectionBuilder::new(&tables, &snapshot);

        let broken = CompletedActionEvent::new(CHEESE, 5)
            .with_max_count(2)
            .with_skill(SMITHING, 40.0);
        assert!(matches!(
            builder.build(&broken),
            Err(ProjectionError::NegativeRemainingCount { .. })
        ));

        let healthy = CompletedActionEvent::new(CHEESE, 1)
            .with_max_count(2)
            .with_skill(SMITHING, 40.0);
        assert_eq!(builder.build(&healthy).unwrap().exhaustion.unwrap().remaining_actions, 1.0);
    }
}
