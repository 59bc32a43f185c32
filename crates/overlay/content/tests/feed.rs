use overlay_content::{InboundMessage, MessageDecoder};
use overlay_core::{
    CharacterSnapshot, CompletedActionEvent, ProjectionBuilder, ReferenceStore, ReferenceTables,
};
use serde_json::json;

fn decode(decoder: &MessageDecoder, message: serde_json::Value) -> InboundMessage {
    decoder.decode(&message.to_string()).unwrap()
}

fn tables(decoder: &MessageDecoder) -> ReferenceTables {
    let message = json!({
        "type": "init_client_info",
        "skillDetailMap": {
            "/skills/foraging": {"hrid": "/skills/foraging", "name": "Foraging"}
        },
        "itemDetailMap": {},
        "actionDetailMap": {
            "/actions/foraging/egg": {
                "hrid": "/actions/foraging/egg",
                "name": "Egg",
                "baseTimeCost": 3_000_000_000u64,
                "experienceGain": {"skillHrid": "/skills/foraging", "value": 4}
            }
        },
        "levelExperienceTable": [0, 33, 76, 132, 202]
    });
    match decode(decoder, message) {
        InboundMessage::ClientInfo(tables) => tables,
        other => panic!("expected client info, got {other:?}"),
    }
}

fn snapshot(decoder: &MessageDecoder) -> CharacterSnapshot {
    let message = json!({
        "type": "init_character_info",
        "skillingActionBuffsMap": {
            "/actions/foraging/egg": [
                {"typeHrid": "/buff_types/action_speed", "ratioBoost": -0.25},
                {"typeHrid": "/buff_types/efficiency", "ratioBoost": 0.5}
            ]
        }
    });
    match decode(decoder, message) {
        InboundMessage::CharacterInfo(snapshot) => snapshot,
        other => panic!("expected character info, got {other:?}"),
    }
}

fn event(decoder: &MessageDecoder, current: u64) -> CompletedActionEvent {
    let message = json!({
        "type": "action_completed",
        "endCharacterAction": {
            "actionHrid": "/actions/foraging/egg",
            "hasMaxCount": true,
            "maxCount": 20,
            "currentCount": current
        },
        "endCharacterSkills": [{"skillHrid": "/skills/foraging", "experience": 100.0}]
    });
    match decode(decoder, message) {
        InboundMessage::ActionCompleted(event) => event,
        other => panic!("expected action completed, got {other:?}"),
    }
}

#[test]
fn decoded_feed_projects_end_to_end() {
    let decoder = MessageDecoder::default();
    let store = ReferenceStore::loaded(tables(&decoder));
    let snapshot = snapshot(&decoder);
    let builder = ProjectionBuilder::new(&store, &snapshot);

    let report = builder.build(&event(&decoder, 12)).unwrap();

    // 3 s slowed by a negative speed boost: 3 / 0.75 = 4 s.
    assert_eq!(report.seconds_per_action, 4.0);
    assert_eq!(report.efficiency_boost, 0.5);
    assert_eq!(report.hourly.actions, 900);
    assert_eq!(report.hourly.skipped_actions, 450);
    assert_eq!(report.current_level, 2);

    // 132 - 100 = 32 experience, 8 actions, 4 after efficiency, 16 s.
    assert_eq!(report.next_level.actions, 8.0);
    assert_eq!(report.next_level.effective_actions, 4.0);
    assert_eq!(report.next_level.seconds, 16.0);

    let exhaustion = report.exhaustion.unwrap();
    assert_eq!(exhaustion.remaining_actions, 8.0);
    assert_eq!(exhaustion.remaining_seconds, 16.0);
    assert_eq!(exhaustion.skipped_actions, 4);
    assert_eq!(exhaustion.projected_level, 3);
}

#[test]
fn over_cap_event_is_rejected_without_affecting_later_events() {
    let decoder = MessageDecoder::default();
    let store = ReferenceStore::loaded(tables(&decoder));
    let snapshot = snapshot(&decoder);
    let builder = ProjectionBuilder::new(&store, &snapshot);

    assert!(builder.build(&event(&decoder, 21)).is_err());
    assert!(builder.build(&event(&decoder, 20)).is_ok());
}
