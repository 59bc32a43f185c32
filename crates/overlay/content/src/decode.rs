//! Tag-based decoding of inbound messages.

use overlay_core::{
    CharacterSnapshot, CompletedActionEvent, ErrorSeverity, MessageTags, OverlayError,
    ReferenceError, ReferenceTables,
};
use serde::de::DeserializeOwned;

use crate::wire::{ActionCompletedMessage, CharacterInfoMessage, ClientInfoMessage, Envelope};

/// A decoded message, ready for the runtime.
#[derive(Debug, Clone)]
pub enum InboundMessage {
    ClientInfo(ReferenceTables),
    CharacterInfo(CharacterSnapshot),
    ActionCompleted(CompletedActionEvent),

    /// Any tag the overlay does not consume.
    Ignored { tag: String },
}

/// Errors raised while decoding one message. Later messages are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not JSON or carries no string `type` field.
    #[error("message has no readable type tag: {0}")]
    Envelope(#[source] serde_json::Error),

    /// A consumed tag carried a payload of the wrong shape.
    #[error("malformed '{tag}' message: {source}")]
    Malformed {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client info tables failed validation.
    #[error("invalid reference data: {0}")]
    Reference(#[from] ReferenceError),
}

impl OverlayError for DecodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            DecodeError::Envelope(_) => "DECODE_ENVELOPE",
            DecodeError::Malformed { .. } => "DECODE_MALFORMED",
            DecodeError::Reference(_) => "DECODE_REFERENCE",
        }
    }
}

/// Routes raw JSON text to the decoder registered for its `type` tag.
#[derive(Debug, Clone, Default)]
pub struct MessageDecoder {
    tags: MessageTags,
}

impl MessageDecoder {
    pub fn new(tags: MessageTags) -> Self {
        Self { tags }
    }

    /// Decodes one raw message.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`]. Unknown tags are not errors; they decode to
    /// [`InboundMessage::Ignored`] without looking at the payload.
    pub fn decode(&self, raw: &str) -> Result<InboundMessage, DecodeError> {
        let Envelope { kind } = serde_json::from_str(raw).map_err(DecodeError::Envelope)?;

        if kind == self.tags.client_info {
            let message: ClientInfoMessage = parse(raw, &kind)?;
            let tables = ReferenceTables::try_from(message)?;
            Ok(InboundMessage::ClientInfo(tables))
        } else if kind == self.tags.character_info {
            let message: CharacterInfoMessage = parse(raw, &kind)?;
            Ok(InboundMessage::CharacterInfo(message.into()))
        } else if kind == self.tags.action_completed {
            let message: ActionCompletedMessage = parse(raw, &kind)?;
            Ok(InboundMessage::ActionCompleted(message.into()))
        } else {
            Ok(InboundMessage::Ignored { tag: kind })
        }
    }
}

fn parse<T: DeserializeOwned>(raw: &str, tag: &str) -> Result<T, DecodeError> {
    serde_json::from_str(raw).map_err(|source| DecodeError::Malformed {
        tag: tag.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::{BoostCategory, ReferenceOracle};
    use serde_json::json;

    fn decoder() -> MessageDecoder {
        MessageDecoder::default()
    }

    #[test]
    fn client_info_builds_reference_tables() {
        let raw = json!({
            "type": "init_client_info",
            "skillDetailMap": {
                "/skills/milking": {"hrid": "/skills/milking", "name": "Milking", "sortIndex": 1}
            },
            "itemDetailMap": {
                "/items/milk": {"hrid": "/items/milk", "name": "Milk", "sellPrice": 1}
            },
            "actionDetailMap": {
                "/actions/milking/cow": {
                    "hrid": "/actions/milking/cow",
                    "name": "Cow",
                    "baseTimeCost": 6_000_000_000u64,
                    "experienceGain": {"skillHrid": "/skills/milking", "value": 10},
                    "inputItems": null,
                    "dropTable": []
                },
                "/actions/cheesesmithing/cheese": {
                    "hrid": "/actions/cheesesmithing/cheese",
                    "name": "Cheese",
                    "baseTimeCost": 10_000_000_000u64,
                    "experienceGain": {"skillHrid": "/skills/cheesesmithing", "value": 8.5},
                    "inputItems": [{"itemHrid": "/items/milk", "count": 2}]
                }
            },
            "levelExperienceTable": [0, 33, 76, 132]
        })
        .to_string();

        let InboundMessage::ClientInfo(tables) = decoder().decode(&raw).unwrap() else {
            panic!("expected client info");
        };

        assert_eq!(tables.skill_count(), 1);
        assert_eq!(tables.item_count(), 1);
        assert_eq!(tables.skill("/skills/milking").unwrap().display_name, "Milking");

        let cow = tables.action("/actions/milking/cow").unwrap();
        assert_eq!(cow.base_duration_nanos, 6_000_000_000);
        assert_eq!(cow.experience_gain, 10.0);
        assert_eq!(cow.input_items, None);

        let cheese = tables.action("/actions/cheesesmithing/cheese").unwrap();
        assert_eq!(cheese.experience_gain, 8.5);
        assert_eq!(
            cheese.experience_skill_hrid.as_deref(),
            Some("/skills/cheesesmithing")
        );
        assert_eq!(cheese.inputs().collect::<Vec<_>>(), vec![("/items/milk", 2)]);

        assert_eq!(tables.level_for_experience(40.0), Ok(1));
    }

    #[test]
    fn invalid_level_table_rejects_the_client_info() {
        let raw = json!({
            "type": "init_client_info",
            "levelExperienceTable": [0, 50, 40]
        })
        .to_string();

        assert!(matches!(
            decoder().decode(&raw),
            Err(DecodeError::Reference(
                ReferenceError::NonIncreasingLevelTable { level: 2, .. }
            ))
        ));
    }

    #[test]
    fn character_info_flattens_boosts_per_action() {
        let raw = json!({
            "type": "init_character_info",
            "skillingActionBuffsMap": {
                "/actions/milking/cow": [
                    {"uniqueHrid": "/buff_uniques/tea", "typeHrid": "/buff_types/efficiency", "ratioBoost": 0.1, "flatBoost": 0},
                    {"uniqueHrid": "/buff_uniques/brush", "typeHrid": "/buff_types/action_speed", "ratioBoost": 0.15}
                ],
                "/actions/foraging/egg": null,
                "/actions/woodcutting/tree": [
                    {"typeHrid": "/buff_types/wisdom", "ratioBoost": 0.05}
                ]
            }
        })
        .to_string();

        let InboundMessage::CharacterInfo(snapshot) = decoder().decode(&raw).unwrap() else {
            panic!("expected character info");
        };

        assert_eq!(snapshot.boosts.len(), 3);
        assert_eq!(
            snapshot.ratio_boost("/actions/milking/cow", &BoostCategory::Efficiency),
            0.1
        );
        assert_eq!(
            snapshot.ratio_boost("/actions/milking/cow", &BoostCategory::ActionSpeed),
            0.15
        );
        assert_eq!(
            snapshot.ratio_boost("/actions/foraging/egg", &BoostCategory::Efficiency),
            0.0
        );
    }

    #[test]
    fn action_completed_maps_count_and_inventory() {
        let raw = json!({
            "type": "action_completed",
            "endCharacterAction": {
                "actionHrid": "/actions/cheesesmithing/cheese",
                "hasMaxCount": true,
                "maxCount": 100,
                "currentCount": 40,
                "isDone": false
            },
            "endCharacterSkills": [
                {"skillHrid": "/skills/cheesesmithing", "experience": 1234.5, "level": 12}
            ],
            "endCharacterItems": [
                {"itemHrid": "/items/milk", "count": 58, "itemLocationHrid": "/item_locations/inventory"}
            ]
        })
        .to_string();

        let InboundMessage::ActionCompleted(event) = decoder().decode(&raw).unwrap() else {
            panic!("expected action completed");
        };

        assert_eq!(event.action_hrid, "/actions/cheesesmithing/cheese");
        assert_eq!(event.current_count, 40);
        assert_eq!(event.max_count, Some(100));
        assert_eq!(event.affected_skills.len(), 1);
        assert_eq!(event.affected_skills[0].experience, 1234.5);
        assert_eq!(event.available("/items/milk"), 58);
    }

    #[test]
    fn uncapped_action_with_null_lists() {
        let raw = json!({
            "type": "action_completed",
            "endCharacterAction": {
                "actionHrid": "/actions/milking/cow",
                "hasMaxCount": false,
                "maxCount": 0,
                "currentCount": 3
            },
            "endCharacterSkills": null,
            "endCharacterItems": null
        })
        .to_string();

        let InboundMessage::ActionCompleted(event) = decoder().decode(&raw).unwrap() else {
            panic!("expected action completed");
        };

        assert_eq!(event.max_count, None);
        assert!(event.affected_skills.is_empty());
        assert!(event.inventory.is_empty());
    }

    #[test]
    fn unknown_tags_are_ignored_without_parsing_the_payload() {
        let raw = r#"{"type": "chat_message_received", "message": {"unexpected": [1, 2]}}"#;

        assert!(matches!(
            decoder().decode(raw),
            Ok(InboundMessage::Ignored { tag }) if tag == "chat_message_received"
        ));
    }

    #[test]
    fn malformed_payloads_are_reported() {
        assert!(matches!(
            decoder().decode("not json"),
            Err(DecodeError::Envelope(_))
        ));
        assert!(matches!(
            decoder().decode(r#"{"payload": 1}"#),
            Err(DecodeError::Envelope(_))
        ));

        let err = decoder()
            .decode(r#"{"type": "action_completed", "endCharacterAction": 7}"#)
            .unwrap_err();
        assert!(matches!(&err, DecodeError::Malformed { tag, .. } if tag == "action_completed"));
        assert_eq!(err.error_code(), "DECODE_MALFORMED");
    }

    #[test]
    fn custom_tags_select_decoders() {
        let tags = MessageTags {
            action_completed: "action_done".to_owned(),
            ..MessageTags::default()
        };
        let raw = json!({
            "type": "action_done",
            "endCharacterAction": {"actionHrid": "/actions/milking/cow", "currentCount": 1}
        })
        .to_string();

        assert!(matches!(
            MessageDecoder::new(tags).decode(&raw),
            Ok(InboundMessage::ActionCompleted(_))
        ));
        assert!(matches!(
            decoder().decode(&raw),
            Ok(InboundMessage::Ignored { .. })
        ));
    }
}
