//! Event types for different topics.

use overlay_core::{ProjectionError, ProjectionReport, ReferenceTables};
use serde::{Deserialize, Serialize};

/// Emitted when a client info message replaces the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceEvent {
    Loaded {
        skills: usize,
        actions: usize,
        items: usize,
        levels: usize,
    },
}

impl ReferenceEvent {
    pub fn loaded(tables: &ReferenceTables) -> Self {
        ReferenceEvent::Loaded {
            skills: tables.skill_count(),
            actions: tables.action_count(),
            items: tables.item_count(),
            levels: tables.levels().level_count(),
        }
    }
}

/// Emitted when a character info message replaces the boost snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    SnapshotReplaced { boosts: usize },
}

/// Exactly one of these is published per accepted action completed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectionEvent {
    Built(Box<ProjectionReport>),

    /// No report could be built for this event; later events are unaffected.
    Rejected {
        action_hrid: String,
        error: ProjectionError,
    },
}
