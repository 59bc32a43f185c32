//! Routes inbound messages to the reference store, the character snapshot,
//! or the projection builder.
//!
//! Messages are handled one at a time, to completion, in arrival order. The
//! dispatcher is the only owner of mutable overlay state; the builder only
//! ever sees shared borrows of it.

use overlay_content::{InboundMessage, MessageDecoder};
use overlay_core::{
    CharacterSnapshot, CompletedActionEvent, OverlayConfig, OverlayError, ProjectionBuilder,
    ProjectionError, ProjectionReport, ReferencePart, ReferenceStore, ReferenceTables,
};
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::events::{CharacterEvent, Event, EventBus, ProjectionEvent, ReferenceEvent, Topic};

/// What handling one message did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    ReferenceLoaded,
    SnapshotReplaced,
    Projected(Box<ProjectionReport>),

    /// The action changed a number of skills other than one; skipped.
    Unsupported { action_hrid: String, skill_count: usize },

    Ignored { tag: String },
}

pub struct Dispatcher {
    decoder: MessageDecoder,
    store: ReferenceStore,
    snapshot: Option<CharacterSnapshot>,
    bus: EventBus,
}

impl Dispatcher {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            bus: EventBus::with_capacity(config.bus_capacity),
            decoder: MessageDecoder::new(config.tags),
            store: ReferenceStore::new(),
            snapshot: None,
        }
    }

    /// Starts with reference tables already loaded, e.g. from a saved dump.
    #[must_use]
    pub fn with_reference(mut self, tables: ReferenceTables) -> Self {
        self.load_reference(tables);
        self
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn snapshot(&self) -> Option<&CharacterSnapshot> {
        self.snapshot.as_ref()
    }

    /// Decodes and handles one raw message.
    ///
    /// # Errors
    ///
    /// Decode failures, and projection failures other than unsupported
    /// multi-skill actions. Either way the error concerns this message only.
    pub fn handle_message(&mut self, raw: &str) -> Result<Dispatch> {
        let message = self.decoder.decode(raw).inspect_err(|err| {
            warn!(code = err.error_code(), error = %err, "dropping undecodable message");
        })?;
        self.dispatch(message)
    }

    pub fn dispatch(&mut self, message: InboundMessage) -> Result<Dispatch> {
        match message {
            InboundMessage::ClientInfo(tables) => Ok(self.load_reference(tables)),
            InboundMessage::CharacterInfo(snapshot) => Ok(self.replace_snapshot(snapshot)),
            InboundMessage::ActionCompleted(event) => self.project(&event),
            InboundMessage::Ignored { tag } => {
                trace!(tag, "ignoring message");
                Ok(Dispatch::Ignored { tag })
            }
        }
    }

    /// Replaces the reference tables wholesale.
    pub fn load_reference(&mut self, tables: ReferenceTables) -> Dispatch {
        for (action, item) in tables.dangling_inputs() {
            warn!(action, item, "action consumes an item missing from the item table");
        }

        let event = ReferenceEvent::loaded(&tables);
        let replaced = self.store.load(tables).is_some();
        info!(?event, replaced, "reference tables loaded");

        self.bus.publish(Event::Reference(event));
        Dispatch::ReferenceLoaded
    }

    /// Replaces the character snapshot wholesale.
    pub fn replace_snapshot(&mut self, snapshot: CharacterSnapshot) -> Dispatch {
        let boosts = snapshot.boosts.len();
        let replaced = self.snapshot.replace(snapshot).is_some();
        info!(boosts, replaced, "character snapshot loaded");

        self.bus
            .publish(Event::Character(CharacterEvent::SnapshotReplaced { boosts }));
        Dispatch::SnapshotReplaced
    }

    /// Builds and publishes the projection for one completed action.
    ///
    /// Exactly one [`ProjectionEvent`] is published per call.
    pub fn project(&self, event: &CompletedActionEvent) -> Result<Dispatch> {
        match self.build(event) {
            Ok(report) => {
                debug!(
                    action = %report.action_hrid,
                    level = report.current_level,
                    seconds_per_action = report.seconds_per_action,
                    "projection built"
                );
                let report = Box::new(report);
                self.bus
                    .publish(Event::Projection(ProjectionEvent::Built(report.clone())));
                Ok(Dispatch::Projected(report))
            }
            Err(error) => {
                self.bus.publish(Event::Projection(ProjectionEvent::Rejected {
                    action_hrid: event.action_hrid.clone(),
                    error: error.clone(),
                }));

                match error {
                    ProjectionError::UnsupportedMultiSkillAction {
                        action_hrid,
                        skill_count,
                    } => {
                        debug!(action = %action_hrid, skill_count, "skipping multi-skill action");
                        Ok(Dispatch::Unsupported {
                            action_hrid,
                            skill_count,
                        })
                    }
                    error => {
                        warn!(
                            action = %event.action_hrid,
                            code = error.error_code(),
                            severity = error.severity().as_str(),
                            error = %error,
                            "dropping action completed event"
                        );
                        Err(error.into())
                    }
                }
            }
        }
    }

    fn build(
        &self,
        event: &CompletedActionEvent,
    ) -> std::result::Result<ProjectionReport, ProjectionError> {
        if !self.store.is_loaded() {
            return Err(ProjectionError::UninitializedReferenceData(
                ReferencePart::Definitions,
            ));
        }
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(ProjectionError::UninitializedReferenceData(
                ReferencePart::CharacterSnapshot,
            ))?;

        ProjectionBuilder::new(&self.store, snapshot).build(event)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
