/// Tunable parameters shared by the decoders and the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Message `type` tags consumed from the inbound feed.
    pub tags: MessageTags,

    /// Capacity of each topic channel on the runtime event bus.
    pub bus_capacity: usize,
}

impl OverlayConfig {
    pub const DEFAULT_BUS_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            tags: MessageTags::default(),
            bus_capacity: Self::DEFAULT_BUS_CAPACITY,
        }
    }

    pub fn with_bus_capacity(bus_capacity: usize) -> Self {
        Self {
            bus_capacity,
            ..Self::new()
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The `type` field values that select a message decoder.
///
/// Every other tag is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MessageTags {
    pub client_info: String,
    pub character_info: String,
    pub action_completed: String,
}

impl MessageTags {
    pub const CLIENT_INFO: &'static str = "init_client_info";
    pub const CHARACTER_INFO: &'static str = "init_character_info";
    pub const ACTION_COMPLETED: &'static str = "action_completed";
}

impl Default for MessageTags {
    fn default() -> Self {
        Self {
            client_info: Self::CLIENT_INFO.to_owned(),
            character_info: Self::CHARACTER_INFO.to_owned(),
            action_completed: Self::ACTION_COMPLETED.to_owned(),
        }
    }
}
