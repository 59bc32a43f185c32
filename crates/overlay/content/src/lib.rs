//! Wire formats and loaders for the inbound game feed.
//!
//! This crate turns the game's JSON messages into `overlay-core` types:
//! - Client info (skill, action, item tables and the level curve)
//! - Character info (active skilling boosts)
//! - Action completed events
//!
//! The [`loaders`] module reads configuration (TOML) and saved client info
//! dumps (JSON) from disk.

pub mod decode;
pub mod wire;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use decode::{DecodeError, InboundMessage, MessageDecoder};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ReferenceLoader};
