//! Replay shell for the action overview overlay.
//!
//! Reads newline-delimited captured game messages from a file or stdin,
//! feeds them to an [`overlay_runtime::Dispatcher`] in order, and prints each
//! projection as text or JSON.

pub mod config;
pub mod logging;
pub mod replay;

pub use config::{ClientConfig, OutputFormat};
pub use replay::{ReplayStats, SINK_CAPACITY, replay, run, spawn_sink};
