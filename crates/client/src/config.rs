//! Replay client configuration.
use std::env;
use std::path::PathBuf;

/// How reports are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Grouped human-readable lines.
    #[default]
    Text,
    /// One JSON projection event per line.
    Json,
}

/// Configuration required to run a replay session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// TOML file with an `OverlayConfig`; defaults apply when unset.
    pub overlay_config: Option<PathBuf>,
    /// Saved client info message loaded before the feed starts.
    pub reference: Option<PathBuf>,
    /// Newline-delimited capture; stdin when unset.
    pub input: Option<PathBuf>,
    pub output: OutputFormat,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OVERLAY_CONFIG` - Overlay TOML config path (default: built-in tags)
    /// - `OVERLAY_REFERENCE` - Saved client info JSON to preload (optional)
    /// - `OVERLAY_INPUT` - Capture file to replay (default: stdin)
    /// - `OVERLAY_OUTPUT` - `text` or `json` (default: text)
    /// - `OVERLAY_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `OVERLAY_LOG_DIR` - Log directory (default: platform cache directory)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            overlay_config: path("OVERLAY_CONFIG"),
            reference: path("OVERLAY_REFERENCE"),
            input: path("OVERLAY_INPUT"),
            output: read_var(&lookup, "OVERLAY_OUTPUT").unwrap_or_default(),
            session_id: lookup("OVERLAY_SESSION_ID").filter(|v| !v.is_empty()),
            log_dir: path("OVERLAY_LOG_DIR"),
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
