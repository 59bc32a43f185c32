//! Action overview replay client binary.
//!
//! # Examples
//!
//! ```bash
//! # Replay a capture as text
//! OVERLAY_INPUT=capture.jsonl cargo run -p overlay-client
//!
//! # Stream from stdin, one JSON event per report
//! tail -f capture.jsonl | OVERLAY_OUTPUT=json cargo run -p overlay-client
//! ```

use anyhow::Result;
use overlay_client::{ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!(
        input = ?config.input,
        output = %config.output,
        "starting action overview replay"
    );

    let stats = overlay_client::run(&config).await?;
    if stats.failed > 0 {
        tracing::warn!(failed = stats.failed, "some messages could not be processed");
    }

    Ok(())
}
