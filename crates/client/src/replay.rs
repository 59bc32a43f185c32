//! Replays a captured message feed through the dispatcher.
//!
//! Projection events are drained from the dispatcher's bus after every
//! message and forwarded over a bounded channel to a blocking writer, so the
//! replay waits for the writer instead of dropping reports.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use overlay_content::{ConfigLoader, ReferenceLoader};
use overlay_core::{OverlayConfig, OverlayError};
use overlay_runtime::{Dispatch, Dispatcher, Event, ProjectionEvent, Topic, render_text};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{ClientConfig, OutputFormat};

/// Reports buffered between the replay loop and the writer.
pub const SINK_CAPACITY: usize = 32;

/// Tally of one replay session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub messages: usize,
    pub projected: usize,
    pub unsupported: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Builds the dispatcher described by `config`, replays its input, and
/// prints every projection event to stdout.
pub async fn run(config: &ClientConfig) -> Result<ReplayStats> {
    let overlay_config = match &config.overlay_config {
        Some(path) => ConfigLoader::load(path)?,
        None => OverlayConfig::default(),
    };

    let mut dispatcher = Dispatcher::new(overlay_config);
    if let Some(path) = &config.reference {
        dispatcher = dispatcher.with_reference(ReferenceLoader::load(path)?);
    }

    let (reports, rx) = mpsc::channel(SINK_CAPACITY);
    let sink = spawn_sink(rx, config.output, std::io::stdout());

    let replayed = match &config.input {
        Some(path) => replay_file(path, &mut dispatcher, &reports).await,
        None => replay(BufReader::new(tokio::io::stdin()), &mut dispatcher, &reports).await,
    };

    // Closing the channel lets the writer drain and finish.
    drop(reports);
    sink.await.context("report sink task failed")??;

    replayed
}

async fn replay_file(
    path: &Path,
    dispatcher: &mut Dispatcher,
    reports: &mpsc::Sender<ProjectionEvent>,
) -> Result<ReplayStats> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open capture {}", path.display()))?;
    replay(BufReader::new(file), dispatcher, reports).await
}

/// Feeds every non-blank line of `reader` to the dispatcher, in order, and
/// forwards each projection event to `reports`.
///
/// Failures are per message; only I/O errors and a closed sink stop the
/// replay.
pub async fn replay<R>(
    reader: R,
    dispatcher: &mut Dispatcher,
    reports: &mpsc::Sender<ProjectionEvent>,
) -> Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut projections = dispatcher.subscribe(Topic::Projection);
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read capture")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        stats.messages += 1;
        match dispatcher.handle_message(line) {
            Ok(Dispatch::Projected(_)) => stats.projected += 1,
            Ok(Dispatch::Unsupported { .. }) => stats.unsupported += 1,
            Ok(Dispatch::Ignored { .. }) => stats.ignored += 1,
            Ok(Dispatch::ReferenceLoaded | Dispatch::SnapshotReplaced) => {}
            Err(err) => {
                // Already logged by the dispatcher with full context.
                tracing::debug!(line = stats.messages, code = err.error_code(), "message failed");
                stats.failed += 1;
            }
        }

        // At most one projection event per message, so the bus never lags here.
        loop {
            match projections.try_recv() {
                Ok(Event::Projection(event)) => reports
                    .send(event)
                    .await
                    .context("report sink closed before the replay finished")?,
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "projection events dropped before forwarding");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    tracing::info!(?stats, "replay finished");
    Ok(stats)
}

/// Writes projection events to `out` on the blocking pool until every
/// sender is dropped.
pub fn spawn_sink<W>(
    mut rx: mpsc::Receiver<ProjectionEvent>,
    format: OutputFormat,
    mut out: W,
) -> JoinHandle<Result<()>>
where
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<()> {
        while let Some(event) = rx.blocking_recv() {
            write_event(&mut out, &event, format)?;
        }
        out.flush()?;
        Ok(())
    })
}

fn write_event<W: Write>(out: &mut W, event: &ProjectionEvent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, event)?;
            writeln!(out)?;
        }
        OutputFormat::Text => match event {
            ProjectionEvent::Built(report) => writeln!(out, "{}\n", render_text(report))?,
            ProjectionEvent::Rejected { action_hrid, error } => {
                writeln!(out, "No overview for [{action_hrid}]: {error}\n")?;
            }
        },
    }
    Ok(())
}
