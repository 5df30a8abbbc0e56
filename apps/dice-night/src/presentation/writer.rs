//! Drains the event channel into an output stream.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::events::GameEvent;
use crate::error::AppError;
use crate::presentation::render::{render_json, render_text, OutputMode};

/// Render every event until the sending side is dropped.
///
/// Flushes after each event so output keeps pace with the roll delay.
/// Returns the number of events written.
pub async fn run_presenter<W>(
    mut events: mpsc::UnboundedReceiver<GameEvent>,
    mode: OutputMode,
    mut out: W,
) -> Result<usize, AppError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(event) = events.recv().await {
        trace!(event = event.name(), "presenting");
        let lines = match mode {
            OutputMode::Text => render_text(&event),
            OutputMode::JsonLines => vec![render_json(&event)?],
        };
        for line in lines {
            out.write_all(line.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
        out.flush().await?;
        written += 1;
    }
    Ok(written)
}
