//! Async runner that puts a fixed presentation delay between starting a roll
//! and resolving it.
//!
//! The table lives inside a single task. Commands arrive over an mpsc channel
//! and are answered on oneshot channels; the pending resolution is a deadline
//! selected alongside the command channel. While the deadline is armed every
//! roll request is rejected without touching state. Dropping every
//! [`TableHandle`] stops the task once any in-flight roll has resolved.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::domain::dice::RandomSource;
use crate::domain::events::{EventSink, GameEvent};
use crate::domain::state::SessionSnapshot;
use crate::domain::statistics::WinRate;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::table::GameTable;

/// Matches the dice animation length.
pub const DEFAULT_ROLL_DELAY: Duration = Duration::from_millis(1500);

const COMMAND_BUFFER: usize = 32;

impl EventSink for mpsc::UnboundedSender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        if self.send(event).is_err() {
            debug!("presentation receiver dropped; event discarded");
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, DomainError>>;

enum TableCommand {
    Start { reply: Reply<SessionSnapshot> },
    Roll { reply: Reply<()> },
    Reset { reply: Reply<SessionSnapshot> },
    Snapshot { reply: oneshot::Sender<Option<SessionSnapshot>> },
    WinRates { reply: oneshot::Sender<Vec<WinRate>> },
}

/// Cloneable front end to a running table.
#[derive(Clone)]
pub struct TableHandle {
    tx: mpsc::Sender<TableCommand>,
}

impl TableHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> TableCommand,
    ) -> Result<T, AppError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| AppError::internal("table task has stopped"))?;
        rx.await
            .map_err(|_| AppError::internal("table task dropped the reply"))
    }

    pub async fn start_game(&self) -> Result<SessionSnapshot, AppError> {
        Ok(self
            .request(|reply| TableCommand::Start { reply })
            .await??)
    }

    /// Start the current player's roll. Resolution follows after the delay.
    ///
    /// `Ok(())` only means the roll was accepted. The resolved roll arrives
    /// later as a `RollResolved` event on the events channel, followed by
    /// `TurnAdvanced` or `GameOver`.
    pub async fn roll_for_current_turn(&self) -> Result<(), AppError> {
        Ok(self.request(|reply| TableCommand::Roll { reply }).await??)
    }

    pub async fn reset_game(&self) -> Result<SessionSnapshot, AppError> {
        Ok(self
            .request(|reply| TableCommand::Reset { reply })
            .await??)
    }

    pub async fn snapshot(&self) -> Result<Option<SessionSnapshot>, AppError> {
        self.request(|reply| TableCommand::Snapshot { reply }).await
    }

    pub async fn win_rates(&self) -> Result<Vec<WinRate>, AppError> {
        self.request(|reply| TableCommand::WinRates { reply }).await
    }
}

/// Spawn the table task on the current runtime.
///
/// The join handle yields the table back once every handle is dropped.
pub fn spawn_table<R>(
    table: GameTable<R>,
    roll_delay: Duration,
    events: mpsc::UnboundedSender<GameEvent>,
) -> (TableHandle, JoinHandle<GameTable<R>>)
where
    R: RandomSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run_table(table, roll_delay, rx, events));
    (TableHandle { tx }, task)
}

async fn run_table<R: RandomSource>(
    mut table: GameTable<R>,
    roll_delay: Duration,
    mut commands: mpsc::Receiver<TableCommand>,
    mut events: mpsc::UnboundedSender<GameEvent>,
) -> GameTable<R> {
    let mut resolve_at: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;

            _ = sleep_until(resolve_at.unwrap_or_else(Instant::now)), if resolve_at.is_some() => {
                resolve_at = None;
                resolve(&mut table, &mut events);
            }

            cmd = commands.recv() => {
                let Some(cmd) = cmd else { break };
                handle(&mut table, cmd, roll_delay, &mut resolve_at, &mut events);
            }
        }
    }

    // No cancellation: an armed roll still lands before the task exits.
    if let Some(deadline) = resolve_at {
        sleep_until(deadline).await;
        resolve(&mut table, &mut events);
    }
    debug!("table task stopped");
    table
}

fn resolve<R: RandomSource>(table: &mut GameTable<R>, events: &mut mpsc::UnboundedSender<GameEvent>) {
    if let Err(e) = table.resolve_roll(events) {
        // Only reachable if the phase and the deadline disagree.
        warn!(error = %e, "pending roll could not be resolved");
    }
}

fn handle<R: RandomSource>(
    table: &mut GameTable<R>,
    cmd: TableCommand,
    roll_delay: Duration,
    resolve_at: &mut Option<Instant>,
    events: &mut mpsc::UnboundedSender<GameEvent>,
) {
    match cmd {
        TableCommand::Start { reply } => {
            let result = table.start_game(events).map(|s| s.snapshot());
            let _ = reply.send(result);
        }
        TableCommand::Reset { reply } => {
            let result = table.reset_game(events).map(|s| s.snapshot());
            let _ = reply.send(result);
        }
        TableCommand::Roll { reply } => {
            let result = table.begin_roll(events).map(|roll| {
                *resolve_at = Some(Instant::now() + roll_delay);
                debug!(faces = ?roll.faces, delay_ms = roll_delay.as_millis() as u64, "roll armed");
            });
            if let Err(e) = &result {
                debug!(error = %e, "roll request ignored");
            }
            let _ = reply.send(result);
        }
        TableCommand::Snapshot { reply } => {
            let _ = reply.send(table.snapshot());
        }
        TableCommand::WinRates { reply } => {
            let _ = reply.send(table.win_rates());
        }
    }
}
