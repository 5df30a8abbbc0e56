use serde::{Deserialize, Serialize};

use crate::domain::roll::DiceRoll;

/// A roster member taking part in the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Cumulative score across rounds.
    pub score: u16,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub score: u16,
}

impl From<&Player> for Standing {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            score: p.score,
        }
    }
}

/// Session progression.
///
/// - `Idle`: waiting for the current player to roll.
/// - `RollInFlight`: dice are rolled and animating; further rolls are rejected.
/// - `Over`: every player has taken all of their turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    RollInFlight { pending: DiceRoll },
    Over,
}

/// Phase without its payload, for snapshots and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Idle,
    RollInFlight,
    Over,
}

impl SessionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::Idle => PhaseKind::Idle,
            SessionPhase::RollInFlight { .. } => PhaseKind::RollInFlight,
            SessionPhase::Over => PhaseKind::Over,
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Players in turn order with their scores.
    pub turn_order: Vec<Standing>,
    /// `None` once the game is over.
    pub current_player: Option<String>,
    pub round: u8,
    pub max_rounds: u8,
    pub phase: PhaseKind,
}

/// Index of the next seat, wrapping at `players`.
#[inline]
pub fn next_seat(seat: usize, players: usize) -> usize {
    debug_assert!(players > 0, "a session always has players");
    (seat + 1) % players
}
