//! Presentation events emitted by the session.
//!
//! The presentation adapter renders these; it never mutates game state.

use serde::{Deserialize, Serialize};

use crate::domain::roll::DieSpin;
use crate::domain::state::Standing;
use crate::domain::statistics::WinRate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new session was dealt; paint rankings, banner and history.
    GameStarted {
        turn_order: Vec<String>,
        max_rounds: u8,
        win_rates: Vec<WinRate>,
    },

    /// Dice are in the air. Spin targets are animation hints only.
    RollStarted {
        player_name: String,
        round: u8,
        dice: Vec<DieSpin>,
    },

    RollResolved {
        player_name: String,
        dice: Vec<u8>,
        total: u16,
        rankings: Vec<Standing>,
    },

    /// Not emitted after the final turn.
    TurnAdvanced {
        round: u8,
        current_player_name: String,
    },

    /// Always the last event of a session.
    GameOver {
        final_rankings: Vec<Standing>,
        winners: Vec<String>,
        winning_score: u16,
        win_rates: Vec<WinRate>,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::RollStarted { .. } => "roll_started",
            GameEvent::RollResolved { .. } => "roll_resolved",
            GameEvent::TurnAdvanced { .. } => "turn_advanced",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

/// Destination for presentation events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that drops everything (headless simulation).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
