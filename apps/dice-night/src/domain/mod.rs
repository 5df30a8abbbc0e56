//! Domain layer: pure game logic types and helpers.

pub mod dice;
pub mod events;
pub mod roll;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod session;
pub mod state;
pub mod statistics;
pub mod turn_order;

#[cfg(test)]
mod tests_props_session;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use dice::{RandomSource, ScriptedDice, SeededDice};
pub use events::{EventSink, GameEvent, NullSink};
pub use roll::{DiceRoll, DieSpin};
pub use rules::{default_roster, DEFAULT_ROSTER, MAX_ROUNDS, PLAYERS};
pub use seed_derivation::derive_game_seed;
pub use session::{GameResult, GameSession, ResolvedRoll};
pub use state::{PhaseKind, Player, SessionPhase, SessionSnapshot, Standing};
pub use statistics::{PlayerRecord, PlayerStatistics, WinRate};
