//! Headless game runner.
//!
//! Plays complete sessions back to back with no roll delay. Every game gets
//! its own dice seeded from the run's base seed, so any single game can be
//! replayed from its recorded seed.

use dice_night::domain::{
    derive_game_seed, GameResult, GameSession, NullSink, PlayerStatistics, SeededDice,
};
use dice_night::errors::domain::DomainError;

/// One resolved turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub round: u8,
    pub player_name: String,
    pub dice: Vec<u8>,
    pub total: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedGame {
    pub seed: u64,
    pub turn_order: Vec<String>,
    pub turns: Vec<TurnRecord>,
    pub result: GameResult,
}

pub struct Simulator {
    roster: Vec<String>,
    base_seed: u64,
    stats: PlayerStatistics,
}

impl Simulator {
    pub fn new(roster: Vec<String>, base_seed: u64) -> Self {
        let stats = PlayerStatistics::new(&roster);
        Self {
            roster,
            base_seed,
            stats,
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Statistics accumulated over every game simulated so far.
    pub fn stats(&self) -> &PlayerStatistics {
        &self.stats
    }

    /// Play game `game_no` (1-based) to completion.
    pub fn simulate_game(&mut self, game_no: u32) -> Result<SimulatedGame, DomainError> {
        let seed = derive_game_seed(self.base_seed, game_no);
        let mut dice = SeededDice::new(Some(seed));
        let mut session = GameSession::start(&self.roster, &mut dice)?;
        let turn_order = session.players().iter().map(|p| p.name.clone()).collect();

        let mut turns = Vec::new();
        loop {
            let round = session.round();
            let resolved = session.roll_for_current_player(&mut dice, &mut self.stats, &mut NullSink)?;
            turns.push(TurnRecord {
                round,
                player_name: resolved.player_name,
                dice: resolved.roll.faces,
                total: resolved.roll.total,
            });
            if let Some(result) = resolved.game_over {
                return Ok(SimulatedGame {
                    seed,
                    turn_order,
                    turns,
                    result,
                });
            }
        }
    }
}
