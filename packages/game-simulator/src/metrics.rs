//! Per-game metrics for simulation output.

use dice_night::domain::{Standing, MAX_ROUNDS};
use serde::Serialize;

use crate::simulator::SimulatedGame;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: GameResultMetrics,
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub roster: Vec<String>,
    pub base_seed: u64,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub turn_order: Vec<String>,
    pub final_rankings: Vec<Standing>,
    pub winners: Vec<String>,
    pub winning_score: u16,
    pub tie: bool,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u8,
    pub rolls: Vec<RollMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollMetrics {
    pub player: String,
    pub dice: Vec<u8>,
    pub total: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub name: String,
    /// 0-based position in this game's turn order.
    pub seat: u8,
    pub total_score: u16,
    pub best_roll: u16,
    pub worst_roll: u16,
    pub avg_roll: f64,
}

/// One row of the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winners: String,
    pub winning_score: u16,
    pub first_player: String,
    pub rank1_name: String,
    pub rank1_score: u16,
    pub rank2_name: String,
    pub rank2_score: u16,
    pub rank3_name: String,
    pub rank3_score: u16,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let rank = |i: usize| {
            m.result
                .final_rankings
                .get(i)
                .map(|s| (s.name.clone(), s.score))
                .unwrap_or_default()
        };
        let (rank1_name, rank1_score) = rank(0);
        let (rank2_name, rank2_score) = rank(1);
        let (rank3_name, rank3_score) = rank(2);
        Self {
            game_id: m.game_id,
            seed: m.seed,
            winners: m.result.winners.join("|"),
            winning_score: m.result.winning_score,
            first_player: m.result.turn_order.first().cloned().unwrap_or_default(),
            rank1_name,
            rank1_score,
            rank2_name,
            rank2_score,
            rank3_name,
            rank3_score,
        }
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    config: RunConfig,
    game: &SimulatedGame,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds = (1..=MAX_ROUNDS)
        .map(|round_no| RoundMetrics {
            round_no,
            rolls: game
                .turns
                .iter()
                .filter(|t| t.round == round_no)
                .map(|t| RollMetrics {
                    player: t.player_name.clone(),
                    dice: t.dice.clone(),
                    total: t.total,
                })
                .collect(),
        })
        .collect();

    let player_metrics = game
        .turn_order
        .iter()
        .enumerate()
        .map(|(seat, name)| build_player_metrics(seat as u8, name, game))
        .collect();

    GameMetrics {
        game_id,
        seed: game.seed,
        timestamp,
        config,
        result: GameResultMetrics {
            turn_order: game.turn_order.clone(),
            final_rankings: game.result.final_rankings.clone(),
            winners: game.result.winners.clone(),
            winning_score: game.result.winning_score,
            tie: game.result.winners.len() > 1,
            duration_ms,
        },
        rounds,
        player_metrics,
    }
}

fn build_player_metrics(seat: u8, name: &str, game: &SimulatedGame) -> PlayerMetrics {
    let totals: Vec<u16> = game
        .turns
        .iter()
        .filter(|t| t.player_name == name)
        .map(|t| t.total)
        .collect();
    let total_score: u16 = totals.iter().sum();
    let avg_roll = if totals.is_empty() {
        0.0
    } else {
        total_score as f64 / totals.len() as f64
    };

    PlayerMetrics {
        name: name.to_string(),
        seat,
        total_score,
        best_roll: totals.iter().copied().max().unwrap_or(0),
        worst_roll: totals.iter().copied().min().unwrap_or(0),
        avg_roll,
    }
}
