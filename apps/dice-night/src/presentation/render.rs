//! Event → display text.

use crate::domain::events::GameEvent;
use crate::domain::rules::MAX_ROUNDS;
use crate::domain::state::Standing;
use crate::domain::statistics::WinRate;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    /// One serialized event per line.
    JsonLines,
}

/// Human-readable lines for one event.
pub fn render_text(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::GameStarted {
            turn_order,
            win_rates,
            ..
        } => {
            let mut lines = vec![format!("順番: {}", turn_order.join(" → "))];
            lines.extend(win_rate_lines(win_rates));
            lines
        }
        GameEvent::RollStarted { dice, .. } => {
            vec![format!("{} ...", "🎲".repeat(dice.len()))]
        }
        GameEvent::RollResolved {
            player_name,
            dice,
            total,
            rankings,
        } => {
            let faces: Vec<String> = dice.iter().map(u8::to_string).collect();
            let mut lines = vec![format!(
                "[{}] {player_name} は {total} を出した！",
                faces.join(" ")
            )];
            lines.extend(ranking_lines(rankings));
            lines
        }
        GameEvent::TurnAdvanced {
            round,
            current_player_name,
        } => vec![format!(
            "Round {round}/{MAX_ROUNDS} - {current_player_name} の番"
        )],
        GameEvent::GameOver {
            winners,
            winning_score,
            win_rates,
            ..
        } => {
            let mut lines = vec![
                "ゲーム終了！".to_string(),
                format!(
                    "🎊 {} の優勝！ (スコア: {winning_score}) 🎊",
                    winners.join(" と ")
                ),
            ];
            lines.extend(win_rate_lines(win_rates));
            lines
        }
    }
}

/// The event as a single JSON line.
pub fn render_json(event: &GameEvent) -> Result<String, AppError> {
    Ok(serde_json::to_string(event)?)
}

fn ranking_lines(rankings: &[Standing]) -> impl Iterator<Item = String> + '_ {
    rankings
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  {}位 {} {}", i + 1, s.name, s.score))
}

fn win_rate_lines(rates: &[WinRate]) -> impl Iterator<Item = String> + '_ {
    rates.iter().map(|r| {
        format!(
            "  {} 勝率: {}% ({}/{})",
            r.name, r.percentage, r.wins, r.games
        )
    })
}
