//! Cross-game win/loss bookkeeping.
//!
//! One [`PlayerStatistics`] table is created when the process starts and is
//! owned by whoever owns the session (the table or the simulator). Only game
//! end mutates it; resets leave it alone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub games_played: u32,
}

impl PlayerRecord {
    pub fn win_rate(&self) -> u32 {
        win_rate_percent(self.wins, self.games_played)
    }
}

/// Win-rate table row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRate {
    pub name: String,
    pub wins: u32,
    pub games: u32,
    pub percentage: u32,
}

/// `round(100 * wins / games)`, halves rounding up; 0 when no games were played.
pub fn win_rate_percent(wins: u32, games: u32) -> u32 {
    if games == 0 {
        return 0;
    }
    let (wins, games) = (wins as u64, games as u64);
    ((200 * wins + games) / (2 * games)) as u32
}

/// Per-name records, kept in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatistics {
    entries: Vec<(String, PlayerRecord)>,
}

impl PlayerStatistics {
    pub fn new<S: AsRef<str>>(roster: &[S]) -> Self {
        let mut stats = Self::default();
        for name in roster {
            stats.entry_mut(name.as_ref());
        }
        stats
    }

    pub fn get(&self, name: &str) -> Option<PlayerRecord> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| *r)
    }

    fn entry_mut(&mut self, name: &str) -> &mut PlayerRecord {
        let idx = match self.entries.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.entries.push((name.to_string(), PlayerRecord::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Count one finished game: everyone on the roster played, `winners` won.
    ///
    /// Winners not on the roster are ignored so `wins <= games_played` holds.
    pub fn record_game<S: AsRef<str>>(&mut self, roster: &[S], winners: &[String]) {
        for name in roster {
            self.entry_mut(name.as_ref()).games_played += 1;
        }
        for name in winners {
            if roster.iter().any(|n| n.as_ref() == name) {
                self.entry_mut(name).wins += 1;
            }
        }
    }

    /// Recomputed win-rate table for every roster name, in roster order.
    pub fn win_rates<S: AsRef<str>>(&self, roster: &[S]) -> Vec<WinRate> {
        roster
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let record = self.get(name).unwrap_or_default();
                WinRate {
                    name: name.to_string(),
                    wins: record.wins,
                    games: record.games_played,
                    percentage: record.win_rate(),
                }
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PlayerRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), *r))
    }
}
