//! The game session state machine.
//!
//! A session is dealt from a roster, advances one turn per resolved roll and
//! becomes terminal after the last player's final-round turn. Every operation
//! either applies fully or returns an error without touching state.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::dice::RandomSource;
use crate::domain::events::{EventSink, GameEvent};
use crate::domain::roll::{roll_for_round, spin_for, DiceRoll};
use crate::domain::rules::{MAX_ROUNDS, PLAYERS};
use crate::domain::scoring::{rankings, winners};
use crate::domain::state::{next_seat, Player, SessionPhase, SessionSnapshot, Standing};
use crate::domain::statistics::PlayerStatistics;
use crate::domain::turn_order::random_permutation;
use crate::errors::domain::{ConfigurationKind, DomainError, InvalidStateKind};

/// Result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub final_rankings: Vec<Standing>,
    pub winners: Vec<String>,
    pub winning_score: u16,
}

/// What a resolved turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoll {
    pub player_name: String,
    pub roll: DiceRoll,
    pub rankings: Vec<Standing>,
    /// Set when this turn ended the game.
    pub game_over: Option<GameResult>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    /// Roster in its given order; used for resets and the win-rate table.
    roster: Vec<String>,
    /// Players in turn order.
    players: Vec<Player>,
    current: usize,
    round_no: u8,
    phase: SessionPhase,
}

/// Reject rosters that are not exactly `PLAYERS` distinct names.
pub fn validate_roster<S: AsRef<str>>(roster: &[S]) -> Result<(), DomainError> {
    if roster.len() != PLAYERS {
        return Err(DomainError::configuration(
            ConfigurationKind::RosterSize,
            format!("roster must have {PLAYERS} names, got {}", roster.len()),
        ));
    }
    let mut seen = HashSet::with_capacity(roster.len());
    for name in roster {
        if !seen.insert(name.as_ref()) {
            return Err(DomainError::configuration(
                ConfigurationKind::DuplicateName,
                format!("roster lists '{}' more than once", name.as_ref()),
            ));
        }
    }
    Ok(())
}

impl GameSession {
    /// Deal a new session: shuffle the roster into turn order, zero all scores.
    ///
    /// # Arguments
    ///
    /// * `roster` - Exactly three distinct player names, in roster order
    /// * `rng` - Source for the Fisher-Yates shuffle
    ///
    /// # Returns
    ///
    /// An idle session at round 1 with the first player in turn order to act,
    /// or `Configuration` (`RosterSize` / `DuplicateName`) with nothing built.
    pub fn start<S, R>(roster: &[S], rng: &mut R) -> Result<Self, DomainError>
    where
        S: AsRef<str>,
        R: RandomSource + ?Sized,
    {
        validate_roster(roster)?;
        let roster = roster.iter().map(|s| s.as_ref().to_string()).collect();
        Ok(Self::deal(roster, rng))
    }

    fn deal<R: RandomSource + ?Sized>(roster: Vec<String>, rng: &mut R) -> Self {
        let players = random_permutation(roster.len(), rng)
            .into_iter()
            .map(|i| Player::new(roster[i].clone()))
            .collect::<Vec<_>>();
        debug!(
            turn_order = ?players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "dealt session"
        );
        Self {
            roster,
            players,
            current: 0,
            round_no: 1,
            phase: SessionPhase::Idle,
        }
    }

    /// A fresh session over the same roster. Statistics live elsewhere and are untouched.
    pub fn reset<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Self {
        Self::deal(self.roster.clone(), rng)
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    /// 1-based; exceeds `MAX_ROUNDS` once the game is over.
    pub fn round(&self) -> u8 {
        self.round_no
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn rankings(&self) -> Vec<Standing> {
        rankings(&self.players)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turn_order: self.players.iter().map(Standing::from).collect(),
            current_player: (!self.is_over()).then(|| self.current_player().name.clone()),
            round: self.round_no,
            max_rounds: MAX_ROUNDS,
            phase: self.phase.kind(),
        }
    }

    /// Emit the opening events for a freshly dealt session.
    pub fn announce_start<E: EventSink + ?Sized>(&self, stats: &PlayerStatistics, events: &mut E) {
        info!(
            turn_order = ?self.players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "game started"
        );
        events.emit(GameEvent::GameStarted {
            turn_order: self.players.iter().map(|p| p.name.clone()).collect(),
            max_rounds: MAX_ROUNDS,
            win_rates: stats.win_rates(&self.roster),
        });
        events.emit(GameEvent::TurnAdvanced {
            round: self.round_no,
            current_player_name: self.current_player().name.clone(),
        });
    }

    /// Roll the current player's dice and hold them until [`Self::resolve_roll`].
    ///
    /// Two dice are rolled, three in the final round. Emits `RollStarted`
    /// with spin hints; scores are untouched until resolution.
    ///
    /// # Returns
    ///
    /// The pending roll, or `InvalidState` (`RollInFlight` / `GameOver`)
    /// with no state change and no event.
    pub fn begin_roll<R, E>(&mut self, rng: &mut R, events: &mut E) -> Result<DiceRoll, DomainError>
    where
        R: RandomSource + ?Sized,
        E: EventSink + ?Sized,
    {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::RollInFlight { .. } => {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::RollInFlight,
                    "previous roll has not resolved yet",
                ));
            }
            SessionPhase::Over => {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::GameOver,
                    "game is over",
                ));
            }
        }

        let roll = roll_for_round(self.round_no, rng).ok_or_else(|| {
            DomainError::invalid_state(
                InvalidStateKind::GameOver,
                format!("round {} is outside the schedule", self.round_no),
            )
        })?;
        let spins = roll.faces.iter().map(|&f| spin_for(f, rng)).collect();
        let player_name = self.current_player().name.clone();

        debug!(player = %player_name, round = self.round_no, faces = ?roll.faces, "roll started");
        events.emit(GameEvent::RollStarted {
            player_name,
            round: self.round_no,
            dice: spins,
        });

        self.phase = SessionPhase::RollInFlight {
            pending: roll.clone(),
        };
        Ok(roll)
    }

    /// Apply the pending roll: score it, advance the turn, and finish the game
    /// after the last final-round turn.
    ///
    /// # Arguments
    ///
    /// * `stats` - Cross-game records; only touched when this turn ends the game
    /// * `events` - Receives `RollResolved`, then `TurnAdvanced` or `GameOver`
    ///
    /// # Returns
    ///
    /// The resolved roll with the ranking after it, and the game result when
    /// the game just ended. `InvalidState` if no roll is pending.
    pub fn resolve_roll<E: EventSink + ?Sized>(
        &mut self,
        stats: &mut PlayerStatistics,
        events: &mut E,
    ) -> Result<ResolvedRoll, DomainError> {
        let roll = match &self.phase {
            SessionPhase::RollInFlight { pending } => pending.clone(),
            SessionPhase::Idle => {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::NoRollInFlight,
                    "no roll to resolve",
                ));
            }
            SessionPhase::Over => {
                return Err(DomainError::invalid_state(
                    InvalidStateKind::GameOver,
                    "game is over",
                ));
            }
        };

        let player = &mut self.players[self.current];
        player.score += roll.total;
        let player_name = player.name.clone();

        self.current = next_seat(self.current, self.players.len());
        if self.current == 0 {
            self.round_no += 1;
        }

        let standings = rankings(&self.players);
        debug!(player = %player_name, total = roll.total, "roll resolved");
        events.emit(GameEvent::RollResolved {
            player_name: player_name.clone(),
            dice: roll.faces.clone(),
            total: roll.total,
            rankings: standings.clone(),
        });

        let game_over = if self.round_no > MAX_ROUNDS {
            self.phase = SessionPhase::Over;
            Some(self.finish(&standings, stats, events))
        } else {
            self.phase = SessionPhase::Idle;
            events.emit(GameEvent::TurnAdvanced {
                round: self.round_no,
                current_player_name: self.current_player().name.clone(),
            });
            None
        };

        Ok(ResolvedRoll {
            player_name,
            roll,
            rankings: standings,
            game_over,
        })
    }

    /// Both halves of a turn with no delay in between.
    pub fn roll_for_current_player<R, E>(
        &mut self,
        rng: &mut R,
        stats: &mut PlayerStatistics,
        events: &mut E,
    ) -> Result<ResolvedRoll, DomainError>
    where
        R: RandomSource + ?Sized,
        E: EventSink + ?Sized,
    {
        self.begin_roll(rng, events)?;
        self.resolve_roll(stats, events)
    }

    fn finish<E: EventSink + ?Sized>(
        &self,
        standings: &[Standing],
        stats: &mut PlayerStatistics,
        events: &mut E,
    ) -> GameResult {
        let (winner_names, winning_score) = winners(standings);
        stats.record_game(&self.roster, &winner_names);

        info!(winners = ?winner_names, winning_score, "game over");
        events.emit(GameEvent::GameOver {
            final_rankings: standings.to_vec(),
            winners: winner_names.clone(),
            winning_score,
            win_rates: stats.win_rates(&self.roster),
        });

        GameResult {
            final_rankings: standings.to_vec(),
            winners: winner_names,
            winning_score,
        }
    }
}
