//! The game table: owner of the roster, the random source, the current session
//! and the process-wide statistics.
//!
//! Commands map one-to-one onto the presentation surface (`startGame`,
//! `rollForCurrentTurn`, `resetGame`). The table itself has no notion of time;
//! `services::table_runner` adds the roll delay on top of `begin_roll` /
//! `resolve_roll`.

use tracing::debug;

use crate::domain::dice::RandomSource;
use crate::domain::events::EventSink;
use crate::domain::roll::DiceRoll;
use crate::domain::session::{validate_roster, GameSession, ResolvedRoll};
use crate::domain::state::{PhaseKind, SessionSnapshot};
use crate::domain::statistics::{PlayerStatistics, WinRate};
use crate::errors::domain::{DomainError, InvalidStateKind};

pub struct GameTable<R> {
    roster: Vec<String>,
    rng: R,
    stats: PlayerStatistics,
    session: Option<GameSession>,
}

impl<R: RandomSource> GameTable<R> {
    /// Validate the roster and create empty statistics for it. No session yet.
    pub fn new<S: AsRef<str>>(roster: &[S], rng: R) -> Result<Self, DomainError> {
        validate_roster(roster)?;
        let roster: Vec<String> = roster.iter().map(|s| s.as_ref().to_string()).collect();
        let stats = PlayerStatistics::new(&roster);
        Ok(Self {
            roster,
            rng,
            stats,
            session: None,
        })
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn stats(&self) -> &PlayerStatistics {
        &self.stats
    }

    pub fn win_rates(&self) -> Vec<WinRate> {
        self.stats.win_rates(&self.roster)
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    pub fn roll_in_flight(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase().kind() == PhaseKind::RollInFlight)
    }

    fn ensure_not_in_flight(&self) -> Result<(), DomainError> {
        if self.roll_in_flight() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::RollInFlight,
                "cannot deal while a roll is resolving",
            ));
        }
        Ok(())
    }

    /// Deal a fresh session and announce it.
    pub fn start_game<E: EventSink + ?Sized>(
        &mut self,
        events: &mut E,
    ) -> Result<&GameSession, DomainError> {
        self.ensure_not_in_flight()?;
        let session = GameSession::start(&self.roster, &mut self.rng)?;
        session.announce_start(&self.stats, events);
        Ok(self.session.insert(session))
    }

    /// Replace the session with a fresh deal over the same roster.
    /// Statistics carry over; starts a game if none exists yet.
    pub fn reset_game<E: EventSink + ?Sized>(
        &mut self,
        events: &mut E,
    ) -> Result<&GameSession, DomainError> {
        self.ensure_not_in_flight()?;
        let session = match &self.session {
            Some(current) => current.reset(&mut self.rng),
            None => GameSession::start(&self.roster, &mut self.rng)?,
        };
        debug!("game reset");
        session.announce_start(&self.stats, events);
        Ok(self.session.insert(session))
    }

    pub fn begin_roll<E: EventSink + ?Sized>(
        &mut self,
        events: &mut E,
    ) -> Result<DiceRoll, DomainError> {
        let session = self.session.as_mut().ok_or_else(not_started)?;
        session.begin_roll(&mut self.rng, events)
    }

    pub fn resolve_roll<E: EventSink + ?Sized>(
        &mut self,
        events: &mut E,
    ) -> Result<ResolvedRoll, DomainError> {
        let session = self.session.as_mut().ok_or_else(not_started)?;
        session.resolve_roll(&mut self.stats, events)
    }

    /// Roll and resolve immediately (headless play).
    pub fn roll_for_current_turn<E: EventSink + ?Sized>(
        &mut self,
        events: &mut E,
    ) -> Result<ResolvedRoll, DomainError> {
        self.begin_roll(events)?;
        self.resolve_roll(events)
    }

    /// Whether the current session has finished. False before the first game.
    pub fn is_over(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::is_over)
    }
}

fn not_started() -> DomainError {
    DomainError::invalid_state(InvalidStateKind::NotStarted, "no game has been started")
}
