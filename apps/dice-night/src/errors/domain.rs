//! Domain-level error type used by the session, table and runner.
//!
//! This error type is IO- and presentation-agnostic. Binaries and the async
//! runner return `Result<T, crate::error::AppError>` and convert from
//! `DomainError` using the provided `From<DomainError> for AppError`
//! implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a roster was rejected at game start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationKind {
    RosterSize,
    DuplicateName,
}

/// Which precondition a command violated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    /// A roll was requested while another one is still resolving.
    RollInFlight,
    /// A roll was requested after the final turn.
    GameOver,
    /// Resolution was requested with no roll pending.
    NoRollInFlight,
    /// The table has no session yet.
    NotStarted,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid roster handed to `start`; nothing was initialized.
    Configuration(ConfigurationKind, String),
    /// Command rejected in the current session state; nothing changed.
    InvalidState(InvalidStateKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Configuration(kind, d) => write!(f, "configuration error {kind:?}: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn configuration(kind: ConfigurationKind, detail: impl Into<String>) -> Self {
        Self::Configuration(kind, detail.into())
    }
    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }

    /// True for rejections the adapter should swallow as a no-op.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DomainError::InvalidState(..))
    }
}
