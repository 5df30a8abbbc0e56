//! Error handling for the Dice Night core.

pub mod domain;

pub use domain::{ConfigurationKind, DomainError, InvalidStateKind};
