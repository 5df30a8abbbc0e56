//! Shared helpers for Dice Night tests.

pub mod fixtures;
pub mod logging;

pub use fixtures::{faces_for_turns, split_total, REFERENCE_TOTALS};
