//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One metrics object per line, written as games finish
    Jsonl,
    /// A single JSON array, written when the run finishes
    Json,
}
