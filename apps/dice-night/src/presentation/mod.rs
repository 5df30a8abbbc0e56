//! Terminal presentation adapter.
//!
//! Consumes [`GameEvent`](crate::domain::GameEvent)s and renders them; reads
//! user commands from a line-oriented input. Owns no game logic.

pub mod commands;
pub mod render;
pub mod writer;

pub use commands::Command;
pub use render::{render_json, render_text, OutputMode};
pub use writer::run_presenter;
