//! Chat session management.
//!
//! A `ChatSession` owns the transcript of one interactive conversation and
//! runs one turn at a time against an `Agent`.

mod chat;
mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::ChatSession;
pub use types::{TurnError, TurnState, TurnStateHandle};
