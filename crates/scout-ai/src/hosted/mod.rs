//! Hosted agent over an OpenAI-compatible chat-completions endpoint.
//!
//! Sends the system prompt and transcript, declares the three lookup
//! tools, and relays tool calls the model makes to the `ToolSet` for a
//! bounded number of rounds. Streams via SSE when asked to.

mod api;
mod client;
mod config;


pub use client::{HostedAgent, ToolCall};
pub use config::HostedConfig;
