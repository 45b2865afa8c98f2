//! Infrastructure layer for Voxbot.
//!
//! Contains implementations of the traits defined in `voxbot-core`: the SQLite
//! record store, the Gemini text generator, and the HTTP client a terminal
//! session uses to reach the chat server. Also config loading and data
//! directory helpers.

pub mod client;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
