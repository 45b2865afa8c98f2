//! Shared domain types for Voxbot.
//!
//! This crate contains the core domain types used across the Voxbot workspace:
//! chat records, relay wire shapes, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod relay;
