//! Business logic and trait definitions for Voxbot.
//!
//! This crate defines the "ports" (repository, generator and backend traits)
//! that the infrastructure layer implements. It depends only on
//! `voxbot-types` -- never on `voxbot-infra` or any database/IO crate.

pub mod chat;
pub mod relay;
pub mod session;
