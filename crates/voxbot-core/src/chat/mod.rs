//! Chat record persistence and aggregation for Voxbot.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, and the `ChatService` that validates requests and
//! translates repository failures into [`ChatError`](voxbot_types::error::ChatError).

pub mod repository;
pub mod service;
pub mod stats;
