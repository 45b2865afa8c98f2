//! HTTP/REST API layer for Voxbot.
//!
//! Axum-based JSON API under `/api/` with configurable CORS. Bodies are plain
//! JSON (no envelope) so browser clients can consume them directly.

pub mod error;
pub mod handlers;
pub mod router;
