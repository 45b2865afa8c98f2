//! Clients for a running Voxbot chat server.

pub mod http_backend;

pub use http_backend::{DEFAULT_SERVER_URL, HttpChatBackend};
