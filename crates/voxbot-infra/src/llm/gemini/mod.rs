//! Google Gemini text generator.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`TextGenerator`](voxbot_core::relay::generator::TextGenerator) trait for
//! the `generateContent` REST endpoint.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
