//! Text generator implementations.
//!
//! Contains concrete implementations of the [`TextGenerator`] trait defined in
//! `voxbot-core`. Gemini is the only backend.
//!
//! [`TextGenerator`]: voxbot_core::relay::generator::TextGenerator

pub mod gemini;
