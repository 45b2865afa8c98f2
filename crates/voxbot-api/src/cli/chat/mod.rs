//! Interactive terminal conversation.
//!
//! Typed lines stand in for captured speech and printed replies for spoken
//! ones. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
