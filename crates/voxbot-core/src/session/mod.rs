//! Client-side conversation sequencing.
//!
//! `ClientSession` drives one user's exchange with the chat server. It is
//! written against capability traits so the same sequencing runs against a
//! terminal, a test double, or any other input/output device.

pub mod backend;
pub mod capability;
pub mod client;
