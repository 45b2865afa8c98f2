//! Observability setup shared by the Voxbot binaries.

pub mod tracing_setup;
