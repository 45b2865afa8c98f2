pub mod generator;
pub mod service;
