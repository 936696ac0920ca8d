pub mod config;
pub mod engine;
pub mod evaluator;
pub mod stats;
