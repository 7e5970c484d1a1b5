// src/lib.rs
// Library interface for cert-search
pub mod batch;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod sources;
pub mod stats;
pub mod types;
