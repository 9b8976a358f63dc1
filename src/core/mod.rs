// LogExtract - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library and tracing only.
// Must NOT depend on: app or platform.

pub mod filter;
pub mod model;
pub mod parser;
