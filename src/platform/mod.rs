// LogExtract - platform/mod.rs
//
// Platform abstraction layer: filesystem and config locations.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
