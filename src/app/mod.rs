// LogExtract - app/mod.rs
//
// Application layer: pipeline orchestration over the core layer.
// Must NOT depend on: platform specifics.

pub mod filterer;
