// === PUBLIC CONTRACT ===
// The contract module carries the pure user model other crates consume.
pub mod contract;

pub use contract::model;

// === INTERNAL LAYERS ===
pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
