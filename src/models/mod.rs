//! Core data models for the usage tracker.

mod competitor;
mod roster;
mod stats;

pub use competitor::*;
pub use roster::*;
pub use stats::*;
