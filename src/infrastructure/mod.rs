//! Infrastructure layer: persistence, caching and user-agent classification.

pub mod cache;
pub mod classifier;
pub mod persistence;
