//! Application layer: service orchestration and rollup types.

pub mod rollup;
pub mod services;
