//! Shared utilities.

pub mod code_generator;
pub mod url_validator;
