//! Request/response DTOs for the REST API.

pub mod shorten;
