//! Domain layer: entities, repository traits and the redirect worker.

pub mod entities;
pub mod redirect_record;
pub mod redirect_worker;
pub mod repositories;
