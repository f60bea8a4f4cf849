//! Database-backed repository implementations.

mod pg_alias_repository;

pub use pg_alias_repository::PgAliasRepository;
