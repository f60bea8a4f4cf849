//! Repository traits abstracting the durable store.

mod alias_repository;

pub use alias_repository::AliasRepository;

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
