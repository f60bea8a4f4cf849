//! Core business entities.

mod alias;

pub use alias::{Alias, NewAlias, NewRedirectEvent, RedirectEvent};
