//! Error types produced by catalogue registration and resolution.

mod constructors;
mod types;

pub use types::{CatalogError, CatalogResult};
