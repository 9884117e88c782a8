//! Test helpers shared across crates.
//!
//! [`catalogs`] supplies a complete English table and a partial Chinese one
//! for exercising fallback, plus temporary catalogue directories.
//! [`jail`] runs settings loaders against an isolated file and environment.

pub mod catalogs;
pub mod jail;
