//! Library interface for `catalog-inspect`.
//!
//! The binary is a thin wrapper: [`cli::Args`] describes the command line and
//! [`commands::run`] loads the catalogues and writes the requested view.

pub mod cli;
pub mod commands;
pub mod error;

pub use commands::run;
pub use error::InspectError;
