//! Error types for `catalog-inspect`.

use locale_catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by `catalog-inspect`.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Loading, configuring, or resolving the catalogues failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Neither `--dir` nor the settings named a catalogue directory.
    #[error("no catalogue directory; pass --dir or set catalog_dir in the settings")]
    MissingCatalogDir,

    /// The coverage report could not be serialised.
    #[error("failed to serialise JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
