//! Constructors and classification helpers for `CatalogError`.

use std::error::Error;

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::CatalogError;

impl CatalogError {
    /// Builds a [`CatalogError::MissingKey`] for `path`.
    #[must_use]
    pub fn missing_key(path: impl Into<String>) -> Self {
        Self::MissingKey { path: path.into() }
    }

    /// Builds a [`CatalogError::InvalidPath`].
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`CatalogError::InvalidCatalog`].
    #[must_use]
    pub fn invalid_catalog(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`CatalogError::DuplicateKey`].
    #[must_use]
    pub fn duplicate_key(path: impl Into<String>) -> Self {
        Self::DuplicateKey { path: path.into() }
    }

    /// Wraps an I/O or parse failure for the catalogue file at `path`.
    pub fn file(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Wraps a `figment` extraction failure.
    #[must_use]
    pub fn settings(err: FigmentError) -> Self {
        Self::Settings(Box::new(err))
    }

    /// Returns `true` for resolution failures the host should recover from by
    /// displaying a fallback string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_catalog::CatalogError;
    ///
    /// assert!(CatalogError::missing_key("common.about").is_recoverable());
    /// assert!(!CatalogError::duplicate_key("common.about").is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingKey { .. }
                | Self::MissingParam { .. }
                | Self::IndexOutOfRange { .. }
                | Self::UnexpectedShape { .. }
                | Self::InvalidPath { .. }
        )
    }
}
