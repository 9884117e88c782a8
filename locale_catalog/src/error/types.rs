//! Primary error enum for catalogue registration and resolution.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use crate::entry::EntryKind;
use crate::tag::LocaleTag;

/// Errors raised while registering catalogues or resolving entries.
///
/// Registration failures (`InvalidCatalog`, `DuplicateKey`, `File`) are fatal
/// to the registration call only. Resolution failures (`MissingKey`,
/// `MissingParam`, `IndexOutOfRange`, `UnexpectedShape`) are always
/// recoverable: callers display the raw key path and carry on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// No default locale has been declared yet.
    #[error("no default locale has been declared")]
    NotInitialized,

    /// The locale tag has no registered catalogue.
    #[error("locale '{tag}' is not registered")]
    UnknownLocale {
        /// Tag that was requested.
        tag: LocaleTag,
    },

    /// The text could not be parsed as a BCP 47 language tag.
    #[error("invalid locale tag '{value}': {message}")]
    InvalidLocaleTag {
        /// Raw input supplied by the caller.
        value: String,
        /// Parser diagnostic.
        message: String,
    },

    /// Neither the requested nor the default catalogue contains the path.
    #[error("no entry found for '{path}'")]
    MissingKey {
        /// Key path that failed to resolve.
        path: String,
    },

    /// The entry exists but has nothing at the requested position.
    #[error("index {index} is out of range for '{path}'")]
    IndexOutOfRange {
        /// Key path of the indexed entry.
        path: String,
        /// Position that was requested.
        index: usize,
    },

    /// A template references a placeholder the caller did not supply.
    #[error("template parameter '{name}' was not supplied")]
    MissingParam {
        /// Placeholder identifier.
        name: String,
    },

    /// The entry exists but has a different shape than the caller asked for.
    #[error("entry '{path}' has shape {found}, expected {expected}")]
    UnexpectedShape {
        /// Key path of the entry.
        path: String,
        /// Shape required by the operation.
        expected: EntryKind,
        /// Shape actually authored.
        found: EntryKind,
    },

    /// The key path is syntactically malformed.
    #[error("invalid key path '{path}': {reason}")]
    InvalidPath {
        /// Raw key path.
        path: String,
        /// What made it invalid.
        reason: String,
    },

    /// The catalogue tree is structurally unusable.
    #[error("invalid catalogue at '{path}': {reason}")]
    InvalidCatalog {
        /// Location inside the tree (empty for the root).
        path: String,
        /// What made it invalid.
        reason: String,
    },

    /// Two siblings share the same key within one nesting level.
    #[error("duplicate key '{path}' in catalogue")]
    DuplicateKey {
        /// Full dotted path of the repeated key.
        path: String,
    },

    /// A locale-change observer attempted to switch the locale itself.
    #[error("cannot switch to '{requested}' from inside a locale-change observer")]
    ReentrantSwitch {
        /// Tag the observer tried to activate.
        requested: LocaleTag,
    },

    /// A catalogue file could not be read or parsed.
    #[error("catalogue file error in '{path}': {source}")]
    File {
        /// File that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O or parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Localisation settings could not be extracted.
    #[error("failed to load localisation settings: {0}")]
    Settings(#[from] Box<FigmentError>),
}

/// Convenience alias for results carrying a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;
