//! Localisation catalogues with fallback-aware key resolution.
//!
//! The crate stores one immutable [`Catalog`] per locale in a
//! [`CatalogStore`], resolves dotted key paths with a single fallback step to
//! the default locale, and renders `{placeholder}` templates while leaving
//! authored markup untouched. [`LocaleController`] owns the active locale and
//! notifies observers of changes; [`Translator`] combines the pieces behind
//! the [`Localizer`] trait used by host applications.
//!
//! ```rust
//! use locale_catalog::{Catalog, LocaleTag, Localizer, Translator};
//!
//! let en = LocaleTag::parse("en")?;
//! let translator = Translator::builder()
//!     .with_catalog(en.clone(), Catalog::builder().scalar("about", "About").build()?)
//!     .with_default_locale(en)
//!     .try_build()?;
//!
//! assert_eq!(translator.message_or_path("about", None), "About");
//! assert_eq!(translator.message_or_path("missing.key", None), "missing.key");
//! # Ok::<(), locale_catalog::CatalogError>(())
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod controller;
mod coverage;
mod entry;
mod error;
mod interpolate;
mod loader;
mod localizer;
mod path;
mod resolver;
mod settings;
mod store;
mod tag;

pub use catalog::{Catalog, IndexedMapBuilder, Namespace, NamespaceBuilder, Node};
pub use controller::{LocaleChange, LocaleController, LocaleObserver, SubscriptionHandle};
pub use coverage::{CoverageReport, LocaleCoverage, coverage_report};
pub use entry::{Entry, EntryKind, EntryRef, IndexedKey, IndexedMap, Template};
pub use error::{CatalogError, CatalogResult};
pub use interpolate::{ArgValue, Escaping, TemplateArgs, render, render_all};
pub use loader::{CatalogFormat, catalog_file_path, load_catalog_dir, load_catalog_file};
pub use localizer::{
    Localizer, NoOpLocalizer, RenderedEntry, ResolutionIssue, ResolutionIssueReporter, Translator,
    TranslatorBuilder,
};
pub use path::{KeyPath, Segment};
pub use resolver::{LocaleCatalog, Lookup, Resolved, resolve};
pub use settings::{ENV_PREFIX, LocalisationSettings};
pub use store::{CatalogStore, RegistryState};
pub use tag::LocaleTag;
pub use unic_langid::{LanguageIdentifier, langid};
