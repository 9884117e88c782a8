//! Staged construction of a [`Translator`].

use std::fmt;
use std::sync::Arc;

use super::{ResolutionIssueReporter, Translator, default_reporter};
use crate::catalog::Catalog;
use crate::controller::LocaleController;
use crate::error::CatalogResult;
use crate::interpolate::Escaping;
use crate::store::CatalogStore;
use crate::tag::LocaleTag;

/// Builds a [`Translator`].
///
/// Catalogues are registered first, then the default locale is declared, then
/// the active locale is switched, so every step can refer to catalogues added
/// earlier in the chain.
#[must_use]
pub struct TranslatorBuilder {
    store: Option<Arc<CatalogStore>>,
    catalogs: Vec<(LocaleTag, Catalog)>,
    default_locale: Option<LocaleTag>,
    active_locale: Option<LocaleTag>,
    escaping: Escaping,
    report_issue: ResolutionIssueReporter,
}

impl TranslatorBuilder {
    pub(super) fn new() -> Self {
        Self {
            store: None,
            catalogs: Vec::new(),
            default_locale: None,
            active_locale: None,
            escaping: Escaping::default(),
            report_issue: default_reporter(),
        }
    }

    /// Shares an existing store instead of creating a fresh one.
    pub fn with_store(mut self, store: Arc<CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Registers `catalog` under `tag` when the translator is built.
    pub fn with_catalog(mut self, tag: LocaleTag, catalog: Catalog) -> Self {
        self.catalogs.push((tag, catalog));
        self
    }

    /// Registers every `(tag, catalogue)` pair.
    pub fn with_catalogs<I>(mut self, catalogs: I) -> Self
    where
        I: IntoIterator<Item = (LocaleTag, Catalog)>,
    {
        self.catalogs.extend(catalogs);
        self
    }

    /// Declares the fallback locale.
    pub fn with_default_locale(mut self, tag: LocaleTag) -> Self {
        self.default_locale = Some(tag);
        self
    }

    /// Activates `tag` once the translator is built.
    pub fn with_active_locale(mut self, tag: LocaleTag) -> Self {
        self.active_locale = Some(tag);
        self
    }

    /// Selects how argument values are escaped.
    pub fn with_escaping(mut self, escaping: Escaping) -> Self {
        self.escaping = escaping;
        self
    }

    /// Overrides the reporter invoked when [`super::Localizer::lookup`] fails.
    pub fn with_issue_reporter(mut self, reporter: ResolutionIssueReporter) -> Self {
        self.report_issue = reporter;
        self
    }

    /// Registers the catalogues and applies the locale selections.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::UnknownLocale`] when the default or
    /// active locale has no catalogue.
    pub fn try_build(self) -> CatalogResult<Translator> {
        let store = self.store.unwrap_or_default();
        for (tag, catalog) in self.catalogs {
            store.register(tag, catalog);
        }
        if let Some(tag) = &self.default_locale {
            store.set_default(tag)?;
        }
        let controller = LocaleController::new(store);
        if let Some(tag) = &self.active_locale {
            controller.set_active(tag)?;
        }
        Ok(Translator {
            controller,
            escaping: self.escaping,
            report_issue: self.report_issue,
        })
    }
}

impl fmt::Debug for TranslatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorBuilder")
            .field("catalogs", &self.catalogs.len())
            .field("default_locale", &self.default_locale)
            .field("active_locale", &self.active_locale)
            .field("escaping", &self.escaping)
            .field("report_issue", &"<reporter>")
            .finish_non_exhaustive()
    }
}
