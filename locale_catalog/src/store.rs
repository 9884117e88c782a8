//! Registry of catalogues keyed by locale tag.
//!
//! Each catalogue is held behind an [`Arc`] and replaced wholesale on
//! re-registration, so a resolution that has already taken a snapshot keeps
//! reading the tree it started with.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::tag::LocaleTag;

/// Lifecycle of a [`CatalogStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No default locale has been declared; resolutions fail.
    Uninitialized,
    /// A default locale exists. The store never returns to `Uninitialized`.
    Ready,
}

#[derive(Debug, Default)]
struct StoreState {
    catalogs: HashMap<LocaleTag, Arc<Catalog>>,
    default: Option<LocaleTag>,
}

/// Catalogues for one or more locales plus the declared default.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::{Catalog, CatalogStore, LocaleTag, RegistryState};
///
/// let store = CatalogStore::new();
/// let en = LocaleTag::parse("en").expect("valid tag");
/// store.register(en.clone(), Catalog::builder().scalar("about", "About").build()?);
/// assert_eq!(store.state(), RegistryState::Uninitialized);
/// store.set_default(&en)?;
/// assert_eq!(store.state(), RegistryState::Ready);
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: RwLock<StoreState>,
}

/// Catalogues consulted by one resolution.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) requested: (LocaleTag, Arc<Catalog>),
    pub(crate) default: (LocaleTag, Arc<Catalog>),
}

impl CatalogStore {
    /// Creates an empty, uninitialised store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs or replaces the catalogue for `tag`.
    ///
    /// The catalogue has already been validated when it was built, so
    /// registration itself cannot fail. Replacement swaps the whole tree.
    pub fn register(&self, tag: LocaleTag, catalog: Catalog) {
        let entries = catalog.entry_count();
        let replaced = self
            .state
            .write()
            .catalogs
            .insert(tag.clone(), Arc::new(catalog))
            .is_some();
        debug!(locale = %tag, entries, replaced, "registered catalogue");
    }

    /// Catalogue registered for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] when nothing is registered for
    /// `tag`.
    pub fn get(&self, tag: &LocaleTag) -> CatalogResult<Arc<Catalog>> {
        self.state
            .read()
            .catalogs
            .get(tag)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLocale { tag: tag.clone() })
    }

    /// Declares the fallback locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] when `tag` has not been
    /// registered.
    pub fn set_default(&self, tag: &LocaleTag) -> CatalogResult<()> {
        let mut state = self.state.write();
        if !state.catalogs.contains_key(tag) {
            return Err(CatalogError::UnknownLocale { tag: tag.clone() });
        }
        let previous = state.default.replace(tag.clone());
        drop(state);
        debug!(
            locale = %tag,
            previous = previous.as_ref().map(LocaleTag::as_str),
            "default locale set"
        );
        Ok(())
    }

    /// Declared fallback locale, if any.
    #[must_use]
    pub fn default_locale(&self) -> Option<LocaleTag> {
        self.state.read().default.clone()
    }

    /// Whether a catalogue is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &LocaleTag) -> bool {
        self.state.read().catalogs.contains_key(tag)
    }

    /// Registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<LocaleTag> {
        let mut tags: Vec<LocaleTag> = self.state.read().catalogs.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RegistryState {
        if self.state.read().default.is_some() {
            RegistryState::Ready
        } else {
            RegistryState::Uninitialized
        }
    }

    /// Takes consistent references to the requested and default catalogues.
    pub(crate) fn snapshot(&self, requested: &LocaleTag) -> CatalogResult<Snapshot> {
        let state = self.state.read();
        let default_tag = state.default.clone().ok_or(CatalogError::NotInitialized)?;
        let default_catalog = state
            .catalogs
            .get(&default_tag)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLocale {
                tag: default_tag.clone(),
            })?;
        let requested_catalog = state
            .catalogs
            .get(requested)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLocale {
                tag: requested.clone(),
            })?;
        Ok(Snapshot {
            requested: (requested.clone(), requested_catalog),
            default: (default_tag, default_catalog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn tag(raw: &str) -> LocaleTag {
        LocaleTag::parse(raw).expect("valid tag")
    }

    fn about(text: &str) -> Catalog {
        Catalog::builder()
            .scalar("about", text)
            .build()
            .expect("valid catalogue")
    }

    #[fixture]
    fn store() -> CatalogStore {
        let store = CatalogStore::new();
        store.register(tag("en"), about("About"));
        store.register(tag("zh"), about("关于"));
        store
    }

    #[rstest]
    fn starts_uninitialised_until_a_default_is_set(store: CatalogStore) {
        assert_eq!(store.state(), RegistryState::Uninitialized);
        assert!(matches!(
            store.snapshot(&tag("en")),
            Err(CatalogError::NotInitialized)
        ));
        store.set_default(&tag("en")).expect("en is registered");
        assert_eq!(store.state(), RegistryState::Ready);
        assert_eq!(store.default_locale(), Some(tag("en")));
    }

    #[rstest]
    fn set_default_rejects_unregistered_locales(store: CatalogStore) {
        let err = store.set_default(&tag("fr")).expect_err("fr is unknown");
        assert!(matches!(err, CatalogError::UnknownLocale { tag } if tag.as_str() == "fr"));
        assert_eq!(store.state(), RegistryState::Uninitialized);
    }

    #[rstest]
    fn get_reports_unknown_locales(store: CatalogStore) {
        assert!(store.get(&tag("zh")).is_ok());
        assert!(matches!(
            store.get(&tag("de")),
            Err(CatalogError::UnknownLocale { .. })
        ));
    }

    #[rstest]
    fn re_registration_swaps_the_whole_tree(store: CatalogStore) {
        let before = store.get(&tag("en")).expect("registered");
        store.register(tag("en"), about("About v2rayA"));
        let after = store.get(&tag("en")).expect("registered");
        assert_eq!(before.entry_paths(), after.entry_paths());
        assert_ne!(before, after);
        assert_eq!(store.locales(), vec![tag("en"), tag("zh")]);
    }

    #[rstest]
    fn normalised_tags_address_the_same_catalogue(store: CatalogStore) {
        assert!(store.contains(&tag("zh")));
        store.register(tag("zh_CN.UTF-8"), about("关于"));
        assert!(store.contains(&tag("zh-CN")));
    }
}
