//! Translation coverage across registered catalogues.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Catalog, Namespace, Node, join_path};
use crate::entry::Entry;
use crate::store::CatalogStore;
use crate::tag::LocaleTag;

/// Coverage of one locale against the union of all entry paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCoverage {
    /// Locale being measured.
    pub locale: LocaleTag,
    /// Coverage paths authored in this locale.
    pub present: usize,
    /// Paths that only resolve through the default locale.
    pub fallback_only: Vec<String>,
    /// Paths that resolve nowhere for this locale.
    pub missing: Vec<String>,
}

impl LocaleCoverage {
    /// Whether every known path is authored in this locale.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fallback_only.is_empty() && self.missing.is_empty()
    }
}

/// Coverage for every registered locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Default locale at the time of the report.
    pub default_locale: Option<LocaleTag>,
    /// Number of distinct coverage paths across all catalogues.
    pub total_paths: usize,
    /// Per-locale coverage, sorted by tag.
    pub locales: Vec<LocaleCoverage>,
}

/// Compares every registered catalogue against the union of entry paths.
///
/// Indexed maps are measured per key, as `path.<index>` or `path.<name>`,
/// because the resolver falls back to the default locale one key at a
/// time. Scalars and lists count as single paths.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::{Catalog, CatalogStore, LocaleTag, coverage_report};
///
/// let store = CatalogStore::new();
/// let en = LocaleTag::parse("en")?;
/// store.register(en.clone(), Catalog::builder().scalar("about", "About").scalar("setting", "Setting").build()?);
/// store.register(LocaleTag::parse("zh")?, Catalog::builder().scalar("setting", "设置").build()?);
/// store.set_default(&en)?;
///
/// let report = coverage_report(&store);
/// assert_eq!(report.total_paths, 2);
/// assert_eq!(report.locales[1].fallback_only, vec!["about"]);
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
#[must_use]
pub fn coverage_report(store: &CatalogStore) -> CoverageReport {
    let default_locale = store.default_locale();
    let catalogs: Vec<(LocaleTag, BTreeSet<String>)> = store
        .locales()
        .into_iter()
        .filter_map(|tag| {
            let catalog = store.get(&tag).ok()?;
            Some((tag, coverage_paths(&catalog)))
        })
        .collect();

    let all_paths: BTreeSet<&String> = catalogs.iter().flat_map(|(_, paths)| paths).collect();
    let default_paths = default_locale.as_ref().and_then(|default| {
        catalogs
            .iter()
            .find(|(tag, _)| tag == default)
            .map(|(_, paths)| paths)
    });

    let locales = catalogs
        .iter()
        .map(|(tag, paths)| {
            let mut fallback_only = Vec::new();
            let mut missing = Vec::new();
            for path in all_paths.iter().filter(|path| !paths.contains(path.as_str())) {
                if default_paths.is_some_and(|defaults| defaults.contains(path.as_str())) {
                    fallback_only.push((*path).clone());
                } else {
                    missing.push((*path).clone());
                }
            }
            LocaleCoverage {
                locale: tag.clone(),
                present: paths.len(),
                fallback_only,
                missing,
            }
        })
        .collect();

    CoverageReport {
        default_locale,
        total_paths: all_paths.len(),
        locales,
    }
}

fn coverage_paths(catalog: &Catalog) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_coverage_paths(catalog.root(), "", &mut paths);
    paths
}

fn collect_coverage_paths(namespace: &Namespace, prefix: &str, out: &mut BTreeSet<String>) {
    for (name, node) in namespace.iter() {
        let path = join_path(prefix, name);
        match node {
            Node::Namespace(child) => collect_coverage_paths(child, &path, out),
            Node::Entry(Entry::IndexedMap(map)) => {
                out.extend(map.iter().map(|(key, _)| format!("{path}.{key}")));
            }
            Node::Entry(Entry::Scalar(_) | Entry::List(_)) => {
                out.insert(path);
            }
        }
    }
}
