//! Key-path resolution with a single fallback step.
//!
//! A path is walked from the requested catalogue's root. When any segment is
//! absent the whole walk is retried once against the default catalogue. No
//! further locales are consulted.

use tracing::debug;

use crate::catalog::{Catalog, Namespace, Node};
use crate::entry::{Entry, EntryKind, EntryRef, Template};
use crate::error::{CatalogError, CatalogResult};
use crate::path::{KeyPath, Segment};
use crate::store::CatalogStore;
use crate::tag::LocaleTag;

/// A catalogue paired with the locale it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct LocaleCatalog<'a> {
    /// Locale the catalogue is registered under.
    pub locale: &'a LocaleTag,
    /// Catalogue tree.
    pub catalog: &'a Catalog,
}

/// Entry located by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Located entry. Addressing one element of a list or indexed map yields
    /// a scalar view.
    pub entry: EntryRef<'a>,
    /// Locale whose catalogue served the entry.
    pub locale: &'a LocaleTag,
    /// Whether the entry came from the default catalogue.
    pub fell_back: bool,
}

impl<'a> Resolved<'a> {
    /// The entry as a single template.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnexpectedShape`] for lists and indexed maps.
    pub fn scalar(&self, path: &KeyPath) -> CatalogResult<&'a Template> {
        match self.entry {
            EntryRef::Scalar(template) => Ok(template),
            other => Err(unexpected(path, EntryKind::Scalar, other.kind())),
        }
    }

    /// The entry as an ordered list of templates.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnexpectedShape`] for scalars and indexed maps.
    pub fn list(&self, path: &KeyPath) -> CatalogResult<&'a [Template]> {
        match self.entry {
            EntryRef::List(items) => Ok(items),
            other => Err(unexpected(path, EntryKind::List, other.kind())),
        }
    }
}

/// Owned result of [`CatalogStore::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Copy of the located entry.
    pub entry: Entry,
    /// Locale whose catalogue served the entry.
    pub locale: LocaleTag,
    /// Whether the entry came from the default catalogue.
    pub fell_back: bool,
}

/// Locates `path` in `requested`, falling back to `default` when absent.
///
/// When `index` is supplied the located entry must be a list or indexed map
/// and the template at that position is returned.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::{Catalog, EntryRef, KeyPath, LocaleCatalog, LocaleTag, resolve};
///
/// let en = LocaleTag::parse("en")?;
/// let zh = LocaleTag::parse("zh")?;
/// let english = Catalog::builder()
///     .indexed("messages", |m| m.at(0, "first").at(1, "second").named("noSiteDatFileFound", "none found"))
///     .build()?;
/// let chinese = Catalog::builder().build()?;
///
/// let path = KeyPath::parse("messages")?;
/// let resolved = resolve(
///     LocaleCatalog { locale: &zh, catalog: &chinese },
///     LocaleCatalog { locale: &en, catalog: &english },
///     &path,
///     Some(1),
/// )?;
/// assert!(resolved.fell_back);
/// assert!(matches!(resolved.entry, EntryRef::Scalar(t) if t.as_str() == "second"));
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
///
/// # Errors
///
/// - [`CatalogError::MissingKey`] when neither catalogue contains the path.
/// - [`CatalogError::IndexOutOfRange`] when the entry exists but lacks the
///   requested position in both catalogues.
/// - [`CatalogError::UnexpectedShape`] when the path ends on a namespace or
///   an index is applied to a scalar.
pub fn resolve<'a>(
    requested: LocaleCatalog<'a>,
    default: LocaleCatalog<'a>,
    path: &KeyPath,
    index: Option<usize>,
) -> CatalogResult<Resolved<'a>> {
    let first = locate(requested.catalog, path, index);
    let first_miss = match first {
        Outcome::Found(entry) => {
            return Ok(Resolved {
                entry,
                locale: requested.locale,
                fell_back: false,
            });
        }
        Outcome::Shape { expected, found } => return Err(unexpected(path, expected, found)),
        Outcome::Missing | Outcome::OutOfRange(_) => first,
    };

    if requested.locale == default.locale {
        return Err(miss_error(path, first_miss, Outcome::Missing));
    }

    match locate(default.catalog, path, index) {
        Outcome::Found(entry) => {
            debug!(
                path = %path,
                requested = %requested.locale,
                fallback = %default.locale,
                "served entry from default locale"
            );
            Ok(Resolved {
                entry,
                locale: default.locale,
                fell_back: true,
            })
        }
        Outcome::Shape { expected, found } => Err(unexpected(path, expected, found)),
        second => Err(miss_error(path, first_miss, second)),
    }
}

impl CatalogStore {
    /// Resolves `path` for `locale` and returns an owned copy of the entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotInitialized`] before a default locale is
    /// declared, [`CatalogError::UnknownLocale`] when `locale` is not
    /// registered, and any error raised by [`resolve`].
    pub fn lookup(
        &self,
        locale: &LocaleTag,
        path: &KeyPath,
        index: Option<usize>,
    ) -> CatalogResult<Lookup> {
        let snapshot = self.snapshot(locale)?;
        let resolved = resolve(
            LocaleCatalog {
                locale: &snapshot.requested.0,
                catalog: &snapshot.requested.1,
            },
            LocaleCatalog {
                locale: &snapshot.default.0,
                catalog: &snapshot.default.1,
            },
            path,
            index,
        )?;
        Ok(Lookup {
            entry: to_owned_entry(resolved.entry),
            locale: resolved.locale.clone(),
            fell_back: resolved.fell_back,
        })
    }
}

fn to_owned_entry(entry: EntryRef<'_>) -> Entry {
    match entry {
        EntryRef::Scalar(template) => Entry::Scalar(template.clone()),
        EntryRef::List(items) => Entry::List(items.to_vec()),
        EntryRef::IndexedMap(map) => Entry::IndexedMap(map.clone()),
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome<'a> {
    Found(EntryRef<'a>),
    Missing,
    OutOfRange(usize),
    Shape { expected: EntryKind, found: EntryKind },
}

#[derive(Debug, Clone, Copy)]
enum Cursor<'a> {
    Namespace(&'a Namespace),
    Entry(EntryRef<'a>),
}

fn locate<'a>(catalog: &'a Catalog, path: &KeyPath, index: Option<usize>) -> Outcome<'a> {
    let mut cursor = Cursor::Namespace(catalog.root());
    for segment in path.segments() {
        cursor = match step(cursor, segment) {
            Ok(next) => next,
            Err(outcome) => return outcome,
        };
    }
    match (cursor, index) {
        (Cursor::Entry(entry), None) => Outcome::Found(entry),
        (Cursor::Entry(entry), Some(position)) => element(entry, position).unwrap_or_else(|| {
            Outcome::Shape {
                expected: EntryKind::List,
                found: entry.kind(),
            }
        }),
        (Cursor::Namespace(_), None) => Outcome::Shape {
            expected: EntryKind::Scalar,
            found: EntryKind::Namespace,
        },
        (Cursor::Namespace(_), Some(_)) => Outcome::Shape {
            expected: EntryKind::List,
            found: EntryKind::Namespace,
        },
    }
}

fn step<'a>(cursor: Cursor<'a>, segment: &Segment) -> Result<Cursor<'a>, Outcome<'a>> {
    match (cursor, segment) {
        (Cursor::Namespace(namespace), Segment::Name(name)) => child(namespace, name),
        (Cursor::Namespace(namespace), Segment::Index(position)) => {
            child(namespace, &position.to_string())
        }
        (Cursor::Entry(EntryRef::IndexedMap(map)), Segment::Name(name)) => map
            .get_name(name)
            .map(|template| Cursor::Entry(EntryRef::Scalar(template)))
            .ok_or(Outcome::Missing),
        (Cursor::Entry(entry), Segment::Index(position)) => match element(entry, *position) {
            Some(Outcome::Found(found)) => Ok(Cursor::Entry(found)),
            Some(miss) => Err(miss),
            None => Err(Outcome::Missing),
        },
        (Cursor::Entry(_), Segment::Name(_)) => Err(Outcome::Missing),
    }
}

fn child<'a>(namespace: &'a Namespace, name: &str) -> Result<Cursor<'a>, Outcome<'a>> {
    match namespace.get(name) {
        Some(Node::Namespace(inner)) => Ok(Cursor::Namespace(inner)),
        Some(Node::Entry(entry)) => Ok(Cursor::Entry(entry.as_entry_ref())),
        None => Err(Outcome::Missing),
    }
}

/// Position `index` of a list or indexed map; `None` for scalars.
fn element(entry: EntryRef<'_>, index: usize) -> Option<Outcome<'_>> {
    let template = match entry {
        EntryRef::Scalar(_) => return None,
        EntryRef::List(items) => items.get(index),
        EntryRef::IndexedMap(map) => map.get_index(index),
    };
    Some(template.map_or(Outcome::OutOfRange(index), |found| {
        Outcome::Found(EntryRef::Scalar(found))
    }))
}

fn miss_error(path: &KeyPath, first: Outcome<'_>, second: Outcome<'_>) -> CatalogError {
    match (first, second) {
        (Outcome::OutOfRange(index), _) | (_, Outcome::OutOfRange(index)) => {
            CatalogError::IndexOutOfRange {
                path: path.as_str().to_owned(),
                index,
            }
        }
        _ => CatalogError::missing_key(path.as_str()),
    }
}

fn unexpected(path: &KeyPath, expected: EntryKind, found: EntryKind) -> CatalogError {
    CatalogError::UnexpectedShape {
        path: path.as_str().to_owned(),
        expected,
        found,
    }
}
