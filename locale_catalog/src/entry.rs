//! Leaf values stored in a catalogue.
//!
//! An [`Entry`] keeps the shape it was authored with. A `List` is never joined
//! into a `Scalar` and an `IndexedMap` is never flattened into a `List`;
//! callers pick the accessor matching the shape they expect.

use std::fmt;

/// Authored template text, possibly containing `{placeholder}` tokens and
/// inline markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    /// Wraps authored text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder identifiers in order of first appearance, without repeats.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_catalog::Template;
    ///
    /// let template = Template::new("<p>TCP: {tcpPorts}</p><p>UDP: {udpPorts} {tcpPorts}</p>");
    /// assert_eq!(template.placeholders(), vec!["tcpPorts", "udpPorts"]);
    /// ```
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in crate::interpolate::placeholder_names(&self.0) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key inside an [`IndexedMap`]: either a position or a semantic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexedKey {
    /// Numeric position such as `0`, `1`, `2`.
    Index(usize),
    /// Named auxiliary sibling such as `noSiteDatFileFound`.
    Name(String),
}

impl fmt::Display for IndexedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Pseudo-array addressed by small integers alongside named siblings.
///
/// Entries keep their authored order; lookups never depend on how a host
/// language would enumerate mixed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedMap {
    entries: Vec<(IndexedKey, Template)>,
}

impl IndexedMap {
    pub(crate) const fn from_entries(entries: Vec<(IndexedKey, Template)>) -> Self {
        Self { entries }
    }

    /// Template stored at numeric position `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Template> {
        self.get(&IndexedKey::Index(index))
    }

    /// Template stored under the auxiliary `name`.
    #[must_use]
    pub fn get_name(&self, name: &str) -> Option<&Template> {
        self.entries.iter().find_map(|(key, template)| match key {
            IndexedKey::Name(candidate) if candidate == name => Some(template),
            _ => None,
        })
    }

    /// Template stored under `key`.
    #[must_use]
    pub fn get(&self, key: &IndexedKey) -> Option<&Template> {
        self.entries
            .iter()
            .find_map(|(candidate, template)| (candidate == key).then_some(template))
    }

    /// Entries in authored order.
    pub fn iter(&self) -> impl Iterator<Item = (&IndexedKey, &Template)> {
        self.entries.iter().map(|(key, template)| (key, template))
    }

    /// Numeric entries sorted by position.
    #[must_use]
    pub fn positional(&self) -> Vec<(usize, &Template)> {
        let mut items: Vec<(usize, &Template)> = self
            .entries
            .iter()
            .filter_map(|(key, template)| match key {
                IndexedKey::Index(index) => Some((*index, template)),
                IndexedKey::Name(_) => None,
            })
            .collect();
        items.sort_by_key(|(index, _)| *index);
        items
    }

    /// Number of entries, positional and named.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolvable leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A single template string.
    Scalar(Template),
    /// Ordered paragraphs, rendered independently.
    List(Vec<Template>),
    /// Positional entries with optional named siblings.
    IndexedMap(IndexedMap),
}

impl Entry {
    /// Shape of this entry.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Scalar(_) => EntryKind::Scalar,
            Self::List(_) => EntryKind::List,
            Self::IndexedMap(_) => EntryKind::IndexedMap,
        }
    }

    /// Borrowed view of the entry.
    #[must_use]
    pub fn as_entry_ref(&self) -> EntryRef<'_> {
        match self {
            Self::Scalar(template) => EntryRef::Scalar(template),
            Self::List(items) => EntryRef::List(items),
            Self::IndexedMap(map) => EntryRef::IndexedMap(map),
        }
    }
}

/// Borrowed entry produced by key resolution.
///
/// Addressing a single element of a `List` or `IndexedMap` yields a `Scalar`
/// view of that element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    /// A single template.
    Scalar(&'a Template),
    /// An ordered list of templates.
    List(&'a [Template]),
    /// An indexed pseudo-array.
    IndexedMap(&'a IndexedMap),
}

impl EntryRef<'_> {
    /// Shape of the borrowed entry.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Scalar(_) => EntryKind::Scalar,
            Self::List(_) => EntryKind::List,
            Self::IndexedMap(_) => EntryKind::IndexedMap,
        }
    }
}

/// Shape names reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Single template.
    Scalar,
    /// Ordered list of templates.
    List,
    /// Indexed pseudo-array.
    IndexedMap,
    /// Interior grouping node rather than a leaf.
    Namespace,
}

impl EntryKind {
    /// Lower-case name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::List => "list",
            Self::IndexedMap => "indexed map",
            Self::Namespace => "namespace",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
