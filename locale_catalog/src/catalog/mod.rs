//! Immutable catalogue trees.
//!
//! A [`Catalog`] is a tree of [`Namespace`] nodes whose leaves are
//! [`Entry`] values. Trees are validated once, when they are built or
//! deserialised, and never mutated afterwards; replacing a locale means
//! registering a whole new tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::entry::Entry;
use crate::error::{CatalogError, CatalogResult};

mod builder;
mod raw;

pub use builder::{IndexedMapBuilder, NamespaceBuilder};
pub(crate) use raw::RawNode;

/// Interior or leaf node of a catalogue tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Grouping segment such as `setting` or `axios.messages`.
    Namespace(Namespace),
    /// Resolvable leaf.
    Entry(Entry),
}

/// Children of one namespace, keyed by segment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    children: BTreeMap<String, Node>,
}

impl Namespace {
    pub(crate) const fn from_children(children: BTreeMap<String, Node>) -> Self {
        Self { children }
    }

    /// Child node called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Children sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the namespace has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Complete set of entries for one locale.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::Catalog;
///
/// let catalog = Catalog::builder()
///     .namespace("common", |ns| {
///         ns.scalar("setting", "Setting")
///             .scalar("loggedAs", "Logged as <b>{username}</b>")
///     })
///     .namespace("customRouting", |ns| {
///         ns.indexed("messages", |m| {
///             m.at(0, "v2rayA will recognize all SiteDat file in <b>{V2RayLocationAsset}</b>")
///                 .named("emptyRuleNotPermitted", "Empty rule is not permitted")
///         })
///     })
///     .build()
///     .expect("catalogue should be valid");
///
/// assert_eq!(catalog.entry_paths(), vec![
///     "common.loggedAs",
///     "common.setting",
///     "customRouting.messages",
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    root: Namespace,
}

impl Catalog {
    /// Starts building a catalogue in memory.
    #[must_use]
    pub fn builder() -> NamespaceBuilder {
        NamespaceBuilder::new()
    }

    pub(crate) const fn from_root(root: Namespace) -> Self {
        Self { root }
    }

    /// Parses a JSON document into a catalogue.
    ///
    /// Duplicate keys are detected even though most JSON tooling silently keeps
    /// the last occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateKey`] or
    /// [`CatalogError::InvalidCatalog`] for structural problems, and
    /// [`CatalogError::InvalidCatalog`] at the root path when the text is not
    /// valid JSON.
    pub fn from_json_str(text: &str) -> CatalogResult<Self> {
        let raw: RawNode = serde_json::from_str(text)
            .map_err(|err| CatalogError::invalid_catalog("", err.to_string()))?;
        raw.into_catalog()
    }

    /// Converts an already-parsed JSON tree into a catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCatalog`] when the tree contains values
    /// other than strings, string arrays, and objects.
    pub fn from_json_value(value: serde_json::Value) -> CatalogResult<Self> {
        let raw: RawNode = serde_json::from_value(value)
            .map_err(|err| CatalogError::invalid_catalog("", err.to_string()))?;
        raw.into_catalog()
    }

    /// Root namespace.
    #[must_use]
    pub const fn root(&self) -> &Namespace {
        &self.root
    }

    /// Dotted paths of every entry, sorted.
    #[must_use]
    pub fn entry_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, "", &mut paths);
        paths
    }

    /// Number of entries in the tree.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entry_paths().len()
    }
}

fn collect_paths(namespace: &Namespace, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in namespace.iter() {
        let path = join_path(prefix, name);
        match node {
            Node::Namespace(child) => collect_paths(child, &path, out),
            Node::Entry(_) => out.push(path),
        }
    }
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawNode::deserialize(deserializer)?;
        raw.into_catalog().map_err(serde::de::Error::custom)
    }
}
