//! Fluent construction of catalogue trees in memory.

use super::{Catalog, RawNode};
use crate::error::CatalogResult;

/// Collects the children of one namespace.
///
/// Nothing is validated until [`NamespaceBuilder::build`] runs, so repeated
/// keys surface as a single [`crate::CatalogError::DuplicateKey`] carrying the
/// full dotted path.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct NamespaceBuilder {
    items: Vec<(String, RawNode)>,
}

impl NamespaceBuilder {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single template.
    pub fn scalar(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.items.push((key.into(), RawNode::Text(text.into())));
        self
    }

    /// Adds an ordered list of templates.
    pub fn list<I, T>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let sequence = items
            .into_iter()
            .map(|item| RawNode::Text(item.into()))
            .collect();
        self.items.push((key.into(), RawNode::Sequence(sequence)));
        self
    }

    /// Adds an indexed map populated by `build`.
    pub fn indexed<F>(mut self, key: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(IndexedMapBuilder) -> IndexedMapBuilder,
    {
        let map = build(IndexedMapBuilder::default());
        self.items.push((key.into(), RawNode::Indexed(map.items)));
        self
    }

    /// Adds a nested namespace populated by `build`.
    pub fn namespace<F>(mut self, key: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let child = build(Self::new());
        self.items.push((key.into(), RawNode::Mapping(child.items)));
        self
    }

    /// Validates the collected tree and produces a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::DuplicateKey`] when two siblings share a
    /// key and [`crate::CatalogError::InvalidCatalog`] for keys that could not
    /// be addressed by a key path.
    pub fn build(self) -> CatalogResult<Catalog> {
        RawNode::Mapping(self.items).into_catalog()
    }
}

/// Collects the entries of an indexed map.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct IndexedMapBuilder {
    items: Vec<(String, RawNode)>,
}

impl IndexedMapBuilder {
    /// Adds the template at numeric position `index`.
    pub fn at(mut self, index: usize, text: impl Into<String>) -> Self {
        self.items
            .push((index.to_string(), RawNode::Text(text.into())));
        self
    }

    /// Adds a named auxiliary template.
    pub fn named(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.items.push((name.into(), RawNode::Text(text.into())));
        self
    }
}
