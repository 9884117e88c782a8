//! Unvalidated catalogue trees and their conversion into [`Catalog`].
//!
//! Deserialisation first produces a [`RawNode`] that keeps every mapping key in
//! source order, duplicates included, so validation can report them with the
//! full dotted path instead of silently keeping the last value.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use super::{Catalog, Namespace, Node, join_path};
use crate::entry::{Entry, IndexedKey, IndexedMap, Template};
use crate::error::{CatalogError, CatalogResult};

/// Catalogue node as authored, before validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawNode {
    /// Template text.
    Text(String),
    /// Ordered sequence; must contain only text to be valid.
    Sequence(Vec<RawNode>),
    /// Mapping in source order. Becomes an indexed map when any key is numeric.
    Mapping(Vec<(String, RawNode)>),
    /// Mapping explicitly authored as an indexed map.
    Indexed(Vec<(String, RawNode)>),
    /// Value with no catalogue meaning (numbers, booleans, null).
    Unsupported(&'static str),
}

impl RawNode {
    /// Validates the tree and converts it into a [`Catalog`].
    pub(crate) fn into_catalog(self) -> CatalogResult<Catalog> {
        match self {
            Self::Mapping(items) => {
                let root = build_namespace("", items)?;
                Ok(Catalog::from_root(root))
            }
            other => Err(CatalogError::invalid_catalog(
                "",
                format!("catalogue root must be a mapping, found {}", other.describe()),
            )),
        }
    }

    const fn describe(&self) -> &'static str {
        match self {
            Self::Text(_) => "a string",
            Self::Sequence(_) => "an array",
            Self::Mapping(_) | Self::Indexed(_) => "a mapping",
            Self::Unsupported(kind) => kind,
        }
    }
}

fn build_namespace(prefix: &str, items: Vec<(String, RawNode)>) -> CatalogResult<Namespace> {
    let mut children = BTreeMap::new();
    for (key, raw) in items {
        let path = join_path(prefix, &key);
        validate_key(&path, &key)?;
        if children.contains_key(&key) {
            return Err(CatalogError::duplicate_key(path));
        }
        let node = build_node(&path, raw)?;
        children.insert(key, node);
    }
    Ok(Namespace::from_children(children))
}

fn build_node(path: &str, raw: RawNode) -> CatalogResult<Node> {
    match raw {
        RawNode::Text(text) => Ok(Node::Entry(Entry::Scalar(Template::new(text)))),
        RawNode::Sequence(items) => {
            let templates = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| expect_text(&format!("{path}.{index}"), item))
                .collect::<CatalogResult<Vec<_>>>()?;
            Ok(Node::Entry(Entry::List(templates)))
        }
        RawNode::Mapping(items) if items.iter().any(|(key, _)| is_index_key(key)) => {
            build_indexed(path, items)
        }
        RawNode::Indexed(items) => build_indexed(path, items),
        RawNode::Mapping(items) => Ok(Node::Namespace(build_namespace(path, items)?)),
        RawNode::Unsupported(kind) => Err(CatalogError::invalid_catalog(
            path,
            format!("{kind} values are not supported"),
        )),
    }
}

fn build_indexed(path: &str, items: Vec<(String, RawNode)>) -> CatalogResult<Node> {
    let mut entries: Vec<(IndexedKey, Template)> = Vec::with_capacity(items.len());
    for (key, raw) in items {
        let item_path = join_path(path, &key);
        validate_key(&item_path, &key)?;
        let indexed_key = if is_index_key(&key) {
            let index = key.parse::<usize>().map_err(|_| {
                CatalogError::invalid_catalog(&item_path, "index does not fit in usize")
            })?;
            IndexedKey::Index(index)
        } else {
            IndexedKey::Name(key)
        };
        if entries.iter().any(|(existing, _)| existing == &indexed_key) {
            return Err(CatalogError::duplicate_key(item_path));
        }
        let template = expect_text(&item_path, raw)?;
        entries.push((indexed_key, template));
    }
    Ok(Node::Entry(Entry::IndexedMap(IndexedMap::from_entries(
        entries,
    ))))
}

fn expect_text(path: &str, raw: RawNode) -> CatalogResult<Template> {
    match raw {
        RawNode::Text(text) => Ok(Template::new(text)),
        other => Err(CatalogError::invalid_catalog(
            path,
            format!("expected a string, found {}", other.describe()),
        )),
    }
}

fn validate_key(path: &str, key: &str) -> CatalogResult<()> {
    if key.is_empty() {
        return Err(CatalogError::invalid_catalog(path, "keys must not be empty"));
    }
    if key.contains(['.', '[', ']']) {
        return Err(CatalogError::invalid_catalog(
            path,
            "keys must not contain '.', '[' or ']'",
        ));
    }
    Ok(())
}

fn is_index_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit())
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, an array of strings, or a mapping")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RawNode::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RawNode::Text(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("number"))
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("number"))
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Unsupported("null"))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<RawNode>()? {
            items.push(item);
        }
        Ok(RawNode::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut items = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<String, RawNode>()? {
            items.push((key, value));
        }
        Ok(RawNode::Mapping(items))
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}
