//! Dotted and indexed key paths.
//!
//! `setting.messages.gfwlist`, `customRouting.messages.1`, and
//! `welcome.messages[0]` are all valid. A segment made only of ASCII digits
//! addresses a position; anything else addresses a name.

use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Namespace child or named auxiliary of an indexed map.
    Name(String),
    /// Position inside an indexed map or list.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Parsed key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parses `raw` into segments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_catalog::{KeyPath, Segment};
    ///
    /// let path = KeyPath::parse("welcome.messages[1]").expect("valid path");
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         Segment::Name("welcome".into()),
    ///         Segment::Name("messages".into()),
    ///         Segment::Index(1),
    ///     ]
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPath`] for empty paths, empty segments,
    /// unterminated or non-numeric brackets, and stray closing brackets.
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        let invalid = |reason: &str| CatalogError::invalid_path(raw, reason);
        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            let (head, mut rest) = part.split_once('[').map_or((part, None), |(head, tail)| {
                (head, Some(tail))
            });
            if head.is_empty() {
                return Err(invalid("path contains an empty segment"));
            }
            segments.push(parse_plain(head).ok_or_else(|| invalid("unexpected ']'"))?);

            while let Some(tail) = rest {
                let (inside, after) = tail
                    .split_once(']')
                    .ok_or_else(|| invalid("unterminated '['"))?;
                let index = parse_index(inside)
                    .ok_or_else(|| invalid("brackets must contain a non-negative integer"))?;
                segments.push(Segment::Index(index));
                rest = if after.is_empty() {
                    None
                } else {
                    Some(
                        after
                            .strip_prefix('[')
                            .ok_or_else(|| invalid("unexpected text after ']'"))?,
                    )
                };
            }
        }

        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    /// Segments in walk order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Path exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Copy of this path with an extra index segment appended.
    #[must_use]
    pub fn with_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self {
            raw: format!("{}.{index}", self.raw),
            segments,
        }
    }
}

fn parse_plain(text: &str) -> Option<Segment> {
    if text.contains(']') {
        return None;
    }
    Some(parse_index(text).map_or_else(|| Segment::Name(text.to_owned()), Segment::Index))
}

fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for KeyPath {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
