//! Locale tags identifying catalogues.
//!
//! Tags are validated as BCP 47 language identifiers and stored in canonical
//! form, so `zh_CN`, `zh-cn`, and `zh-CN.UTF-8` all name the same catalogue.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::CatalogError;

/// Canonical locale identifier such as `en` or `zh-CN`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag {
    id: LanguageIdentifier,
    canonical: String,
}

impl LocaleTag {
    /// Parses and normalises a raw locale string.
    ///
    /// Encoding suffixes (`.UTF-8`) and modifiers (`@latin`) are dropped and
    /// underscores become hyphens before validation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_catalog::LocaleTag;
    ///
    /// let tag = LocaleTag::parse("zh_CN.UTF-8").expect("valid tag");
    /// assert_eq!(tag.as_str(), "zh-CN");
    /// assert_eq!(tag.language(), "zh");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidLocaleTag`] when the input is empty or
    /// not a valid language identifier.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let invalid = |message: String| CatalogError::InvalidLocaleTag {
            value: raw.to_owned(),
            message,
        };
        let stripped = raw
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if stripped.is_empty() {
            return Err(invalid(String::from("locale tag is empty")));
        }
        let candidate = stripped.replace('_', "-");
        let id = LanguageIdentifier::from_str(&candidate).map_err(|err| invalid(err.to_string()))?;
        Ok(Self::from_langid(id))
    }

    /// Wraps an already-parsed language identifier.
    #[must_use]
    pub fn from_langid(id: LanguageIdentifier) -> Self {
        let canonical = id.to_string();
        Self { id, canonical }
    }

    /// Canonical string form of the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Primary language subtag, e.g. `zh` for `zh-CN`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Underlying language identifier.
    #[must_use]
    pub const fn langid(&self) -> &LanguageIdentifier {
        &self.id
    }
}

impl PartialEq for LocaleTag {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for LocaleTag {}

impl Hash for LocaleTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for LocaleTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocaleTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Debug for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocaleTag").field(&self.canonical).finish()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for LocaleTag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for LocaleTag {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.canonical
    }
}

impl From<LanguageIdentifier> for LocaleTag {
    fn from(id: LanguageIdentifier) -> Self {
        Self::from_langid(id)
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
