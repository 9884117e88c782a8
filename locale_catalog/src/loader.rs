//! Reading catalogue files from disk.
//!
//! A catalogue file is named after its locale (`en.json`, `zh-CN.toml`) and
//! holds one nested mapping. Directory access goes through `cap-std` so a
//! loader only ever touches the directory it was pointed at.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

use crate::catalog::{Catalog, RawNode};
use crate::error::{CatalogError, CatalogResult};
use crate::tag::LocaleTag;

/// Catalogue file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.toml`
    #[cfg(feature = "toml")]
    Toml,
}

impl CatalogFormat {
    /// Format implied by a file extension, compared case-insensitively.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            #[cfg(feature = "toml")]
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parses `text` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::File`] for syntax errors and the structural
    /// errors of [`Catalog`] wrapped the same way, all tagged with `path`.
    pub fn parse(self, path: &Utf8Path, text: &str) -> CatalogResult<Catalog> {
        let raw: RawNode = match self {
            Self::Json => serde_json::from_str(text).map_err(|err| CatalogError::file(path, err))?,
            #[cfg(feature = "toml")]
            Self::Toml => toml::from_str(text).map_err(|err| CatalogError::file(path, err))?,
        };
        raw.into_catalog().map_err(|err| CatalogError::file(path, err))
    }
}

/// Reads one catalogue file, taking the locale from the file stem.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use locale_catalog::load_catalog_file;
///
/// let (tag, catalog) = load_catalog_file(Utf8Path::new("locales/zh.json"))?;
/// assert_eq!(tag.as_str(), "zh");
/// # let _ = catalog;
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
///
/// # Errors
///
/// Returns [`CatalogError::File`] when the file cannot be read, has an
/// unsupported extension, or does not hold a valid catalogue, and
/// [`CatalogError::InvalidLocaleTag`] when the stem is not a locale tag.
pub fn load_catalog_file(path: &Utf8Path) -> CatalogResult<(LocaleTag, Catalog)> {
    let (dir, file_name) =
        open_parent_dir_and_name(path).map_err(|err| CatalogError::file(path, err))?;
    let (tag, format) = classify(Utf8Path::new(&file_name))
        .ok_or_else(|| CatalogError::file(path, "unsupported catalogue file extension"))??;
    let text = dir
        .read_to_string(&file_name)
        .map_err(|err| CatalogError::file(path, err))?;
    let catalog = format.parse(path, &text)?;
    debug!(path = %path, locale = %tag, "loaded catalogue file");
    Ok((tag, catalog))
}

/// Reads every catalogue file in `dir`, sorted by file name.
///
/// Files with other extensions are ignored. Subdirectories are not searched.
///
/// # Errors
///
/// Returns [`CatalogError::File`] when the directory or a file cannot be read
/// or parsed, or when two files name the same locale.
pub fn load_catalog_dir(dir: &Utf8Path) -> CatalogResult<Vec<(LocaleTag, Catalog)>> {
    let handle = Dir::open_ambient_dir(dir, ambient_authority())
        .map_err(|err| CatalogError::file(dir, err))?;
    let mut files = BTreeMap::new();
    for item in handle.entries().map_err(|err| CatalogError::file(dir, err))? {
        let entry = item.map_err(|err| CatalogError::file(dir, err))?;
        let file_type = entry.file_type().map_err(|err| CatalogError::file(dir, err))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().map_err(|err| CatalogError::file(dir, err))?;
        if let Some(kind) = classify(Utf8Path::new(&name)) {
            files.insert(name, kind);
        }
    }

    let mut loaded: Vec<(LocaleTag, Catalog)> = Vec::with_capacity(files.len());
    for (name, kind) in files {
        let path = dir.join(&name);
        let (tag, format) = kind?;
        if loaded.iter().any(|(existing, _)| existing == &tag) {
            return Err(CatalogError::file(
                &path,
                format!("locale '{tag}' is defined by more than one file"),
            ));
        }
        let text = handle
            .read_to_string(&name)
            .map_err(|err| CatalogError::file(&path, err))?;
        let catalog = format.parse(&path, &text)?;
        loaded.push((tag, catalog));
    }
    debug!(dir = %dir, locales = loaded.len(), "loaded catalogue directory");
    Ok(loaded)
}

/// Locale and format for a catalogue file name, or `None` for other files.
fn classify(name: &Utf8Path) -> Option<CatalogResult<(LocaleTag, CatalogFormat)>> {
    let format = CatalogFormat::from_extension(name.extension()?)?;
    let stem = name.file_stem()?;
    Some(LocaleTag::parse(stem).map(|tag| (tag, format)))
}

fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("cannot determine file name for catalogue path"))?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}

/// Directory path joined with a catalogue file name.
#[must_use]
pub fn catalog_file_path(dir: &Utf8Path, tag: &LocaleTag, format: CatalogFormat) -> Utf8PathBuf {
    let extension = match format {
        CatalogFormat::Json => "json",
        #[cfg(feature = "toml")]
        CatalogFormat::Toml => "toml",
    };
    dir.join(format!("{tag}.{extension}"))
}
