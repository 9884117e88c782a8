//! Layered localisation settings.
//!
//! Values are merged from built-in defaults, an optional TOML file, and
//! environment variables prefixed with `LOCALE_CATALOG_`, later layers
//! overriding earlier ones.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Serialized};
#[cfg(feature = "toml")]
use figment::providers::Format as _;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::interpolate::Escaping;
use crate::localizer::Translator;
use crate::tag::LocaleTag;

/// Prefix for environment overrides such as `LOCALE_CATALOG_DEFAULT_LOCALE`.
pub const ENV_PREFIX: &str = "LOCALE_CATALOG_";

/// Start-up configuration for a [`Translator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalisationSettings {
    /// Locale consulted when the requested one lacks an entry.
    pub default_locale: LocaleTag,
    /// Locale activated at start-up; the default is used when absent.
    pub active_locale: Option<LocaleTag>,
    /// Directory of `<tag>.json` or `<tag>.toml` catalogue files.
    pub catalog_dir: Option<Utf8PathBuf>,
    /// Escaping applied to argument values.
    pub escaping: Escaping,
}

impl Default for LocalisationSettings {
    fn default() -> Self {
        Self {
            default_locale: LocaleTag::from_langid(unic_langid::langid!("en")),
            active_locale: None,
            catalog_dir: None,
            escaping: Escaping::default(),
        }
    }
}

impl LocalisationSettings {
    /// Loads settings from defaults, `config_path`, and the environment.
    ///
    /// A missing configuration file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Settings`] when a layer cannot be parsed or a
    /// value has the wrong type.
    pub fn load(config_path: Option<&Utf8Path>) -> CatalogResult<Self> {
        Self::figment(config_path)
            .extract()
            .map_err(CatalogError::settings)
    }

    /// Figment describing every configuration layer.
    #[must_use]
    pub fn figment(config_path: Option<&Utf8Path>) -> Figment {
        let defaults = Figment::from(Serialized::defaults(Self::default()));
        let layered = match config_path {
            #[cfg(feature = "toml")]
            Some(path) => defaults.merge(figment::providers::Toml::file(path.as_std_path())),
            #[cfg(not(feature = "toml"))]
            Some(path) => {
                tracing::warn!(path = %path, "TOML support disabled; ignoring settings file");
                defaults
            }
            None => defaults,
        };
        layered.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Locale to activate once catalogues are loaded.
    #[must_use]
    pub fn startup_locale(&self) -> &LocaleTag {
        self.active_locale.as_ref().unwrap_or(&self.default_locale)
    }
}

impl Translator {
    /// Builds a translator from loaded settings.
    ///
    /// Every catalogue in `catalog_dir` is registered before the default and
    /// active locales are applied.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::File`] or a catalogue validation error when the
    /// directory cannot be loaded, and [`CatalogError::UnknownLocale`] when
    /// the configured locales have no catalogue.
    pub fn from_settings(settings: &LocalisationSettings) -> CatalogResult<Self> {
        let catalogs = match &settings.catalog_dir {
            Some(dir) => crate::loader::load_catalog_dir(dir)?,
            None => Vec::new(),
        };
        let mut builder = Self::builder()
            .with_catalogs(catalogs)
            .with_default_locale(settings.default_locale.clone())
            .with_escaping(settings.escaping);
        if let Some(active) = &settings.active_locale {
            builder = builder.with_active_locale(active.clone());
        }
        builder.try_build()
    }
}
