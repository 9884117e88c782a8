//! Host-facing lookup API.
//!
//! [`Translator`] ties the store, the resolver, the interpolator, and the
//! locale controller together behind string key paths. The [`Localizer`]
//! trait is the narrow, object-safe view GUI code depends on: it either
//! returns rendered text or nothing, and callers supply the visible fallback.

use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::controller::{LocaleChange, LocaleController, SubscriptionHandle};
use crate::entry::{EntryRef, IndexedKey};
use crate::error::{CatalogError, CatalogResult};
use crate::interpolate::{Escaping, TemplateArgs, render, render_all};
use crate::path::KeyPath;
use crate::resolver::{LocaleCatalog, Resolved, resolve};
use crate::store::CatalogStore;
use crate::tag::LocaleTag;

mod builder;

pub use builder::TranslatorBuilder;

/// Provides localised strings for user-facing output.
///
/// The trait is object-safe so applications can store it behind
/// `Arc<dyn Localizer>` and thread it through their widgets.
pub trait Localizer: Send + Sync {
    /// Renders the template at `id` for the active locale.
    fn lookup(&self, id: &str, args: Option<&TemplateArgs<'_>>) -> Option<String>;

    /// Resolves the message and returns `fallback` when nothing could be
    /// rendered.
    ///
    /// # Examples
    /// ```rust
    /// use locale_catalog::{Localizer, TemplateArgs};
    ///
    /// struct AlwaysFallback;
    ///
    /// impl Localizer for AlwaysFallback {
    ///     fn lookup(&self, _id: &str, _args: Option<&TemplateArgs<'_>>) -> Option<String> {
    ///         None
    ///     }
    /// }
    ///
    /// let localizer = AlwaysFallback;
    /// assert_eq!(localizer.message("common.about", None, "About"), "About");
    /// ```
    fn message(&self, id: &str, args: Option<&TemplateArgs<'_>>, fallback: &str) -> String {
        self.lookup(id, args).unwrap_or_else(|| fallback.to_owned())
    }

    /// Resolves the message, showing the raw key path when nothing could be
    /// rendered.
    fn message_or_path(&self, id: &str, args: Option<&TemplateArgs<'_>>) -> String {
        self.message(id, args, id)
    }
}

/// Localiser that never translates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLocalizer;

impl NoOpLocalizer {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Localizer for NoOpLocalizer {
    fn lookup(&self, _id: &str, _args: Option<&TemplateArgs<'_>>) -> Option<String> {
        None
    }
}

/// Recoverable failure observed by [`Localizer::lookup`].
#[derive(Debug, Clone, Copy)]
pub struct ResolutionIssue<'a> {
    /// Key path the host asked for.
    pub path: &'a str,
    /// Locale the lookup ran against, when one could be determined.
    pub locale: Option<&'a LocaleTag>,
    /// Error that prevented rendering.
    pub error: &'a CatalogError,
}

/// Reporter invoked when a lookup falls back to host-supplied text.
pub type ResolutionIssueReporter = Arc<dyn Fn(&ResolutionIssue<'_>) + Send + Sync>;

/// Rendered form of any entry shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedEntry {
    /// Rendered single template.
    Scalar(String),
    /// Rendered list items in authored order.
    List(Vec<String>),
    /// Rendered indexed-map entries in authored order.
    Indexed(Vec<(IndexedKey, String)>),
}

/// Resolves key paths against registered catalogues and renders them.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::{ArgValue, Catalog, LocaleTag, TemplateArgs, Translator};
///
/// let en = LocaleTag::parse("en")?;
/// let zh = LocaleTag::parse("zh")?;
/// let translator = Translator::builder()
///     .with_catalog(en.clone(), Catalog::builder()
///         .namespace("common", |ns| ns
///             .scalar("loggedAs", "Logged as <b>{username}</b>")
///             .scalar("about", "About"))
///         .build()?)
///     .with_catalog(zh.clone(), Catalog::builder()
///         .namespace("common", |ns| ns.scalar("loggedAs", "正在以 <b>{username}</b> 的身份登录"))
///         .build()?)
///     .with_default_locale(en)
///     .with_active_locale(zh)
///     .try_build()?;
///
/// let args = TemplateArgs::from([("username", ArgValue::from("alice"))]);
/// assert_eq!(translator.resolve("common.loggedAs", &args)?, "正在以 <b>alice</b> 的身份登录");
/// assert_eq!(translator.resolve("common.about", &TemplateArgs::new())?, "About");
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
pub struct Translator {
    controller: LocaleController,
    escaping: Escaping,
    report_issue: ResolutionIssueReporter,
}

impl Translator {
    /// Starts building a translator.
    #[must_use]
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::new()
    }

    /// Catalogue store shared with the controller.
    #[must_use]
    pub const fn store(&self) -> &Arc<CatalogStore> {
        self.controller.store()
    }

    /// Controller owning the active locale.
    #[must_use]
    pub const fn controller(&self) -> &LocaleController {
        &self.controller
    }

    /// Escaping applied to argument values.
    #[must_use]
    pub const fn escaping(&self) -> Escaping {
        self.escaping
    }

    /// Installs or replaces the catalogue for `tag`.
    pub fn register(&self, tag: LocaleTag, catalog: Catalog) {
        self.store().register(tag, catalog);
    }

    /// Declares the fallback locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] when `tag` is not registered.
    pub fn set_default(&self, tag: &LocaleTag) -> CatalogResult<()> {
        self.store().set_default(tag)
    }

    /// Switches the active locale.
    ///
    /// # Errors
    ///
    /// See [`LocaleController::set_active`].
    pub fn set_active(&self, tag: &LocaleTag) -> CatalogResult<()> {
        self.controller.set_active(tag)
    }

    /// Locale used by lookups that do not name one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotInitialized`] before a default locale or an
    /// active locale exists.
    pub fn active(&self) -> CatalogResult<LocaleTag> {
        self.controller.active()
    }

    /// Subscribes to locale changes.
    pub fn on_locale_change<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        self.controller.subscribe(observer)
    }

    /// Cancels a subscription made with [`Translator::on_locale_change`].
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.controller.unsubscribe(handle)
    }

    /// Renders the scalar at `path` for the active locale.
    ///
    /// # Errors
    ///
    /// Returns the resolution and interpolation errors described on
    /// [`resolve`] and [`render`], plus [`CatalogError::InvalidPath`] and
    /// [`CatalogError::NotInitialized`].
    pub fn resolve(&self, path: &str, args: &TemplateArgs<'_>) -> CatalogResult<String> {
        self.with_entry(None, path, None, |key, resolved| {
            render(resolved.scalar(key)?, args, self.escaping)
        })
    }

    /// Renders the scalar at `path` for an explicit locale.
    ///
    /// # Errors
    ///
    /// As [`Translator::resolve`], plus [`CatalogError::UnknownLocale`] when
    /// `locale` is not registered.
    pub fn resolve_in(
        &self,
        locale: &LocaleTag,
        path: &str,
        args: &TemplateArgs<'_>,
    ) -> CatalogResult<String> {
        self.with_entry(Some(locale), path, None, |key, resolved| {
            render(resolved.scalar(key)?, args, self.escaping)
        })
    }

    /// Renders position `index` of the list or indexed map at `path`.
    ///
    /// # Errors
    ///
    /// As [`Translator::resolve`], with [`CatalogError::IndexOutOfRange`] when
    /// neither catalogue holds the position.
    pub fn resolve_index(
        &self,
        path: &str,
        index: usize,
        args: &TemplateArgs<'_>,
    ) -> CatalogResult<String> {
        self.with_entry(None, path, Some(index), |key, resolved| {
            render(resolved.scalar(key)?, args, self.escaping)
        })
    }

    /// Renders every item of the list at `path` independently.
    ///
    /// # Errors
    ///
    /// As [`Translator::resolve`]; scalars and indexed maps are rejected with
    /// [`CatalogError::UnexpectedShape`].
    pub fn resolve_list(&self, path: &str, args: &TemplateArgs<'_>) -> CatalogResult<Vec<String>> {
        self.with_entry(None, path, None, |key, resolved| {
            render_all(resolved.list(key)?, args, self.escaping)
        })
    }

    /// Renders whatever entry lives at `path`, keeping its shape.
    ///
    /// `locale` defaults to the active locale.
    ///
    /// # Errors
    ///
    /// As [`Translator::resolve_in`].
    pub fn resolve_entry(
        &self,
        locale: Option<&LocaleTag>,
        path: &str,
        args: &TemplateArgs<'_>,
    ) -> CatalogResult<RenderedEntry> {
        self.with_entry(locale, path, None, |_, resolved| match resolved.entry {
            EntryRef::Scalar(template) => {
                render(template, args, self.escaping).map(RenderedEntry::Scalar)
            }
            EntryRef::List(items) => render_all(items, args, self.escaping).map(RenderedEntry::List),
            EntryRef::IndexedMap(map) => map
                .iter()
                .map(|(key, template)| {
                    render(template, args, self.escaping).map(|text| (key.clone(), text))
                })
                .collect::<CatalogResult<Vec<_>>>()
                .map(RenderedEntry::Indexed),
        })
    }

    fn with_entry<T, F>(
        &self,
        locale: Option<&LocaleTag>,
        path: &str,
        index: Option<usize>,
        use_entry: F,
    ) -> CatalogResult<T>
    where
        F: FnOnce(&KeyPath, Resolved<'_>) -> CatalogResult<T>,
    {
        let key = KeyPath::parse(path)?;
        let requested = match locale {
            Some(tag) => tag.clone(),
            None => self.controller.active()?,
        };
        let snapshot = self.store().snapshot(&requested)?;
        let resolved = resolve(
            LocaleCatalog {
                locale: &snapshot.requested.0,
                catalog: &snapshot.requested.1,
            },
            LocaleCatalog {
                locale: &snapshot.default.0,
                catalog: &snapshot.default.1,
            },
            &key,
            index,
        )?;
        use_entry(&key, resolved)
    }
}

impl Localizer for Translator {
    fn lookup(&self, id: &str, args: Option<&TemplateArgs<'_>>) -> Option<String> {
        let empty = TemplateArgs::new();
        let outcome = self.resolve(id, args.unwrap_or(&empty));
        match outcome {
            Ok(text) => Some(text),
            Err(error) => {
                let locale = self.active().ok();
                (self.report_issue)(&ResolutionIssue {
                    path: id,
                    locale: locale.as_ref(),
                    error: &error,
                });
                None
            }
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("controller", &self.controller)
            .field("escaping", &self.escaping)
            .field("report_issue", &"<reporter>")
            .finish()
    }
}

#[must_use]
fn default_reporter() -> ResolutionIssueReporter {
    Arc::new(|issue: &ResolutionIssue<'_>| {
        tracing::warn!(
            path = %issue.path,
            locale = issue.locale.map(LocaleTag::as_str),
            error = %issue.error,
            "failed to resolve catalogue entry"
        );
    })
}

#[cfg(test)]
mod tests;
