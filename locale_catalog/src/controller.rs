//! Active-locale state and change notification.
//!
//! The controller is the only holder of the "current locale". Components that
//! need it ask the controller or subscribe to changes; nothing reads it from
//! ambient global state.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::store::CatalogStore;
use crate::tag::LocaleTag;

/// Notification delivered to observers after the active locale changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChange {
    /// Locale that was active before the switch, if one had been set.
    pub previous: Option<LocaleTag>,
    /// Newly active locale.
    pub current: LocaleTag,
}

/// Callback invoked for every locale change.
pub type LocaleObserver = Arc<dyn Fn(&LocaleChange) + Send + Sync>;

/// Token returned by [`LocaleController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionHandle, LocaleObserver)>,
}

/// Owns the active locale and notifies observers when it changes.
///
/// Switches are serialised: the active pointer is updated and every observer
/// is called before the next `set_active` may begin, so observers see changes
/// in the order the calls were made. Observers run synchronously on the
/// switching thread in subscription order and must not call
/// [`LocaleController::set_active`] themselves.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use locale_catalog::{Catalog, CatalogStore, LocaleController, LocaleTag};
///
/// let store = Arc::new(CatalogStore::new());
/// let en = LocaleTag::parse("en")?;
/// let zh = LocaleTag::parse("zh")?;
/// store.register(en.clone(), Catalog::builder().build()?);
/// store.register(zh.clone(), Catalog::builder().build()?);
/// store.set_default(&en)?;
///
/// let controller = LocaleController::new(Arc::clone(&store));
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// controller.subscribe(move |change| {
///     if let Ok(mut log) = sink.lock() {
///         log.push(change.current.to_string());
///     }
/// });
///
/// controller.set_active(&zh)?;
/// assert_eq!(controller.active()?, zh);
/// assert_eq!(*seen.lock().expect("lock"), vec!["zh"]);
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
pub struct LocaleController {
    store: Arc<CatalogStore>,
    active: RwLock<Option<LocaleTag>>,
    switch_lock: Mutex<()>,
    notifying: Mutex<Option<ThreadId>>,
    observers: Mutex<Observers>,
}

impl LocaleController {
    /// Creates a controller over `store` with no explicit active locale.
    #[must_use]
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            active: RwLock::new(None),
            switch_lock: Mutex::new(()),
            notifying: Mutex::new(None),
            observers: Mutex::new(Observers::default()),
        }
    }

    /// Store whose registrations gate [`LocaleController::set_active`].
    #[must_use]
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Makes `tag` the active locale and notifies observers.
    ///
    /// Activating the locale that is already active changes nothing and
    /// notifies nobody.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] when `tag` has no registered
    /// catalogue and [`CatalogError::ReentrantSwitch`] when called from inside
    /// an observer of this controller.
    pub fn set_active(&self, tag: &LocaleTag) -> CatalogResult<()> {
        if *self.notifying.lock() == Some(thread::current().id()) {
            return Err(CatalogError::ReentrantSwitch {
                requested: tag.clone(),
            });
        }
        if !self.store.contains(tag) {
            return Err(CatalogError::UnknownLocale { tag: tag.clone() });
        }

        let _serial = self.switch_lock.lock();
        let previous = {
            let mut active = self.active.write();
            if active.as_ref() == Some(tag) {
                return Ok(());
            }
            active.replace(tag.clone())
        };
        debug!(
            locale = %tag,
            previous = previous.as_ref().map(LocaleTag::as_str),
            "active locale changed"
        );

        let change = LocaleChange {
            previous,
            current: tag.clone(),
        };
        let observers: Vec<LocaleObserver> = self
            .observers
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        let _notifying = NotifyingGuard::enter(&self.notifying);
        for observer in observers {
            observer(&change);
        }
        Ok(())
    }

    /// Locale used for resolutions that do not name one.
    ///
    /// This is the explicitly activated locale or, before any activation, the
    /// store's default.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotInitialized`] when neither exists.
    pub fn active(&self) -> CatalogResult<LocaleTag> {
        if let Some(tag) = self.active.read().clone() {
            return Ok(tag);
        }
        self.store
            .default_locale()
            .ok_or(CatalogError::NotInitialized)
    }

    /// Registers `observer` to be called after every locale change.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock();
        let handle = SubscriptionHandle(observers.next_id);
        observers.next_id = observers.next_id.saturating_add(1);
        observers.entries.push((handle, Arc::new(observer)));
        handle
    }

    /// Removes the observer behind `handle`.
    ///
    /// Returns `false` when the handle was already removed. A notification
    /// round that is in progress still reaches the removed observer.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.entries.len();
        observers.entries.retain(|(existing, _)| *existing != handle);
        observers.entries.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.lock().entries.len()
    }
}

impl fmt::Debug for LocaleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleController")
            .field("active", &*self.active.read())
            .field("observers", &self.observer_count())
            .finish_non_exhaustive()
    }
}

/// Marks the current thread as notifying until dropped.
struct NotifyingGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> NotifyingGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock() = Some(thread::current().id());
        Self { slot }
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}
