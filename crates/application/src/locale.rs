//! Active locale and its change notifications.

use std::sync::{Arc, PoisonError, RwLock};

use storefront_domain::{DomainResult, Locale};
use tracing::info;

/// Something whose behavior depends on the active locale.
pub trait LocaleAware: Send + Sync {
    /// Called when the active locale changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscriber cannot adopt the locale.
    fn change_locale(&self, locale: &Locale) -> DomainResult<()>;
}

/// Owns the active locale and tells subscribers when it changes.
pub struct LocaleHub {
    current: RwLock<Locale>,
    subscribers: RwLock<Vec<Arc<dyn LocaleAware>>>,
}

impl LocaleHub {
    /// Creates a hub with an initial locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            current: RwLock::new(locale),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// The active locale.
    #[must_use]
    pub fn current(&self) -> Locale {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Adds a subscriber. It is not told about the current locale.
    pub fn subscribe(&self, subscriber: Arc<dyn LocaleAware>) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }

    /// Makes `locale` active and notifies subscribers in registration
    /// order. Setting the active locale again does nothing.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first subscriber error. The locale stays
    /// switched.
    pub fn set_locale(&self, locale: Locale) -> DomainResult<()> {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if *current == locale {
                return Ok(());
            }
            info!(from = %current, to = %locale, "locale changed");
            *current = locale.clone();
        }

        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in subscribers {
            subscriber.change_locale(&locale)?;
        }
        Ok(())
    }
}
