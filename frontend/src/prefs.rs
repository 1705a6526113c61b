//! Theme and cookie-consent preferences.
//!
//! Preferences live in one process-wide store. [`init`] reads them from local
//! storage once at startup, every setter writes through. Storage that is
//! missing or refuses writes only costs persistence, never the caller.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("could not encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait PreferenceStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The browser's `window.localStorage`.
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

impl PreferenceStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CookiePreferences {
    /// Strictly necessary cookies cannot be declined.
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub functional: bool,
    pub consented_at: DateTime<Utc>,
}

impl CookiePreferences {
    pub fn accept_all(now: DateTime<Utc>) -> Self {
        Self::custom(true, true, true, now)
    }

    pub fn reject_optional(now: DateTime<Utc>) -> Self {
        Self::custom(false, false, false, now)
    }

    pub fn custom(analytics: bool, marketing: bool, functional: bool, now: DateTime<Utc>) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
            functional,
            consented_at: now,
        }
    }
}

pub struct PreferenceStore<S: PreferenceStorage> {
    storage: S,
    theme: Theme,
    consent: Option<CookiePreferences>,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    pub fn init(storage: S) -> Self {
        let theme = match storage.read(config::THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unknown stored theme {:?}", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Could not read theme: {}", e);
                Theme::default()
            }
        };

        let consent = match storage.read(config::COOKIE_CONSENT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<CookiePreferences>(&raw) {
                Ok(mut prefs) => {
                    prefs.necessary = true;
                    Some(prefs)
                }
                Err(e) => {
                    log::warn!("Discarding unreadable cookie consent: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read cookie consent: {}", e);
                None
            }
        };

        log::debug!("Preferences loaded: theme={}, consent={}", theme.as_str(), consent.is_some());
        Self {
            storage,
            theme,
            consent,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn consent(&self) -> Option<&CookiePreferences> {
        self.consent.as_ref()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist(config::THEME_KEY, || Ok(theme.as_str().to_string()));
    }

    pub fn set_consent(&mut self, mut prefs: CookiePreferences) {
        prefs.necessary = true;
        let encoded = serde_json::to_string(&prefs);
        self.consent = Some(prefs);
        self.persist(config::COOKIE_CONSENT_KEY, || Ok(encoded?));
    }

    fn persist(&self, key: &str, value: impl FnOnce() -> Result<String, StorageError>) {
        let result = value().and_then(|value| self.storage.write(key, &value));
        if let Err(e) = result {
            log::warn!("Keeping {} in memory only: {}", key, e);
        }
    }
}

thread_local! {
    static STORE: RefCell<Option<PreferenceStore<LocalStorage>>> = RefCell::new(None);
}

fn with_store<R>(f: impl FnOnce(&mut PreferenceStore<LocalStorage>) -> R) -> R {
    STORE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let store = slot.get_or_insert_with(|| PreferenceStore::init(LocalStorage));
        f(store)
    })
}

/// Loads stored preferences and applies the theme. Call once before the
/// first render.
pub fn init() {
    STORE.with(|cell| *cell.borrow_mut() = Some(PreferenceStore::init(LocalStorage)));
    apply_theme(theme());
}

pub fn theme() -> Theme {
    with_store(|store| store.theme())
}

pub fn set_theme(theme: Theme) {
    with_store(|store| store.set_theme(theme));
    apply_theme(theme);
}

pub fn cookie_consent() -> Option<CookiePreferences> {
    with_store(|store| store.consent().cloned())
}

pub fn set_cookie_consent(prefs: CookiePreferences) {
    log::info!(
        "Cookie consent saved (analytics={}, marketing={}, functional={})",
        prefs.analytics,
        prefs.marketing,
        prefs.functional
    );
    with_store(|store| store.set_consent(prefs));
}

fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    match root {
        Some(root) => {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                log::warn!("Could not apply theme: {:?}", e);
            }
        }
        None => log::warn!("No document to apply the theme to"),
    }
}
