use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::convert::Infallible;
use core::fmt;
use serde::{Serialize, de::DeserializeOwned};

use crate::*;

/// Key/value text storage provided by the host, for example browser local storage.
pub trait StateStore {
    type Error: fmt::Display;

    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> core::result::Result<(), Self::Error>;
}

/// State that is stored as JSON under a fixed, versioned key.
pub trait StorageKey: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;

    /// Key an older release wrote the same value under, read once when `KEY` is empty.
    const LEGACY_KEY: Option<&'static str> = None;

    fn from_stored(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| {
            log::warn!("{}: discarding stored state: {}", Self::KEY, err);
            GameError::CorruptState
        })
    }

    fn to_stored(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::error!("{}: cannot serialize state: {}", Self::KEY, err);
            GameError::SerializeFailed
        })
    }

    /// Missing and malformed values both give a fresh state.
    fn load_or_default(store: &impl StateStore) -> Self {
        match store.load(Self::KEY) {
            Some(raw) => Self::from_stored(&raw).unwrap_or_default(),
            None => {
                log::debug!("{}: nothing stored", Self::KEY);
                Self::default()
            }
        }
    }

    /// Like [`StorageKey::load_or_default`], but with nothing under `KEY` it falls back to
    /// `LEGACY_KEY` and re-saves whatever it finds there under `KEY`.
    fn load_or_migrate(store: &mut impl StateStore) -> Self {
        let legacy = match (store.load(Self::KEY), Self::LEGACY_KEY) {
            (None, Some(old_key)) => store.load(old_key).map(|raw| (old_key, raw)),
            _ => None,
        };
        let Some((old_key, raw)) = legacy else {
            return Self::load_or_default(&*store);
        };

        match Self::from_stored(&raw) {
            Ok(state) => {
                log::info!("{}: migrating state stored under {}", Self::KEY, old_key);
                state.save_to(store);
                state
            }
            Err(_) => Self::default(),
        }
    }

    /// Writes the state, logging instead of failing. Returns whether the write went through.
    fn save_to(&self, store: &mut impl StateStore) -> bool {
        let Ok(raw) = self.to_stored() else {
            return false;
        };
        match store.save(Self::KEY, &raw) {
            Ok(()) => true,
            Err(err) => {
                log::error!("{}: failed to save: {}", Self::KEY, err);
                false
            }
        }
    }
}

impl StorageKey for BoardState {
    const KEY: &'static str = "qwixx:board:v1";
    const LEGACY_KEY: Option<&'static str> = Some("quixx-state");
}

impl StorageKey for DiceState {
    const KEY: &'static str = "qwixx:dice:v1";
}

/// In-memory store for hosts without persistent storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    type Error = Infallible;

    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> core::result::Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
