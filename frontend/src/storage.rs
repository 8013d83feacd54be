use std::collections::HashMap;

use web_sys::Storage;

use crate::error::{LandingError, LandingResult};

/// Flags that survive page loads. They are never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    QuizCompleted,
    ExitIntentShown,
}

impl Flag {
    pub fn key(self) -> &'static str {
        match self {
            Flag::QuizCompleted => "quizCompleted",
            Flag::ExitIntentShown => "exitIntentShown",
        }
    }
}

/// Minimal key-value persistence used for the page flags.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> LandingResult<()>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn is_flag_set(&self, flag: Flag) -> bool {
        self.has(flag.key())
    }

    fn set_flag(&mut self, flag: Flag) -> LandingResult<()> {
        self.set(flag.key(), "true")
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.values.insert(flag.key().to_string(), "true".to_string());
        self
    }
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> LandingResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser `localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> LandingResult<Self> {
        let storage = web_sys::window()
            .ok_or(LandingError::StorageUnavailable)?
            .local_storage()?
            .ok_or(LandingError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl FlagStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> LandingResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| LandingError::Storage(format!("{}: {:?}", key, e)))
    }
}

/// Local storage when the browser grants it, an in-memory fallback otherwise.
pub fn open_flag_store() -> Box<dyn FlagStore> {
    match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Falling back to in-memory flags: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_has() {
        let mut store = MemoryStore::new();
        assert!(!store.has("quizCompleted"));
        store.set("quizCompleted", "true").unwrap();
        assert_eq!(store.get("quizCompleted").as_deref(), Some("true"));
        assert!(store.is_flag_set(Flag::QuizCompleted));
        assert!(!store.is_flag_set(Flag::ExitIntentShown));
    }

    #[test]
    fn flags_use_fixed_keys() {
        let mut store = MemoryStore::new();
        store.set_flag(Flag::ExitIntentShown).unwrap();
        assert_eq!(store.get("exitIntentShown").as_deref(), Some("true"));
    }
}
