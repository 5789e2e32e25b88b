//! In-memory configuration registry.
//! Maps configuration ids to documents for the lifetime of the process.
//! All read-modify-write sequences happen under a single lock so two requests
//! for the same unknown id can't both generate and overwrite each other.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::Config;

#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<String, Arc<Config>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the given entries.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Config)>,
    {
        let entries = entries
            .into_iter()
            .map(|(id, config)| (id, Arc::new(config)))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Config>> {
        self.lock().get(id).cloned()
    }

    /// Returns the entry for `id`, creating it with `fallback` if absent.
    /// `fallback` runs at most once per id.
    pub fn get_or_create<F>(&self, id: &str, fallback: F) -> Arc<Config>
    where
        F: FnOnce() -> Config,
    {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(id) {
            return Arc::clone(existing);
        }
        debug!("Creating configuration for unknown id {}", id);
        let created = Arc::new(fallback());
        entries.insert(id.to_string(), Arc::clone(&created));
        created
    }

    /// Stores `config` under `id`, replacing any previous entry.
    pub fn put(&self, id: impl Into<String>, config: Config) {
        self.lock().insert(id.into(), Arc::new(config));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic mid-insert can't leave the map half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Config>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
