//! Particles service.
//! Owns the registry, the randomizer and the URLs snippets point at. One
//! instance is built at startup and shared by handle between the HTTP
//! handlers and whatever renders snippets.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Settings;
use crate::error::Result;
use crate::model::Config;
use crate::random::ConfigRandomizer;
use crate::registry::Registry;

pub struct ParticlesService {
    pub(crate) registry: Registry,
    pub(crate) randomizer: ConfigRandomizer,
    config_endpoint: String,
    js_path: String,
    default_id: String,
}

impl ParticlesService {
    /// Clock-seeded service with a fresh `config-<nanos>` default id.
    pub fn new(config_endpoint: impl Into<String>, js_path: impl Into<String>) -> Self {
        Self::with_randomizer(config_endpoint, js_path, ConfigRandomizer::from_clock())
    }

    pub fn with_randomizer(
        config_endpoint: impl Into<String>,
        js_path: impl Into<String>,
        randomizer: ConfigRandomizer,
    ) -> Self {
        let default_id = format!("config-{}", unix_nanos());
        let registry = Registry::with_entries([(default_id.clone(), Config::default())]);
        Self {
            registry,
            randomizer,
            config_endpoint: config_endpoint.into(),
            js_path: js_path.into(),
            default_id,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let randomizer = match settings.seed {
            Some(seed) => ConfigRandomizer::with_seed(seed),
            None => ConfigRandomizer::from_clock(),
        };
        Self::with_randomizer(&settings.config_endpoint, &settings.js_path, randomizer)
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn config_endpoint(&self) -> &str {
        &self.config_endpoint
    }

    pub fn js_path(&self) -> &str {
        &self.js_path
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Looks up `id` (or the default id when absent/empty), generating and
    /// storing a random configuration the first time an id is seen.
    pub fn resolve(&self, id: Option<&str>) -> Arc<Config> {
        let id = id.filter(|id| !id.is_empty()).unwrap_or(self.default_id.as_str());
        self.registry.get_or_create(id, || self.randomizer.random_config())
    }

    /// `resolve` followed by JSON encoding.
    pub fn config_json(&self, id: Option<&str>) -> Result<String> {
        self.resolve(id).to_json()
    }
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}
