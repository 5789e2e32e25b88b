//! particles.js configuration server.
//! Serves configuration documents for the particles.js library and renders
//! the HTML snippets that load them.

pub mod config;
pub mod error;
pub mod model;
pub mod overrides;
pub mod presets;
pub mod random;
pub mod registry;
pub mod server;
pub mod service;
pub mod snippet;

pub use error::{Error, Result};
pub use model::Config;
pub use overrides::apply_overrides;
pub use presets::{Preset, preset};
pub use random::ConfigRandomizer;
pub use registry::Registry;
pub use service::ParticlesService;
pub use snippet::ShortcodeData;
