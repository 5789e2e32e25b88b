//! Error types for the particles config server.
//! Only two things can actually fail: encoding a configuration to JSON and
//! loading the server settings file. Everything else (unknown presets,
//! parameters that don't coerce) is handled leniently and never errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration could not be encoded as JSON.
    #[error("error marshaling config to JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid settings JSON.
    #[error("failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
