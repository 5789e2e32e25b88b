//! Server settings.
//! Defaults, optionally overlaid by a JSON settings file (`--settings`), then
//! by individual command-line flags. Uses serde for the file format and clap
//! for the CLI.

use clap::{Arg, ArgMatches, Command, value_parser};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CONFIG_ENDPOINT: &str = "/api/particles-config";
pub const DEFAULT_JS_PATH: &str = "/js/particles.min.js";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_STATIC_PREFIX: &str = "/js";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address the HTTP server listens on.
    pub bind: String,
    /// Route serving configuration JSON; also the base of snippet URLs.
    pub config_endpoint: String,
    /// Script URL emitted in snippets.
    pub js_path: String,
    /// Directory holding static assets; `static_prefix` is resolved inside it.
    pub static_dir: PathBuf,
    pub static_prefix: String,
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            config_endpoint: DEFAULT_CONFIG_ENDPOINT.to_string(),
            js_path: DEFAULT_JS_PATH.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds settings from parsed CLI arguments (see [`command`]).
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut settings = match matches.get_one::<PathBuf>("settings") {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(bind) = matches.get_one::<String>("bind") {
            settings.bind = bind.clone();
        }
        if let Some(endpoint) = matches.get_one::<String>("config-endpoint") {
            settings.config_endpoint = endpoint.clone();
        }
        if let Some(js_path) = matches.get_one::<String>("js-path") {
            settings.js_path = js_path.clone();
        }
        if let Some(dir) = matches.get_one::<PathBuf>("static-dir") {
            settings.static_dir = dir.clone();
        }
        if let Some(prefix) = matches.get_one::<String>("static-prefix") {
            settings.static_prefix = prefix.clone();
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            settings.seed = Some(*seed);
        }

        Ok(settings)
    }

    /// Directory served under `static_prefix`: `<static_dir>/<prefix>`.
    pub fn static_root(&self) -> PathBuf {
        self.static_dir.join(self.static_prefix.trim_matches('/'))
    }
}

/// CLI definition. Flags override values from `--settings`.
pub fn command() -> Command {
    Command::new("particles-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serves particles.js configurations and renders embed snippets")
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("FILE")
                .help("JSON settings file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Address to listen on (default 127.0.0.1:8080)"),
        )
        .arg(
            Arg::new("config-endpoint")
                .long("config-endpoint")
                .value_name("PATH")
                .help("Route serving configuration JSON (default /api/particles-config)"),
        )
        .arg(
            Arg::new("js-path")
                .long("js-path")
                .value_name("URL")
                .help("particles.js script URL used in snippets (default /js/particles.min.js)"),
        )
        .arg(
            Arg::new("static-dir")
                .long("static-dir")
                .value_name("DIR")
                .help("Static asset directory (default static)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("static-prefix")
                .long("static-prefix")
                .value_name("PREFIX")
                .help("URL prefix for static assets (default /js)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Fixed RNG seed for reproducible random configurations")
                .value_parser(value_parser!(u64)),
        )
}
