//! Configuration for Omada client construction.
//!
//! A flat TOML file plus `OMADA_`-prefixed environment overrides, resolved
//! into an `omada_api::ClientConfig`. Callers that already hold connection
//! details skip the file entirely via [`ConfigSource::Explicit`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use omada_api::{ClientConfig, Credentials};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration, one controller per file.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.0.10:8043").
    pub baseurl: Option<String>,

    /// Site to scope resource calls to.
    #[serde(default = "default_site")]
    pub site: String,

    /// Verify the controller's TLS certificate.
    #[serde(default = "default_verify")]
    pub verify: bool,

    /// Emit warnings (insecure TLS, settings workarounds).
    #[serde(default = "default_warnings")]
    pub warnings: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Username for `/login`.
    pub username: Option<String>,

    /// Password for `/login` (plaintext -- prefer the OMADA_PASSWORD env var).
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseurl: None,
            site: default_site(),
            verify: default_verify(),
            warnings: default_warnings(),
            timeout: default_timeout(),
            username: None,
            password: None,
        }
    }
}

fn default_site() -> String {
    "Default".into()
}
fn default_verify() -> bool {
    true
}
fn default_warnings() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Convert to a resolved `ClientConfig`.
    ///
    /// Requires `baseurl`. Credentials carry over only when both username
    /// and password are present; a partial pair is treated as absent, and
    /// `login` will demand explicit credentials.
    pub fn into_client_config(self) -> Result<ClientConfig, ConfigError> {
        let raw = self.baseurl.ok_or_else(|| ConfigError::Validation {
            field: "baseurl".into(),
            reason: "missing controller URL".into(),
        })?;
        let base_url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
            field: "baseurl".into(),
            reason: format!("invalid URL: {raw}"),
        })?;

        let mut config = ClientConfig::new(base_url).with_site(self.site);
        config.verify = self.verify;
        config.warnings = self.warnings;
        config.timeout = Duration::from_secs(self.timeout);

        if let (Some(username), Some(password)) = (self.username, self.password) {
            config = config.with_credentials(Credentials::new(username, password));
        }

        Ok(config)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "omada-rs", "omada-rs").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("omada-rs");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the configuration from a specific TOML file, with `OMADA_` env
/// variables layered on top.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OMADA_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load from the canonical config path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize the config to TOML at the given path, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Config source ───────────────────────────────────────────────────

/// Where a `ClientConfig` comes from.
///
/// Settles the config-or-explicit question in one place: callers holding
/// connection details pass [`Explicit`](Self::Explicit), tools read
/// [`File`](Self::File) or [`DefaultFile`](Self::DefaultFile).
#[derive(Debug)]
pub enum ConfigSource {
    /// Use this config as-is; no file is touched.
    Explicit(ClientConfig),
    /// Load from a specific TOML file.
    File(PathBuf),
    /// Load from the canonical config path.
    DefaultFile,
}

impl ConfigSource {
    /// Resolve to a `ClientConfig`.
    pub fn resolve(self) -> Result<ClientConfig, ConfigError> {
        match self {
            Self::Explicit(config) => Ok(config),
            Self::File(path) => load_config_from(&path)?.into_client_config(),
            Self::DefaultFile => load_config()?.into_client_config(),
        }
    }
}
