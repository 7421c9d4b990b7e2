// ── Runtime connection configuration ──
//
// These types describe *how* to connect to an Omada controller. They carry
// credential data and connection tuning, but never touch disk -- callers
// (or the omada-config crate) construct a `ClientConfig` and hand it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// Username/password pair for the controller's `/login` endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Resolved, immutable configuration for connecting to a single controller.
///
/// Either built directly or produced by `omada-config`'s `ConfigSource` --
/// by the time a `ClientConfig` exists, the config-or-explicit question has
/// already been settled.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Controller URL (e.g., `https://192.168.0.10:8043`).
    pub base_url: Url,
    /// Default site scoping resource calls. The controller ships with `"Default"`.
    pub site: String,
    /// Verify the controller's TLS certificate.
    pub verify: bool,
    /// Emit warnings (disabled TLS verification, `beaconControl` stripping).
    /// Suppression is an explicit operator opt-in.
    pub warnings: bool,
    /// Request timeout for every call.
    pub timeout: Duration,
    /// Credentials used when `login` is called without explicit ones.
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    /// Config for the given controller URL with stock defaults:
    /// site `"Default"`, TLS verification and warnings on, 30 s timeout,
    /// no stored credentials.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            site: "Default".into(),
            verify: true,
            warnings: true,
            timeout: Duration::from_secs(30),
            credentials: None,
        }
    }

    /// Parse a controller URL string into a config with stock defaults.
    ///
    /// Convenience over [`new`](Self::new) for callers holding the URL as a
    /// string; fails with [`Error::InvalidUrl`] when it does not parse.
    pub fn from_url(base_url: &str) -> Result<Self, Error> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    /// Replace the default site.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Store credentials for `login` fallback.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────
