use thiserror::Error;

/// Top-level error type for the `omada-api` crate.
///
/// Covers every failure mode: authentication, transport, the controller's
/// `errorCode` envelope, and client construction. Nothing is retried --
/// each variant propagates straight to the caller.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (rejected credentials, or a success envelope with no token).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Login was invoked without explicit credentials and none are configured.
    #[error("No credentials: pass them to login() or configure username/password")]
    MissingCredentials,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error, including non-2xx statuses (connection refused,
    /// DNS failure, timeout, 4xx/5xx responses).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller API ──────────────────────────────────────────────
    /// Domain error from the `{errorCode, msg}` envelope (`errorCode != 0`).
    #[error("Omada API error: errorCode={code}, msg={}", .msg.as_deref().unwrap_or("None"))]
    Api { code: i64, msg: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body is not a valid envelope, or a list payload is malformed.
    /// Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Extract the controller's `errorCode`, if this is a domain error.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if this is a transient transport failure worth
    /// retrying by the caller (the client itself never retries).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
