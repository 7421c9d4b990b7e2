// Omada API HTTP client
//
// Wraps `reqwest::Client` with Omada-specific URL construction, envelope
// unwrapping, and auth-parameter injection. Endpoint wrappers (auth, sites,
// settings, wireless) are implemented as inherent methods in separate files
// to keep this module focused on transport mechanics.

use std::sync::RwLock;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, Credentials};
use crate::error::Error;
use crate::models::{DataList, Envelope};
use crate::transport::TransportConfig;

/// Path prefix composed between the base URL and every resource path.
const API_PATH: &str = "/api/v2";

/// The Omada API expects cache-busting timestamps in milliseconds.
fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Async client for the Omada controller's v2 API.
///
/// Handles the `{ errorCode, msg, result }` envelope, `/api/v2` URL
/// construction, and session state (cookie jar plus the login token
/// injected as a query parameter). All methods return unwrapped `result`
/// payloads -- the envelope is stripped before the caller sees it.
pub struct OmadaClient {
    http: reqwest::Client,
    base_url: Url,
    site: String,
    warnings: bool,
    credentials: Option<Credentials>,
    /// Session token returned by `/login`. Injected into the query string
    /// of every subsequent request until logout.
    token: RwLock<Option<String>>,
}

impl OmadaClient {
    /// Create a new client from a resolved `ClientConfig`.
    ///
    /// The HTTP session always gets a cookie jar -- the controller tracks a
    /// session cookie alongside the token parameter. Disabling TLS
    /// verification emits a warning here unless warnings are suppressed.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        if !config.verify && config.warnings {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.base_url
            );
        }

        let transport = TransportConfig {
            verify: config.verify,
            timeout: config.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar();
        let http = transport.build_client()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            site: config.site,
            warnings: config.warnings,
            credentials: config.credentials,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when pointing at a mock server or when the transport is
    /// managed elsewhere. No credentials are stored; call
    /// [`login`](Self::login) with explicit ones.
    pub fn with_client(http: reqwest::Client, base_url: Url, site: String) -> Self {
        Self {
            http,
            base_url,
            site,
            warnings: true,
            credentials: None,
            token: RwLock::new(None),
        }
    }

    /// The configured default site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether warnings are emitted (insecure TLS, `beaconControl` strips).
    pub fn warnings(&self) -> bool {
        self.warnings
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Credentials configured for `login` fallback.
    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    // ── Token management ─────────────────────────────────────────────

    /// Store the session token (extracted from the login result).
    pub(crate) fn set_token(&self, token: String) {
        debug!("storing session token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Discard the session token (after logout).
    pub(crate) fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Resolve an optional site argument against the configured default.
    pub(crate) fn site_or_default<'a>(&'a self, site: Option<&'a str>) -> &'a str {
        site.unwrap_or(&self.site)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for the given resource path:
    /// `{base}/api/v2{path}`.
    ///
    /// The path may carry its own query string (the clients endpoint bakes
    /// its fixed pagination parameters in this way).
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}{API_PATH}{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Auth parameter policy ────────────────────────────────────────

    /// Query parameters injected when the caller supplies none: the session
    /// token plus a millisecond timestamp for cache busting. `None` until
    /// login has stored a token.
    fn auth_params(&self) -> Option<Vec<(String, String)>> {
        let guard = self.token.read().expect("token lock poisoned");
        guard.as_ref().map(|token| {
            vec![
                ("token".into(), token.clone()),
                ("_".into(), timestamp_millis().to_string()),
            ]
        })
    }

    /// Explicit parameters win; otherwise fall back to the auth params.
    fn effective_params(&self, params: Option<&[(&str, &str)]>) -> Option<Vec<(String, String)>> {
        match params {
            Some(explicit) => Some(
                explicit
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
            ),
            None => self.auth_params(),
        }
    }

    // ── Request primitives ───────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    ///
    /// Pass `params: None` to get the auth parameters injected; explicit
    /// parameters suppress the injection entirely.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Option<Value>, Error> {
        let url = self.api_url(path);
        debug!("GET {url}");

        let mut builder = self.http.get(url);
        if let Some(query) = self.effective_params(params) {
            builder = builder.query(&query);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Send a POST request with an optional JSON body and unwrap the envelope.
    pub async fn post(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        let url = self.api_url(path);
        debug!("POST {url}");

        let mut builder = self.http.post(url);
        if let Some(query) = self.effective_params(params) {
            builder = builder.query(&query);
        }
        if let Some(json) = body {
            builder = builder.json(json);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Send a PATCH request with an optional JSON body and unwrap the envelope.
    pub async fn patch(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        let url = self.api_url(path);
        debug!("PATCH {url}");

        let mut builder = self.http.patch(url);
        if let Some(query) = self.effective_params(params) {
            builder = builder.query(&query);
        }
        if let Some(json) = body {
            builder = builder.json(json);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    // ── Envelope handling ────────────────────────────────────────────

    /// Parse the `{errorCode, msg, result}` envelope, returning `result`
    /// (absent when the controller sends none) or `Error::Api` when
    /// `errorCode != 0`.
    ///
    /// Non-2xx statuses fail as transport errors before the body is read.
    async fn parse_envelope(&self, resp: reqwest::Response) -> Result<Option<Value>, Error> {
        let resp = resp.error_for_status().map_err(Error::Transport)?;
        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if envelope.error_code != 0 {
            return Err(Error::Api {
                code: envelope.error_code,
                msg: envelope.msg,
            });
        }

        Ok(envelope.result)
    }

    // ── Result shaping ───────────────────────────────────────────────

    /// `result` as-is, `Null` when the controller sent none.
    pub(crate) fn result_or_null(result: Option<Value>) -> Value {
        result.unwrap_or(Value::Null)
    }

    /// Unwrap the extra `data` level some list endpoints nest under `result`.
    pub(crate) fn unwrap_data(result: Option<Value>) -> Result<Vec<Value>, Error> {
        let value = result.ok_or_else(|| Error::Deserialization {
            message: "expected a list result, got an empty one".into(),
            body: String::new(),
        })?;

        let list: DataList =
            serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
                message: format!("malformed list result: {e}"),
                body: value.to_string(),
            })?;
        Ok(list.data)
    }
}
