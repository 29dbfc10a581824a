//! Minimal HTTP client for the Yahoo Finance JSON endpoints.
//!
//! Handles the cookie + crumb handshake the summary and options endpoints
//! require, and maps HTTP failures onto [`DashError`].

use std::sync::Arc;
use std::time::Duration;

use quantdash_core::DashError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use url::Url;

pub(crate) const CONNECTOR: &str = "quantdash-yahoo";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Where the client sends its requests. Overridable for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base for `/v8/finance/chart`, `/v10/finance/quoteSummary`, and `/v7/finance/options`.
    pub api_base: String,
    /// Page visited first to obtain session cookies.
    pub cookie_url: String,
    /// Endpoint returning the crumb for the current cookie session.
    pub crumb_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one host (e.g. a local mock server).
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_base: base.to_string(),
            cookie_url: format!("{base}/consent"),
            crumb_url: format!("{base}/v1/test/getcrumb"),
        }
    }
}

/// Cookie-enabled `reqwest` client with a cached crumb.
///
/// `reqwest::Client` is already reference counted; the crumb lives behind an
/// `Arc<Mutex<..>>` so clones share one handshake.
#[derive(Clone)]
pub struct YahooClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    crumb: Arc<Mutex<Option<String>>>,
}

impl YahooClient {
    /// Build a client with a cookie store and browser user agent.
    ///
    /// # Errors
    /// Returns `Other` if the TLS backend cannot be initialised.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, DashError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DashError::Other(format!("failed to build http client: {e}")))?;
        Ok(Self::with_http(http, endpoints))
    }

    /// Wrap an existing `reqwest::Client`; it should have a cookie store enabled.
    #[must_use]
    pub fn with_http(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self {
            http,
            endpoints,
            crumb: Arc::new(Mutex::new(None)),
        }
    }

    /// Endpoints in use.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Build `{api_base}/{segments...}?{query}`.
    pub(crate) fn api_url(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, DashError> {
        let mut url = Url::parse(&self.endpoints.api_base)
            .map_err(|e| DashError::InvalidArg(format!("bad api base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| DashError::InvalidArg("api base url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET a public endpoint (no crumb) and decode JSON.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, DashError> {
        let resp = self.send(url, context).await?;
        decode(resp, context).await
    }

    /// GET an endpoint that needs a crumb. One fresh handshake is attempted if
    /// the cached crumb is rejected.
    pub(crate) async fn get_json_with_crumb<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, DashError> {
        let crumb = self.crumb(false).await?;
        let resp = self.send_raw(with_crumb(&url, &crumb)).await?;
        let resp = if matches!(
            resp.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "quantdash::yahoo", context, "crumb rejected; refreshing");
            let crumb = self.crumb(true).await?;
            self.send_raw(with_crumb(&url, &crumb)).await?
        } else {
            resp
        };
        let resp = check_status(resp, context)?;
        decode(resp, context).await
    }

    async fn send(&self, url: Url, context: &str) -> Result<reqwest::Response, DashError> {
        let resp = self.send_raw(url).await?;
        check_status(resp, context)
    }

    async fn send_raw(&self, url: Url) -> Result<reqwest::Response, DashError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e))
    }

    async fn crumb(&self, refresh: bool) -> Result<String, DashError> {
        let mut guard = self.crumb.lock().await;
        if !refresh {
            if let Some(c) = guard.as_ref() {
                return Ok(c.clone());
            }
        }
        // The cookie page commonly answers 404 while still setting the session cookie.
        let _ = self.http.get(&self.endpoints.cookie_url).send().await;
        let resp = self
            .http
            .get(&self.endpoints.crumb_url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e))?;
        let resp = check_status(resp, "crumb")?;
        let text = resp
            .text()
            .await
            .map_err(|e| DashError::connector(CONNECTOR, format!("crumb body: {e}")))?;
        let crumb = text.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(DashError::connector(CONNECTOR, "invalid crumb response"));
        }
        *guard = Some(crumb.clone());
        Ok(crumb)
    }
}

fn with_crumb(url: &Url, crumb: &str) -> Url {
    let mut u = url.clone();
    u.query_pairs_mut().append_pair("crumb", crumb);
    u
}

fn check_status(resp: reqwest::Response, context: &str) -> Result<reqwest::Response, DashError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(map_status(status, context))
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response, context: &str) -> Result<T, DashError> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| DashError::connector(CONNECTOR, format!("{context}: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DashError::Data(format!("malformed {context} payload: {e}")))
}

/// Map a non-success HTTP status to the workspace error type.
pub(crate) fn map_status(status: StatusCode, context: &str) -> DashError {
    match status {
        StatusCode::NOT_FOUND => DashError::not_found(context.to_string()),
        StatusCode::TOO_MANY_REQUESTS => {
            DashError::connector(CONNECTOR, format!("rate limit: {context}"))
        }
        s if s.is_server_error() => {
            DashError::connector(CONNECTOR, format!("server error {}: {context}", s.as_u16()))
        }
        s => DashError::connector(CONNECTOR, format!("status {}: {context}", s.as_u16())),
    }
}

fn map_transport_err(e: &reqwest::Error) -> DashError {
    if e.is_timeout() {
        DashError::connector(CONNECTOR, format!("request timed out: {e}"))
    } else {
        DashError::connector(CONNECTOR, e.to_string())
    }
}
