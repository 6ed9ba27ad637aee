//! Client facade
//!
//! Owns one transport and two endpoint aggregates bound to `<site>/api/`
//! and `<site>/api/v2/`.

use std::time::Duration;

use common::Secret;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::rest::{Credentials, ProxyConfig, Rest};
use crate::uri;
use crate::v1::V1;
use crate::v2::V2;

/// Production site used when none is configured.
pub const DEFAULT_SITE_URL: &str = "https://shikimori.one/";

/// Entry point for both API versions.
#[derive(Debug, Clone)]
pub struct Client {
    v1: V1,
    v2: V2,
}

impl Client {
    /// Client for `site` with the given credentials and no proxy.
    pub fn new(site: &str, credentials: Credentials) -> Result<Self> {
        let rest = Rest::new(credentials, None, None)?;
        Self::with_rest(site, rest)
    }

    /// Client sharing an already built transport.
    pub fn with_rest(site: &str, rest: Rest) -> Result<Self> {
        let site = Url::parse(site).map_err(|e| Error::InvalidUrl(format!("site {site:?}: {e}")))?;
        let v1_base = uri::join(&site, &["api/"])?;
        let v2_base = uri::join(&site, &["api/v2/"])?;
        debug!(v1 = %v1_base, v2 = %v2_base, "API roots resolved");
        Ok(Self {
            v1: V1::new(v1_base, rest.clone()),
            v2: V2::new(v2_base, rest),
        })
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// First-generation API (`/api/`).
    pub fn v1(&self) -> &V1 {
        &self.v1
    }

    /// Second-generation API (`/api/v2/`).
    pub fn v2(&self) -> &V2 {
        &self.v2
    }
}

/// Builder collecting site, credentials and transport settings.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    site: Option<String>,
    credentials: Credentials,
    proxy: Option<ProxyConfig>,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Application name, sent as `User-Agent`.
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.credentials.app_name = Some(app_name.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.access_token = Some(Secret::new(token.into()));
        self
    }

    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.refresh_token = Some(Secret::new(token.into()));
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client. Proxy and timeout settings are then
    /// the caller's responsibility.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client> {
        let site = self.site.unwrap_or_else(|| DEFAULT_SITE_URL.to_owned());
        let rest = match self.http {
            Some(http) => Rest::with_client(http, self.credentials),
            None => Rest::new(self.credentials, self.proxy.as_ref(), self.timeout)?,
        };
        Client::with_rest(&site, rest)
    }
}
