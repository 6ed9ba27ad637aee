//! OAuth2 client: authorization URLs and token requests
//!
//! Two deviations from a stock OAuth2 client, both required by the site:
//! 1. Scopes are joined with a literal `+`, so `%2B` in the built
//!    authorization URL is turned back into `+`.
//! 2. Token requests carry `User-Agent: <app name>` unless the caller set
//!    one; the site rejects anonymous clients.

use common::Secret;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::token::TokenResponse;

const SCOPE_JOIN: &str = "+";
const SCOPE_JOIN_ENCODED: &str = "%2B";

/// Registered application talking to the site's OAuth2 endpoints.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
    client_id: String,
    client_secret: Secret<String>,
    config: Config,
    http: reqwest::Client,
}

impl OAuth2Client {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<Secret<String>>,
        config: Config,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http(client_id, client_secret, config, http))
    }

    /// Client sharing an existing `reqwest::Client`.
    pub fn with_http(
        client_id: impl Into<String>,
        client_secret: impl Into<Secret<String>>,
        config: Config,
        http: reqwest::Client,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            config,
            http,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn site(&self) -> &str {
        &self.config.site
    }

    /// Authorization endpoint with `params` as its query, in order.
    ///
    /// The configured redirect URI is added when `params` has none.
    pub fn authorize_url<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        if let Some(redirect_uri) = &self.config.redirect_uri
            && !pairs.iter().any(|(k, _)| k == "redirect_uri")
        {
            pairs.push(("redirect_uri".into(), redirect_uri.clone()));
        }

        let mut url = self.config.authorize_endpoint()?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        Ok(url.as_str().replace(SCOPE_JOIN_ENCODED, SCOPE_JOIN))
    }

    /// POST `params` as a form to the token endpoint.
    ///
    /// `client_id` and `client_secret` are added unless already present.
    /// `headers` go out as given, plus `User-Agent: <app name>` when they
    /// carry no user agent of their own.
    #[instrument(skip_all, fields(client_id = %self.client_id))]
    pub async fn get_token<K, V, HK, HV>(
        &self,
        params: impl IntoIterator<Item = (K, V)>,
        headers: impl IntoIterator<Item = (HK, HV)>,
    ) -> Result<TokenResponse>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        HK: AsRef<str>,
        HV: AsRef<str>,
    {
        let mut form: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        if !form.iter().any(|(k, _)| k == "client_id") {
            form.push(("client_id".into(), self.client_id.clone()));
        }
        if !form.iter().any(|(k, _)| k == "client_secret") {
            form.push((
                "client_secret".into(),
                self.client_secret.expose_str().to_owned(),
            ));
        }

        let headers = self.token_headers(headers);
        let endpoint = self.config.token_endpoint()?;
        debug!(endpoint = %endpoint, "requesting token");

        let response = self
            .http
            .post(endpoint)
            .headers(headers)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Http(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));

            // 401/403 means the client credentials or grant were rejected
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(Error::InvalidCredentials(format!(
                    "token endpoint rejected request ({status}): {body}"
                )));
            }

            return Err(Error::TokenExchange(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::TokenExchange(format!("invalid token response: {e}")))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<TokenResponse> {
        let redirect_uri = redirect_uri.or(self.config.redirect_uri.as_deref());
        let mut params = vec![("grant_type", "authorization_code"), ("code", code)];
        if let Some(redirect_uri) = redirect_uri {
            params.push(("redirect_uri", redirect_uri));
        }
        self.get_token(params, NO_HEADERS).await
    }

    /// Trade a refresh token for a new access token.
    pub async fn refresh_token(&self, refresh: &str) -> Result<TokenResponse> {
        self.get_token(
            [("grant_type", "refresh_token"), ("refresh_token", refresh)],
            NO_HEADERS,
        )
        .await
    }

    fn token_headers<K, V>(&self, headers: impl IntoIterator<Item = (K, V)>) -> HeaderMap
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let (name, value) = (name.as_ref(), value.as_ref());
            match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => warn!(header = %name, "skipping invalid token request header"),
            }
        }
        if !map.contains_key(USER_AGENT) {
            match HeaderValue::try_from(self.config.app_name.as_str()) {
                Ok(value) => {
                    map.insert(USER_AGENT, value);
                }
                Err(_) => warn!(
                    app_name = %self.config.app_name,
                    "app name is not a valid header value"
                ),
            }
        }
        map
    }
}

const NO_HEADERS: [(&str, &str); 0] = [];
