//! OAuth2 endpoint configuration
//!
//! Values here identify the site and the application, not the user. Client
//! secrets and tokens live on `OAuth2Client` and `TokenResponse`.

use url::Url;

use crate::error::{Error, Result};

/// Production site.
pub const DEFAULT_SITE_URL: &str = "https://shikimori.one/";

/// `User-Agent` sent to the token endpoint when the caller sets none.
pub const DEFAULT_APP_NAME: &str = "Api Test";

/// Authorization endpoint, relative to the site.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Token endpoint, relative to the site.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Site, application name and endpoint paths for one OAuth2 client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub site: String,
    pub app_name: String,
    pub authorize_url: String,
    pub token_url: String,
    /// Added to authorization URLs that don't carry their own.
    pub redirect_uri: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE_URL.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            authorize_url: AUTHORIZE_PATH.to_owned(),
            token_url: TOKEN_PATH.to_owned(),
            redirect_uri: None,
        }
    }
}

impl Config {
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn site_url(&self) -> Result<Url> {
        Url::parse(&self.site).map_err(|e| Error::InvalidUrl(format!("site {:?}: {e}", self.site)))
    }

    /// Absolute authorization endpoint.
    pub fn authorize_endpoint(&self) -> Result<Url> {
        self.endpoint(&self.authorize_url)
    }

    /// Absolute token endpoint.
    pub fn token_endpoint(&self) -> Result<Url> {
        self.endpoint(&self.token_url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.site_url()?
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("endpoint {path:?}: {e}")))
    }
}
