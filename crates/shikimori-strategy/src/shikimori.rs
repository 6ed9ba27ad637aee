//! The Shikimori sign-in strategy
//!
//! Request phase: redirect the user to the authorization endpoint with a
//! fresh `state`. Callback phase: check the returned `state`, exchange the
//! code, fetch `api/users/whoami` with the new token and build the
//! `AuthHash`.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use shikimori_api::{Credentials as ApiCredentials, Rest};
use shikimori_oauth2::OAuth2Client;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};
use crate::options::StrategyOptions;
use crate::profile::AuthHash;
use crate::state::{generate_state, state_matches};
use crate::{AuthorizeRedirect, CallbackParams, Strategy};

/// User info endpoint, relative to the site.
pub const USER_INFO_PATH: &str = "api/users/whoami";

#[derive(Debug)]
pub struct ShikimoriStrategy {
    options: StrategyOptions,
    client: OAuth2Client,
    http: reqwest::Client,
}

impl ShikimoriStrategy {
    pub fn new(options: StrategyOptions) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            shikimori_oauth2::Error::Http(format!("failed to build HTTP client: {e}"))
        })?;
        let client = OAuth2Client::with_http(
            options.client_id.clone(),
            options.client_secret.clone(),
            options.client_config(),
            http.clone(),
        );
        Ok(Self {
            options,
            client,
            http,
        })
    }

    pub fn options(&self) -> &StrategyOptions {
        &self.options
    }

    /// OAuth2 client configured from the strategy options.
    pub fn client(&self) -> &OAuth2Client {
        &self.client
    }

    /// Authorization URL with `client_id`, `redirect_uri`, `response_type`,
    /// `scope` and a new random `state`.
    pub fn request_phase(&self) -> Result<AuthorizeRedirect> {
        let state = generate_state();
        let mut params = vec![
            ("client_id", self.options.client_id.clone()),
            ("response_type", "code".to_owned()),
        ];
        if let Some(scope) = self.options.joined_scope() {
            params.push(("scope", scope));
        }
        params.push(("state", state.clone()));

        let url = self.client.authorize_url(params)?;
        debug!(url = %url, "authorization redirect built");
        Ok(AuthorizeRedirect { url, state })
    }

    #[instrument(skip_all, fields(strategy = %self.options.name))]
    pub async fn callback_phase(
        &self,
        params: &CallbackParams,
        issued_state: &str,
    ) -> Result<AuthHash> {
        if let Some(error) = &params.error {
            warn!(error = %error, "authorization denied");
            return Err(Error::AccessDenied {
                error: error.clone(),
                description: params.error_description.clone(),
            });
        }
        let returned = params.state.as_deref().unwrap_or("");
        if !state_matches(issued_state, returned) {
            warn!("callback state does not match issued state");
            return Err(Error::StateMismatch);
        }
        let code = params.code.as_deref().ok_or(Error::MissingCode)?;

        let token = self.client.exchange_code(code, None).await?;
        let raw_info = self.raw_info(&token.access_token).await?;
        let hash = AuthHash::build(&self.options.name, &token, raw_info)?;
        info!(uid = %hash.uid, "sign-in completed");
        Ok(hash)
    }

    /// The user info document for `access_token`.
    pub async fn raw_info(&self, access_token: &str) -> Result<Value> {
        let site = self.options.client_options.site_url()?;
        let url = shikimori_api::uri::join(&site, &[USER_INFO_PATH])?;
        let rest = Rest::with_client(
            self.http.clone(),
            ApiCredentials {
                app_name: Some(self.options.app_name.clone()),
                access_token: Some(access_token.into()),
                refresh_token: None,
            },
        );
        Ok(rest.get(url, ()).await?)
    }
}

impl Strategy for ShikimoriStrategy {
    fn name(&self) -> &str {
        &self.options.name
    }

    fn authorize(&self) -> Result<AuthorizeRedirect> {
        self.request_phase()
    }

    fn callback<'a>(
        &'a self,
        params: &'a CallbackParams,
        issued_state: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthHash>> + Send + 'a>> {
        Box::pin(self.callback_phase(params, issued_state))
    }
}
