//! Strategy options

use common::Secret;
use shikimori_oauth2::Config;

/// Name the strategy registers under.
pub const STRATEGY_NAME: &str = "shikimori";

/// Application registration and client settings for one strategy.
///
/// `client_options` defaults to the production site; `app_name` is sent as
/// `User-Agent` on both the token and user info requests.
#[derive(Debug, Clone)]
pub struct StrategyOptions {
    pub name: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub client_options: Config,
    pub app_name: String,
    pub scope: Vec<String>,
    pub redirect_uri: Option<String>,
}

impl StrategyOptions {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<Secret<String>>) -> Self {
        let client_options = Config::default();
        Self {
            name: STRATEGY_NAME.to_owned(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            app_name: client_options.app_name.clone(),
            client_options,
            scope: Vec::new(),
            redirect_uri: None,
        }
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.client_options.site = site.into();
        self
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn scope<S: Into<String>>(mut self, scope: impl IntoIterator<Item = S>) -> Self {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Scopes joined the way the site expects (`a+b`).
    pub fn joined_scope(&self) -> Option<String> {
        (!self.scope.is_empty()).then(|| self.scope.join("+"))
    }

    /// Client config with this strategy's app name and redirect applied.
    pub(crate) fn client_config(&self) -> Config {
        let mut config = self.client_options.clone().with_app_name(&self.app_name);
        if let Some(redirect_uri) = &self.redirect_uri {
            config.redirect_uri = Some(redirect_uri.clone());
        }
        config
    }
}
