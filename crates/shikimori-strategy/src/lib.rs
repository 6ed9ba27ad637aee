//! Sign-in strategy for Shikimori accounts
//!
//! Wraps the OAuth2 authorization code flow and maps the site's user info
//! document to a provider-neutral `AuthHash`:
//!
//! | user info  | auth hash         |
//! |------------|-------------------|
//! | `id`       | `uid`             |
//! | `sex`      | `info.gender`     |
//! | `avatar`   | `info.avatar_url` |
//! | `birth_on` | `info.birthday`   |
//! | `url`      | `info.urls.shikimori` |
//!
//! `nickname`, `name`, `locale` and `website` keep their names.

pub mod error;
pub mod options;
pub mod profile;
pub mod shikimori;
pub mod state;

pub use error::{Error, Result};
pub use options::{STRATEGY_NAME, StrategyOptions};
pub use profile::{AuthHash, Credentials, Extra, Info, Urls};
pub use shikimori::{ShikimoriStrategy, USER_INFO_PATH};

use std::future::Future;
use std::pin::Pin;

/// Where to send the user, and the `state` to expect back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRedirect {
    pub url: String,
    pub state: String,
}

/// Query parameters the site appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a callback query string (without the leading `?`). Unknown
    /// keys are ignored; for repeated keys the first value wins.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// A sign-in provider: builds the authorization redirect and turns the
/// callback into an `AuthHash`.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Strategy>`).
pub trait Strategy: Send + Sync {
    /// Name used in the auth hash and in logs.
    fn name(&self) -> &str;

    /// Request phase: a redirect carrying a fresh `state`.
    fn authorize(&self) -> Result<AuthorizeRedirect>;

    /// Callback phase. `issued_state` is the state handed out by
    /// `authorize` for this sign-in.
    fn callback<'a>(
        &'a self,
        params: &'a CallbackParams,
        issued_state: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthHash>> + Send + 'a>>;
}
