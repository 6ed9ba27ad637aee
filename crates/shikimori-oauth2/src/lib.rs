//! OAuth2 client for the Shikimori site
//!
//! Authorization code flow:
//! 1. Redirect the user to `OAuth2Client::authorize_url()` with `client_id`,
//!    `redirect_uri`, `response_type=code` and the `+`-joined scope
//! 2. Exchange the returned code with `OAuth2Client::exchange_code()`
//! 3. Renew the access token with `OAuth2Client::refresh_token()`
//!
//! `Config` is passed explicitly to each client; there is no process-wide
//! configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod token;

pub use client::OAuth2Client;
pub use config::{AUTHORIZE_PATH, Config, DEFAULT_APP_NAME, DEFAULT_SITE_URL, TOKEN_PATH};
pub use error::{Error, Result};
pub use token::TokenResponse;
