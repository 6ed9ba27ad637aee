//! Error types for the OAuth2 client

/// Errors from authorization URL building and token requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The token endpoint answered 401 or 403.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result alias for OAuth2 operations.
pub type Result<T> = std::result::Result<T, Error>;
