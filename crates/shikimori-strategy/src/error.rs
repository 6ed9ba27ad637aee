//! Error types for the sign-in strategy

/// Errors from the request and callback phases.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    OAuth2(#[from] shikimori_oauth2::Error),

    #[error(transparent)]
    Api(#[from] shikimori_api::Error),

    /// The `state` returned to the callback is not the one issued.
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// The user or the site refused authorization.
    #[error("authorization denied: {error}")]
    AccessDenied {
        error: String,
        description: Option<String>,
    },

    #[error("callback carries no authorization code")]
    MissingCode,

    /// The user info response has no `id`.
    #[error("user info has no id")]
    MissingUid,
}

/// Result alias for strategy operations.
pub type Result<T> = std::result::Result<T, Error>;
