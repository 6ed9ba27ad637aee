//! Error taxonomy for API calls
//!
//! `RequestError` is the common "the server refused the request" kind:
//! callers that don't care which status came back match on
//! `Error::Request(_)`. Everything else is a local or transport failure that
//! never reached a classified response.

/// Server-side rejection of a request, classified by status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// 404
    #[error("resource not found")]
    NotFound,

    /// 403
    #[error("access forbidden")]
    Forbidden,

    /// 400 or 422, with the messages found in the response body.
    #[error("Bad request. Errors:\n\t{}", .errors.join("\n\t"))]
    BadRequest { errors: Vec<String> },

    /// Any status without a dedicated variant (401, 429, 5xx, ...).
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Errors returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// The classified server rejection, if this error is one.
    pub fn as_request_error(&self) -> Option<&RequestError> {
        match self {
            Error::Request(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Request(RequestError::NotFound))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Request(RequestError::Forbidden))
    }
}

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_lists_every_message() {
        let err = RequestError::BadRequest {
            errors: vec!["bad id".into(), "name is too short".into()],
        };
        assert_eq!(
            err.to_string(),
            "Bad request. Errors:\n\tbad id\n\tname is too short"
        );
    }

    #[test]
    fn request_errors_share_a_common_kind() {
        let errors: Vec<Error> = vec![
            RequestError::NotFound.into(),
            RequestError::Forbidden.into(),
            RequestError::BadRequest { errors: vec![] }.into(),
            RequestError::UnexpectedStatus {
                status: 500,
                body: String::new(),
            }
            .into(),
        ];
        for err in &errors {
            assert!(err.as_request_error().is_some(), "{err:?}");
        }
        assert!(Error::Http("refused".into()).as_request_error().is_none());
    }

    #[test]
    fn status_helpers_match_variants() {
        assert!(Error::from(RequestError::NotFound).is_not_found());
        assert!(!Error::from(RequestError::NotFound).is_forbidden());
        assert!(Error::from(RequestError::Forbidden).is_forbidden());
    }

    #[test]
    fn unexpected_status_display_includes_body() {
        let err = Error::from(RequestError::UnexpectedStatus {
            status: 429,
            body: "Retry later".into(),
        });
        assert_eq!(err.to_string(), "unexpected response status 429: Retry later");
    }
}
