//! Token endpoint response

use serde::{Deserialize, Serialize};

/// Response from the token endpoint for both code exchange and refresh.
///
/// Only `access_token` is guaranteed; the rest depend on the grant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires (delta, not absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Unix seconds at which the token was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

impl TokenResponse {
    /// Unix seconds at which the access token expires, when both the issue
    /// time and lifetime are known.
    pub fn expires_at(&self) -> Option<u64> {
        Some(self.created_at? + self.expires_in?)
    }

    pub fn expires(&self) -> bool {
        self.expires_in.is_some()
    }

    /// Scopes granted, split on spaces or `+`.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split([' ', '+']).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_deserializes_full_grant() {
        let json = r#"{
            "access_token": "at_abc",
            "token_type": "Bearer",
            "expires_in": 86400,
            "refresh_token": "rt_def",
            "scope": "user_rates comments topics",
            "created_at": 1700000000
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "at_abc");
        assert_eq!(token.refresh_token.as_deref(), Some("rt_def"));
        assert_eq!(token.expires_at(), Some(1_700_086_400));
        assert!(token.expires());
        assert_eq!(token.scopes(), vec!["user_rates", "comments", "topics"]);
    }

    #[test]
    fn token_response_accepts_bare_access_token() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"fake"}"#).unwrap();
        assert_eq!(token.access_token, "fake");
        assert!(token.refresh_token.is_none());
        assert!(token.expires_at().is_none());
        assert!(!token.expires());
        assert!(token.scopes().is_empty());
    }

    #[test]
    fn token_response_serializes_without_missing_fields() {
        let token = TokenResponse {
            access_token: "at_test".into(),
            refresh_token: Some("rt_test".into()),
            expires_in: Some(3600),
            token_type: None,
            scope: None,
            created_at: None,
        };
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("\"access_token\":\"at_test\""));
        assert!(json.contains("\"expires_in\":3600"));
        assert!(!json.contains("token_type"));
    }
}
