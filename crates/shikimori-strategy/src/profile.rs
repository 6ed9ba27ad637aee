//! Auth hash built from the token and the user info response

use serde::Serialize;
use serde_json::Value;
use shikimori_oauth2::TokenResponse;

use crate::error::{Error, Result};

/// Links to the user's profile pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Urls {
    pub shikimori: Option<String>,
}

/// Normalized profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Info {
    pub nickname: Option<String>,
    pub name: Option<String>,
    /// `sex` in the user info response.
    pub gender: Option<String>,
    pub locale: Option<String>,
    /// `avatar` in the user info response.
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    /// `birth_on` in the user info response.
    pub birthday: Option<String>,
    pub urls: Urls,
}

impl Info {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            nickname: text(raw, "nickname"),
            name: text(raw, "name"),
            gender: text(raw, "sex"),
            locale: text(raw, "locale"),
            avatar_url: text(raw, "avatar"),
            website: text(raw, "website"),
            birthday: text(raw, "birth_on"),
            urls: Urls {
                shikimori: text(raw, "url"),
            },
        }
    }
}

/// Token details carried in the auth hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<u64>,
    pub expires: bool,
}

impl From<&TokenResponse> for Credentials {
    fn from(token: &TokenResponse) -> Self {
        Self {
            token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: token.expires_at(),
            expires: token.expires(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extra {
    pub raw_info: Value,
}

/// Everything the application learns from a completed sign-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthHash {
    pub provider: String,
    pub uid: String,
    pub info: Info,
    pub credentials: Credentials,
    pub extra: Extra,
}

impl AuthHash {
    pub fn build(provider: &str, token: &TokenResponse, raw_info: Value) -> Result<Self> {
        Ok(Self {
            provider: provider.to_owned(),
            uid: uid(&raw_info)?,
            info: Info::from_raw(&raw_info),
            credentials: Credentials::from(token),
            extra: Extra { raw_info },
        })
    }
}

/// The user's `id`, as text. Numeric and string ids are both accepted.
pub fn uid(raw: &Value) -> Result<String> {
    match raw.get("id") {
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(Error::MissingUid),
    }
}

fn text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
