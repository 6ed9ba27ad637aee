//! Second-generation API (`/api/v2/`)

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::error::Result;
use crate::params::RequestOptions;
use crate::payload::{to_json, wrap};
use crate::rest::Rest;
use crate::uri;

/// Endpoint methods of API v2.
#[derive(Debug, Clone)]
pub struct V2 {
    rest: Rest,
    base_url: Url,
}

impl V2 {
    pub fn new(base_url: Url, rest: Rest) -> Self {
        Self { rest, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn rest(&self) -> &Rest {
        &self.rest
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        uri::join(&self.base_url, segments)
    }

    // Abuse requests post their payload as the body itself, unwrapped.

    pub async fn abuse_offtopic_request(
        &self,
        abuse_request: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.abuse("offtopic", abuse_request, opts).await
    }

    pub async fn abuse_review_request(
        &self,
        abuse_request: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.abuse("convert_review", abuse_request, opts).await
    }

    pub async fn abuse_request(
        &self,
        abuse_request: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.abuse("abuse", abuse_request, opts).await
    }

    pub async fn abuse_spoiler_request(
        &self,
        abuse_request: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.abuse("spoiler", abuse_request, opts).await
    }

    async fn abuse(
        &self,
        kind: &str,
        abuse_request: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(
                self.url(&["abuse_requests", kind])?,
                to_json(abuse_request)?,
                opts,
            )
            .await
    }

    /// Body: `{episode_notification: {...}, token}`.
    pub async fn create_episode_notification(
        &self,
        episode_notification: impl Serialize,
        token: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = json!({
            "episode_notification": to_json(episode_notification)?,
            "token": token,
        });
        self.rest
            .post(self.url(&["episode_notifications"])?, body, opts)
            .await
    }

    pub async fn create_topic_ignore(
        &self,
        topic_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(
                self.url(&["topics", &topic_id.to_string(), "ignore"])?,
                json!({}),
                opts,
            )
            .await
    }

    pub async fn delete_topic_ignore(
        &self,
        topic_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["topics", &topic_id.to_string(), "ignore"])?, opts)
            .await
    }

    pub async fn create_user_ignore(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(
                self.url(&["users", &user_id.to_string(), "ignore"])?,
                json!({}),
                opts,
            )
            .await
    }

    pub async fn delete_user_ignore(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["users", &user_id.to_string(), "ignore"])?, opts)
            .await
    }

    pub async fn user_rates(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["user_rates"])?, opts).await
    }

    pub async fn user_rate(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["user_rates", &id.to_string()])?, opts)
            .await
    }

    pub async fn create_user_rate(
        &self,
        user_rate: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(self.url(&["user_rates"])?, wrap("user_rate", user_rate)?, opts)
            .await
    }

    pub async fn update_user_rate(
        &self,
        id: impl Display,
        user_rate: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .put(
                self.url(&["user_rates", &id.to_string()])?,
                wrap("user_rate", user_rate)?,
                opts,
            )
            .await
    }

    pub async fn delete_user_rate(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["user_rates", &id.to_string()])?, opts)
            .await
    }

    pub async fn increment_user_rate(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(
                self.url(&["user_rates", &id.to_string(), "increment"])?,
                json!({}),
                opts,
            )
            .await
    }
}
