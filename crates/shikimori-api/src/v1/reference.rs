//! Read-only reference data: constants, genres, studios, publishers,
//! calendar and stats

use serde_json::Value;

use super::V1;
use crate::error::Result;
use crate::params::RequestOptions;

impl V1 {
    pub async fn anime_constants(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.constants("anime", opts).await
    }

    pub async fn manga_constants(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.constants("manga", opts).await
    }

    pub async fn user_rate_constants(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.constants("user_rate", opts).await
    }

    pub async fn club_constants(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.constants("club", opts).await
    }

    pub async fn smileys_constants(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.constants("smileys", opts).await
    }

    async fn constants(&self, group: &str, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["constants", group])?, opts).await
    }

    pub async fn genres(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["genres"])?, opts).await
    }

    pub async fn studios(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["studios"])?, opts).await
    }

    pub async fn publishers(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["publishers"])?, opts).await
    }

    /// Upcoming episode schedule.
    pub async fn calendar(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["calendar"])?, opts).await
    }

    pub async fn active_users(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["stats", "active_users"])?, opts).await
    }
}
