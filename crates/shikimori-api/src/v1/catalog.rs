//! Animes, mangas, ranobe, characters, people and anime videos

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use super::V1;
use crate::error::Result;
use crate::params::RequestOptions;
use crate::payload::wrap;

impl V1 {
    pub async fn animes(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["animes"])?, opts).await
    }

    pub async fn anime(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["animes", &id.to_string()])?, opts).await
    }

    pub async fn anime_roles(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "roles"])?, opts)
            .await
    }

    pub async fn anime_similar(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "similar"])?, opts)
            .await
    }

    pub async fn anime_related(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "related"])?, opts)
            .await
    }

    pub async fn anime_screenshots(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "screenshots"])?, opts)
            .await
    }

    pub async fn anime_franchise(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "franchise"])?, opts)
            .await
    }

    pub async fn anime_external_links(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "external_links"])?, opts)
            .await
    }

    pub async fn anime_topics(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &id.to_string(), "topics"])?, opts)
            .await
    }

    pub async fn anime_videos(
        &self,
        anime_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["animes", &anime_id.to_string(), "videos"])?, opts)
            .await
    }

    /// Body: `{video: {...}}`.
    pub async fn create_anime_video(
        &self,
        anime_id: impl Display,
        video: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(
                self.url(&["animes", &anime_id.to_string(), "videos"])?,
                wrap("video", video)?,
                opts,
            )
            .await
    }

    pub async fn delete_anime_video(
        &self,
        anime_id: impl Display,
        video_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        let url = self.url(&["animes", &anime_id.to_string(), "videos", &video_id.to_string()])?;
        self.rest.delete(url, opts).await
    }

    pub async fn mangas(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["mangas"])?, opts).await
    }

    pub async fn manga(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["mangas", &id.to_string()])?, opts).await
    }

    pub async fn manga_roles(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "roles"])?, opts)
            .await
    }

    pub async fn manga_similar(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "similar"])?, opts)
            .await
    }

    pub async fn manga_related(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "related"])?, opts)
            .await
    }

    pub async fn manga_franchise(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "franchise"])?, opts)
            .await
    }

    pub async fn manga_external_links(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "external_links"])?, opts)
            .await
    }

    pub async fn manga_topics(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["mangas", &id.to_string(), "topics"])?, opts)
            .await
    }

    pub async fn ranobes(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["ranobe"])?, opts).await
    }

    pub async fn ranobe(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["ranobe", &id.to_string()])?, opts).await
    }

    pub async fn ranobe_roles(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "roles"])?, opts)
            .await
    }

    pub async fn ranobe_similar(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "similar"])?, opts)
            .await
    }

    pub async fn ranobe_related(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "related"])?, opts)
            .await
    }

    pub async fn ranobe_franchise(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "franchise"])?, opts)
            .await
    }

    pub async fn ranobe_external_links(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "external_links"])?, opts)
            .await
    }

    pub async fn ranobe_topics(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["ranobe", &id.to_string(), "topics"])?, opts)
            .await
    }

    /// Character search (`characters/search`).
    pub async fn characters(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["characters", "search"])?, opts).await
    }

    pub async fn character(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["characters", &id.to_string()])?, opts)
            .await
    }

    /// People search (`people/search`).
    pub async fn people(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["people", "search"])?, opts).await
    }

    pub async fn person(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["people", &id.to_string()])?, opts).await
    }
}
