//! User rates, favorites, achievements and user images

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::{Value, json};

use super::V1;
use crate::error::Result;
use crate::params::{Form, Query, RequestOptions, Upload};
use crate::payload::wrap;

/// Entry type a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Anime,
    Manga,
    Ranobe,
    Character,
    Person,
}

impl FavoriteKind {
    /// Case-insensitive lookup. Anything unrecognised is treated as anime.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "person" => Self::Person,
            "manga" => Self::Manga,
            "ranobe" => Self::Ranobe,
            "character" => Self::Character,
            _ => Self::Anime,
        }
    }

    /// Path segment the favorites endpoints use for this kind.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Anime => "Anime",
            Self::Manga => "Manga",
            Self::Ranobe => "Ranobe",
            Self::Character => "Character",
            Self::Person => "Person",
        }
    }
}

impl Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl V1 {
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

    /// Bump episodes (or chapters) watched by one.
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

    /// Delete the whole `anime` or `manga` list.
    pub async fn cleanup_user_rates(
        &self,
        kind: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["user_rates", kind, "cleanup"])?, opts)
            .await
    }

    /// Reset scores across the `anime` or `manga` list.
    pub async fn reset_user_rates(
        &self,
        kind: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["user_rates", kind, "reset"])?, opts)
            .await
    }

    /// Add a favorite. `kind` is matched case-insensitively (see
    /// [`FavoriteKind::from_name`]); people also take a role segment,
    /// `person` unless given.
    pub async fn create_favorite(
        &self,
        id: impl Display,
        kind: &str,
        person_kind: Option<&str>,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        let kind = FavoriteKind::from_name(kind);
        let id = id.to_string();
        let url = match kind {
            FavoriteKind::Person => self.url(&[
                "favorites",
                kind.segment(),
                &id,
                person_kind.unwrap_or("person"),
            ])?,
            _ => self.url(&["favorites", kind.segment(), &id])?,
        };
        self.rest.post(url, json!({}), opts).await?;
        Ok(true)
    }

    pub async fn delete_favorite(
        &self,
        id: impl Display,
        kind: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        let kind = FavoriteKind::from_name(kind);
        let url = self.url(&["favorites", kind.segment(), &id.to_string()])?;
        self.rest.delete(url, opts).await?;
        Ok(true)
    }

    pub async fn reorder_favorite(
        &self,
        id: impl Display,
        position: i64,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .post(
                self.url(&["favorites", &id.to_string(), "reorder"])?,
                json!({ "new_index": position }),
                opts,
            )
            .await?;
        Ok(true)
    }

    /// `user_id` leads the query; a `user_id` already in `opts` wins.
    pub async fn achievements(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let mut opts = opts.into();
        let caller = opts.query.remove("user_id");
        let mut query = Query::new()
            .with("user_id", caller.unwrap_or_else(|| user_id.to_string()));
        query.extend(opts.query);
        opts.query = query;
        self.rest.get(self.url(&["achievements"])?, opts).await
    }

    /// Upload an image, sent as `multipart/form-data`.
    pub async fn create_user_image(
        &self,
        image: Upload,
        linked_type: Option<&str>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let mut form = Form::new().file("image", image);
        if let Some(linked_type) = linked_type {
            form = form.text("linked_type", linked_type);
        }
        self.rest
            .post(self.url(&["user_images"])?, form, opts.into().as_form())
            .await
    }
}
