//! Clubs, topics, comments, forums, reviews and styles

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Value, json};

use super::V1;
use crate::error::Result;
use crate::params::RequestOptions;
use crate::payload::{flag, object, to_json, wrap};

/// Short topic type names accepted by [`V1::topics`] and the polymorphic
/// type each one is sent as.
pub const TOPIC_TYPES: [(&str, &str); 18] = [
    ("topic", "Topic"),
    ("club_user", "Topics::ClubUserTopic"),
    ("entry_topic", "Topics::EntryTopic"),
    ("anime", "Topics::EntryTopics::AnimeTopic"),
    ("article", "Topics::EntryTopics::ArticleTopic"),
    ("character", "Topics::EntryTopics::CharacterTopic"),
    ("club_page", "Topics::EntryTopics::ClubPageTopic"),
    ("club", "Topics::EntryTopics::ClubTopic"),
    ("collection", "Topics::EntryTopics::CollectionTopic"),
    ("contest", "Topics::EntryTopics::ContestTopic"),
    ("cosplay_gallery", "Topics::EntryTopics::CosplayGalleryTopic"),
    ("manga", "Topics::EntryTopics::MangaTopic"),
    ("person", "Topics::EntryTopics::PersonTopic"),
    ("ranobe", "Topics::EntryTopics::RanobeTopic"),
    ("critique", "Topics::EntryTopics::CritiqueTopic"),
    ("review", "Topics::EntryTopics::ReviewTopic"),
    ("news", "Topics::NewsTopic"),
    ("contest_status", "Topics::NewsTopics::ContestStatusTopic"),
];

fn topic_type(name: &str) -> Option<&'static str> {
    TOPIC_TYPES
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, full)| *full)
}

impl V1 {
    pub async fn clubs(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["clubs"])?, opts).await
    }

    pub async fn club(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["clubs", &id.to_string()])?, opts).await
    }

    pub async fn update_club(
        &self,
        id: impl Display,
        club: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .put(self.url(&["clubs", &id.to_string()])?, wrap("club", club)?, opts)
            .await
    }

    pub async fn club_animes(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "animes", opts).await
    }

    pub async fn club_mangas(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "mangas", opts).await
    }

    pub async fn club_ranobe(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "ranobe", opts).await
    }

    pub async fn club_characters(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "characters", opts).await
    }

    pub async fn club_collections(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "collections", opts).await
    }

    pub async fn club_clubs(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "clubs", opts).await
    }

    pub async fn club_members(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "members", opts).await
    }

    pub async fn club_images(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.club_listing(id, "images", opts).await
    }

    pub async fn join_club(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<bool> {
        self.rest
            .post(self.url(&["clubs", &id.to_string(), "join"])?, json!({}), opts)
            .await?;
        Ok(true)
    }

    pub async fn leave_club(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .post(self.url(&["clubs", &id.to_string(), "leave"])?, json!({}), opts)
            .await?;
        Ok(true)
    }

    async fn club_listing(
        &self,
        id: impl Display,
        listing: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["clubs", &id.to_string(), listing])?, opts)
            .await
    }

    /// List topics. `kind` is a short name from [`TOPIC_TYPES`]; it replaces
    /// any `type` in the query. Unknown names are dropped and no type filter
    /// is sent.
    pub async fn topics(
        &self,
        kind: Option<&str>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let mut opts = opts.into();
        if let Some(kind) = kind {
            opts.query.remove("type");
            if let Some(full) = topic_type(kind) {
                opts.query.push("type", full);
            }
        }
        self.rest.get(self.url(&["topics"])?, opts).await
    }

    pub async fn topic(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["topics", &id.to_string()])?, opts).await
    }

    pub async fn create_topic(
        &self,
        topic: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(self.url(&["topics"])?, wrap("topic", topic)?, opts)
            .await
    }

    pub async fn update_topic(
        &self,
        id: impl Display,
        topic: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .put(self.url(&["topics", &id.to_string()])?, wrap("topic", topic)?, opts)
            .await
    }

    pub async fn delete_topic(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest.delete(self.url(&["topics", &id.to_string()])?, opts).await
    }

    pub async fn topics_updates(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["topics", "updates"])?, opts).await
    }

    pub async fn hot_topics(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["topics", "hot"])?, opts).await
    }

    pub async fn comments(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["comments"])?, opts).await
    }

    pub async fn comment(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["comments", &id.to_string()])?, opts).await
    }

    /// Body: `{broadcast?, comment, frontend?}`.
    pub async fn create_comment(
        &self,
        comment: impl Serialize,
        broadcast: Option<bool>,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = object([
            ("broadcast", broadcast.map(Value::Bool)),
            ("comment", Some(to_json(comment)?)),
            ("frontend", frontend.map(Value::Bool)),
        ]);
        self.rest.post(self.url(&["comments"])?, body, opts).await
    }

    /// `broadcast` and `frontend` query parameters, when given, are moved
    /// into the body next to `comment`.
    pub async fn update_comment(
        &self,
        id: impl Display,
        comment: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let mut opts = opts.into();
        let body = object([
            ("broadcast", opts.query.remove("broadcast").map(flag)),
            ("comment", Some(to_json(comment)?)),
            ("frontend", opts.query.remove("frontend").map(flag)),
        ]);
        self.rest
            .put(self.url(&["comments", &id.to_string()])?, body, opts)
            .await
    }

    pub async fn delete_comment(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["comments", &id.to_string()])?, opts)
            .await
    }

    pub async fn forums(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["forums"])?, opts).await
    }

    pub async fn create_review(
        &self,
        review: impl Serialize,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = object([
            ("review", Some(to_json(review)?)),
            ("frontend", frontend.map(Value::Bool)),
        ]);
        self.rest.post(self.url(&["reviews"])?, body, opts).await
    }

    pub async fn update_review(
        &self,
        id: impl Display,
        review: impl Serialize,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = object([
            ("review", Some(to_json(review)?)),
            ("frontend", frontend.map(Value::Bool)),
        ]);
        self.rest
            .put(self.url(&["reviews", &id.to_string()])?, body, opts)
            .await
    }

    pub async fn delete_review(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["reviews", &id.to_string()])?, opts)
            .await
    }

    pub async fn style(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["styles", &id.to_string()])?, opts).await
    }

    pub async fn create_style(
        &self,
        style: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(self.url(&["styles"])?, wrap("style", style)?, opts)
            .await
    }

    pub async fn update_style(
        &self,
        id: impl Display,
        style: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .put(self.url(&["styles", &id.to_string()])?, wrap("style", style)?, opts)
            .await
    }

    /// Render a style without saving it.
    pub async fn preview_style(
        &self,
        style: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .post(self.url(&["styles", "preview"])?, wrap("style", style)?, opts)
            .await
    }
}
