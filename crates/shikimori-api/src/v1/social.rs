//! Users, friends, ignores, dialogs, messages, presence and bans

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Value, json};

use super::V1;
use crate::error::Result;
use crate::params::RequestOptions;
use crate::payload::{flag, object, to_json};

impl V1 {
    pub async fn users(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["users"])?, opts).await
    }

    /// Show a user by id or nickname.
    pub async fn user(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["users", &id.to_string()])?, opts).await
    }

    pub async fn user_info(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "info", opts).await
    }

    /// The user the access token belongs to.
    pub async fn whoami(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["users", "whoami"])?, opts).await
    }

    pub async fn sign_out(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["users", "sign_out"])?, opts).await
    }

    pub async fn user_friends(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "friends", opts).await
    }

    pub async fn user_clubs(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "clubs", opts).await
    }

    pub async fn user_anime_rates(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "anime_rates", opts).await
    }

    pub async fn user_manga_rates(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "manga_rates", opts).await
    }

    /// The server spells this path `favourites`.
    pub async fn user_favorites(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "favourites", opts).await
    }

    pub async fn user_messages(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "messages", opts).await
    }

    pub async fn user_unread_messages(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "unread_messages", opts).await
    }

    pub async fn user_history(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "history", opts).await
    }

    pub async fn user_bans(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.user_listing(id, "bans", opts).await
    }

    async fn user_listing(
        &self,
        id: impl Display,
        listing: &str,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["users", &id.to_string(), listing])?, opts)
            .await
    }

    pub async fn create_friend(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .post(self.url(&["friends", &user_id.to_string()])?, json!({}), opts)
            .await?;
        Ok(true)
    }

    pub async fn delete_friend(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["friends", &user_id.to_string()])?, opts)
            .await
    }

    pub async fn create_ignore(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .post(self.url(&["ignores", &user_id.to_string()])?, json!({}), opts)
            .await?;
        Ok(true)
    }

    pub async fn delete_ignore(
        &self,
        user_id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["ignores", &user_id.to_string()])?, opts)
            .await
    }

    pub async fn dialogs(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["dialogs"])?, opts).await
    }

    pub async fn dialog(
        &self,
        username: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        self.rest
            .get(self.url(&["dialogs", &username.to_string()])?, opts)
            .await
    }

    pub async fn delete_dialog(
        &self,
        username: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["dialogs", &username.to_string()])?, opts)
            .await
    }

    pub async fn message(&self, id: impl Display, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["messages", &id.to_string()])?, opts).await
    }

    pub async fn create_message(
        &self,
        message: impl Serialize,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = object([
            ("message", Some(to_json(message)?)),
            ("frontend", frontend.map(Value::Bool)),
        ]);
        self.rest.post(self.url(&["messages"])?, body, opts).await
    }

    /// A `frontend` query parameter, when given, is moved into the body.
    pub async fn update_message(
        &self,
        id: impl Display,
        message: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let mut opts = opts.into();
        let body = object([
            ("message", Some(to_json(message)?)),
            ("frontend", opts.query.remove("frontend").map(flag)),
        ]);
        self.rest
            .put(self.url(&["messages", &id.to_string()])?, body, opts)
            .await
    }

    pub async fn delete_message(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["messages", &id.to_string()])?, opts)
            .await
    }

    /// Mark every message of `kind` (`news`, `notifications`, ...) as read.
    pub async fn read_all_messages(
        &self,
        kind: &str,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.bulk_messages("read_all", kind, frontend, opts).await
    }

    pub async fn delete_all_messages(
        &self,
        kind: &str,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.bulk_messages("delete_all", kind, frontend, opts).await
    }

    async fn bulk_messages(
        &self,
        action: &str,
        kind: &str,
        frontend: Option<bool>,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        let body = object([
            ("type", Some(Value::from(kind))),
            ("frontend", frontend.map(Value::Bool)),
        ]);
        self.rest
            .post(self.url(&["messages", action])?, body, opts)
            .await?;
        Ok(true)
    }

    /// Mark comments and topics as seen. The server takes a single `ids`
    /// field of `comment-<id>` and `topic-<id>` entries joined by commas.
    pub async fn create_appear<C, T>(
        &self,
        comment_ids: impl IntoIterator<Item = C>,
        topic_ids: impl IntoIterator<Item = T>,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool>
    where
        C: Display,
        T: Display,
    {
        let ids = comment_ids
            .into_iter()
            .map(|id| format!("comment-{id}"))
            .chain(topic_ids.into_iter().map(|id| format!("topic-{id}")))
            .collect::<Vec<_>>()
            .join(",");
        self.rest
            .post(self.url(&["appear"])?, json!({ "ids": ids }), opts)
            .await?;
        Ok(true)
    }

    pub async fn create_topic_ignore(
        &self,
        topic_id: impl Serialize,
        user_id: impl Serialize,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let body = json!({
            "topic_ignore": {
                "topic_id": to_json(topic_id)?,
                "user_id": to_json(user_id)?,
            }
        });
        self.rest.post(self.url(&["topic_ignores"])?, body, opts).await
    }

    pub async fn delete_topic_ignore(
        &self,
        id: impl Display,
        opts: impl Into<RequestOptions>,
    ) -> Result<bool> {
        self.rest
            .delete(self.url(&["topic_ignores", &id.to_string()])?, opts)
            .await
    }

    pub async fn bans(&self, opts: impl Into<RequestOptions>) -> Result<Value> {
        self.rest.get(self.url(&["bans"])?, opts).await
    }
}

#[cfg(test)]
mod tests {
    use crate::params::Query;
    use crate::test_support::{MockServer, test_client};
    use serde_json::json;

    #[tokio::test]
    async fn whoami_and_user_listings() {
        let server = MockServer::start(200, r#"{"id":1,"nickname":"test"}"#).await;
        let client = test_client(&server);

        let me = client.v1().whoami(()).await.unwrap();
        assert_eq!(me["nickname"], "test");
        client.v1().user_favorites("test", ()).await.unwrap();
        client.v1().user_unread_messages(1, ()).await.unwrap();

        let paths: Vec<_> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/api/users/whoami",
                "/api/users/test/favourites",
                "/api/users/1/unread_messages",
            ]
        );
    }

    #[tokio::test]
    async fn create_appear_joins_ids() {
        let server = MockServer::start(200, "").await;
        let client = test_client(&server);

        assert!(client.v1().create_appear([1, 2], [3], ()).await.unwrap());

        let request = server.last_request();
        assert_eq!(request.path, "/api/appear");
        assert_eq!(request.json(), json!({"ids": "comment-1,comment-2,topic-3"}));
    }

    #[tokio::test]
    async fn create_appear_with_no_ids_sends_empty_field() {
        let server = MockServer::start(200, "").await;
        let client = test_client(&server);

        let none: [u64; 0] = [];
        client.v1().create_appear(none, [7], ()).await.unwrap();
        assert_eq!(server.last_request().json(), json!({"ids": "topic-7"}));
    }

    #[tokio::test]
    async fn friend_add_returns_true_and_remove_reports_status() {
        let server = MockServer::start(200, r#"{"notice":"added"}"#).await;
        let client = test_client(&server);

        assert!(client.v1().create_friend(5, ()).await.unwrap());
        let request = server.last_request();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/friends/5");
        assert_eq!(request.json(), json!({}));

        assert!(client.v1().delete_friend(5, ()).await.unwrap());
        assert_eq!(server.last_request().method, "DELETE");
    }

    #[tokio::test]
    async fn update_message_moves_frontend_into_body() {
        let server = MockServer::start(200, r#"{"id":2}"#).await;
        let client = test_client(&server);

        client
            .v1()
            .update_message(2, json!({"body": "edited"}), Query::from([("frontend", "true")]))
            .await
            .unwrap();

        let request = server.last_request();
        assert!(request.query.is_none());
        assert_eq!(
            request.json(),
            json!({"message": {"body": "edited"}, "frontend": true})
        );
    }

    #[tokio::test]
    async fn read_all_messages_posts_type() {
        let server = MockServer::start(200, "").await;
        let client = test_client(&server);

        assert!(
            client
                .v1()
                .read_all_messages("news", None, ())
                .await
                .unwrap()
        );
        let request = server.last_request();
        assert_eq!(request.path, "/api/messages/read_all");
        assert_eq!(request.json(), json!({"type": "news"}));

        client
            .v1()
            .delete_all_messages("notifications", Some(true), ())
            .await
            .unwrap();
        let request = server.last_request();
        assert_eq!(request.path, "/api/messages/delete_all");
        assert_eq!(request.json(), json!({"type": "notifications", "frontend": true}));
    }

    #[tokio::test]
    async fn topic_ignore_nests_ids() {
        let server = MockServer::start(201, r#"{"id":8}"#).await;
        let client = test_client(&server);

        let created = client.v1().create_topic_ignore(3, 4, ()).await.unwrap();
        assert_eq!(created["id"], 8);
        assert_eq!(
            server.last_request().json(),
            json!({"topic_ignore": {"topic_id": 3, "user_id": 4}})
        );
    }

    #[tokio::test]
    async fn forbidden_dialog_surfaces_error() {
        let server = MockServer::start(403, "").await;
        let err = test_client(&server)
            .v1()
            .dialog("someone", ())
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }
}
