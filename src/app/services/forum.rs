use crate::app::client::PortalClient;
use crate::domain::model::{Discussion, Reply};
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{ListQuery, Resource};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct NewDiscussion {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl<T: Transport> PortalClient<T> {
    pub async fn list_discussions(&self, query: &ListQuery) -> Result<Vec<Discussion>> {
        self.list(Resource::Discussions, query).await
    }

    pub async fn get_discussion(&self, id: i64) -> Result<Discussion> {
        self.get(Resource::Discussions, id).await
    }

    pub async fn create_discussion(&self, discussion: &NewDiscussion) -> Result<Discussion> {
        validate_non_empty_string("title", &discussion.title)?;
        self.call_as(ApiRequest::post(
            Resource::Discussions.path(),
            serde_json::to_value(discussion)?,
        ))
        .await
    }

    pub async fn like_discussion(&self, id: i64) -> Result<Value> {
        self.call(ApiRequest::post(format!("/discussions/{}/like/", id), json!({})))
            .await
    }

    pub async fn solve_discussion(&self, id: i64) -> Result<Value> {
        self.call(ApiRequest::post(format!("/discussions/{}/solve/", id), json!({})))
            .await
    }

    pub async fn list_replies(&self, discussion_id: i64) -> Result<Vec<Reply>> {
        self.list(
            Resource::Replies,
            &ListQuery::new().filter("discussion", discussion_id),
        )
        .await
    }

    /// Posting needs a session; an anonymous reply would only bounce with 401.
    pub async fn create_reply(&self, discussion_id: i64, content: &str) -> Result<Reply> {
        if !self.session.is_authenticated().await {
            return Err(ClientError::NotAuthenticated {
                message: "log in to reply".to_string(),
            });
        }
        validate_non_empty_string("content", content)?;
        self.call_as(ApiRequest::post(
            Resource::Replies.path(),
            json!({"discussion": discussion_id, "content": content}),
        ))
        .await
    }

    pub async fn like_reply(&self, id: i64) -> Result<Value> {
        self.call(ApiRequest::post(format!("/replies/{}/like/", id), json!({})))
            .await
    }
}
