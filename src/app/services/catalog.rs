use crate::app::client::PortalClient;
use crate::domain::model::{Achievement, Category, SearchResults, Tag, User, UserAchievement};
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{ListQuery, Resource};
use crate::utils::error::Result;
use serde_json::Value;

impl<T: Transport> PortalClient<T> {
    pub async fn list_categories(&self, query: &ListQuery) -> Result<Vec<Category>> {
        self.list(Resource::Categories, query).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category> {
        self.get(Resource::Categories, id).await
    }

    pub async fn list_tags(&self, query: &ListQuery) -> Result<Vec<Tag>> {
        self.list(Resource::Tags, query).await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag> {
        self.get(Resource::Tags, id).await
    }

    pub async fn list_achievements(&self, query: &ListQuery) -> Result<Vec<Achievement>> {
        self.list(Resource::Achievements, query).await
    }

    pub async fn get_achievement(&self, id: i64) -> Result<Achievement> {
        self.get(Resource::Achievements, id).await
    }

    pub async fn list_user_achievements(
        &self,
        user_id: Option<i64>,
        query: &ListQuery,
    ) -> Result<Vec<UserAchievement>> {
        let mut query = query.clone();
        if let Some(user_id) = user_id {
            query = query.filter("user", user_id);
        }
        self.list(Resource::UserAchievements, &query).await
    }

    pub async fn current_user_achievements(&self) -> Result<Vec<UserAchievement>> {
        self.list_path("/users/me/achievements/", Vec::new()).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.call_as(ApiRequest::get(format!("/users/{}/", id))).await
    }

    pub async fn user_activities(&self, user_id: i64) -> Result<Vec<Value>> {
        self.list_path(&format!("/users/{}/activities/", user_id), Vec::new())
            .await
    }

    pub async fn dashboard(&self) -> Result<Value> {
        self.call(ApiRequest::get("/dashboard/")).await
    }

    /// Site-wide search across articles, courses, discussions and tests.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let request =
            ApiRequest::get("/search/").with_query(vec![("q".to_string(), term.to_string())]);
        self.call_as(request).await
    }
}
