use crate::app::client::PortalClient;
use crate::domain::model::Article;
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{CategoryFilter, ListQuery, Resource};
use crate::utils::error::Result;
use serde_json::{json, Value};

impl<T: Transport> PortalClient<T> {
    /// The articles endpoint filters by category id only, so slugs and
    /// names are looked up first. An unknown category drops the filter.
    pub async fn list_articles(&self, query: &ListQuery) -> Result<Vec<Article>> {
        let mut query = query.clone();
        if let Some(CategoryFilter::Key(key)) = query.category.clone() {
            let categories = self.list_categories(&ListQuery::new()).await?;
            query.category = match CategoryFilter::Key(key.clone()).resolve(&categories) {
                Some(id) => Some(CategoryFilter::Id(id)),
                None => {
                    tracing::warn!("⚠️ Unknown article category '{}', not filtering", key);
                    None
                }
            };
        }
        self.list(Resource::Articles, &query).await
    }

    pub async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        self.call_optional(ApiRequest::get(Resource::Articles.item_path(id)))
            .await
    }

    pub async fn featured_articles(&self) -> Result<Vec<Article>> {
        self.list_path("/articles/featured/", Vec::new()).await
    }

    pub async fn like_article(&self, id: i64) -> Result<Value> {
        self.call(ApiRequest::post(format!("/articles/{}/like/", id), json!({})))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::app::client::tests::MockTransport;
    use crate::app::client::PortalClient;
    use crate::core::session::Session;
    use crate::domain::query::{CategoryFilter, ListQuery};
    use serde_json::json;

    fn categories() -> serde_json::Value {
        json!({"results": [
            {"id": 5, "name": "Phishing", "slug": "phishing"},
            {"id": 6, "name": "Malware", "slug": "malware"}
        ]})
    }

    #[tokio::test]
    async fn test_article_category_slug_is_resolved_to_id() {
        let transport = MockTransport::default()
            .respond("/categories/", categories())
            .respond("/articles/", json!([{"id": 1, "category": {"id": 6, "name": "Malware"}}]));
        let client = PortalClient::new(transport.clone(), Session::anonymous());

        let articles = client
            .list_articles(&ListQuery::new().category(CategoryFilter::from("malware")))
            .await
            .unwrap();

        assert_eq!(articles[0].category.display_name(), "Malware");
        assert_eq!(
            transport.last_request().query,
            vec![("category".to_string(), "6".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_article_category_is_dropped() {
        let transport = MockTransport::default()
            .respond("/categories/", categories())
            .respond("/articles/", json!([]));
        let client = PortalClient::new(transport.clone(), Session::anonymous());

        client
            .list_articles(&ListQuery::new().category(CategoryFilter::from("ransomware")))
            .await
            .unwrap();
        assert!(transport.last_request().query.is_empty());
    }

    #[tokio::test]
    async fn test_missing_article_is_an_error() {
        let client = PortalClient::new(MockTransport::default(), Session::anonymous());
        assert!(client.get_article(99).await.is_err());
    }
}
