use crate::adapters::http::{HttpSettings, HttpTransport};
use crate::core::normalizer;
use crate::core::session::Session;
use crate::domain::model::{Page, Record};
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{ListQuery, Resource};
use crate::utils::error::{ClientError, FormatError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What a list call does with a response it cannot unwrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Log a warning and return an empty list.
    #[default]
    Lenient,
    /// Return `ClientError::FormatError`.
    Strict,
}

/// Entry point for every platform call. Generic over the transport so tests
/// and embedders can swap the HTTP layer.
pub struct PortalClient<T: Transport> {
    pub(crate) transport: T,
    pub(crate) session: Session,
    format_policy: FormatPolicy,
}

impl PortalClient<HttpTransport> {
    pub fn connect(settings: &HttpSettings, session: Session) -> Result<Self> {
        let transport = HttpTransport::new(settings, session.clone())?;
        Ok(Self::new(transport, session))
    }
}

impl<T: Transport> PortalClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self {
            transport,
            session,
            format_policy: FormatPolicy::default(),
        }
    }

    pub fn with_format_policy(mut self, policy: FormatPolicy) -> Self {
        self.format_policy = policy;
        self
    }

    pub fn format_policy(&self) -> FormatPolicy {
        self.format_policy
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) async fn call(&self, request: ApiRequest) -> Result<Value> {
        self.transport.send(request).await
    }

    pub(crate) async fn call_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let value = self.call(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Detail fetches that the web client rendered as "not available" on 401/403.
    pub(crate) async fn call_optional<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<R>> {
        match self.call_as(request).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if matches!(e.status(), Some(401) | Some(403)) => {
                tracing::debug!("Detail not available: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn absorb<R>(&self, path: &str, result: std::result::Result<Vec<R>, FormatError>) -> Result<Vec<R>> {
        match result {
            Ok(items) => Ok(items),
            Err(e) => match self.format_policy {
                FormatPolicy::Strict => Err(ClientError::FormatError(e)),
                FormatPolicy::Lenient => {
                    tracing::warn!("⚠️ Unexpected response format from {}: {}", path, e);
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Fetches a list endpoint by path and decodes every item into `R`.
    pub async fn list_path<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<R>> {
        let raw = self.call(ApiRequest::get(path).with_query(query)).await?;
        let items = self.absorb(path, normalizer::normalize_as(raw))?;
        tracing::debug!("📥 {} items from {}", items.len(), path);
        Ok(items)
    }

    pub async fn list<R: DeserializeOwned>(&self, resource: Resource, query: &ListQuery) -> Result<Vec<R>> {
        self.list_path(resource.path(), query.to_pairs()).await
    }

    /// Untyped listing, one [`Record`] per item.
    pub async fn list_records(&self, resource: Resource, query: &ListQuery) -> Result<Vec<Record>> {
        let path = resource.path();
        let raw = self
            .call(ApiRequest::get(path).with_query(query.to_pairs()))
            .await?;
        self.absorb(path, normalizer::normalize_records(raw))
    }

    /// Single page including the envelope's pagination metadata.
    pub async fn list_page<R: DeserializeOwned>(&self, resource: Resource, query: &ListQuery) -> Result<Page<R>> {
        let path = resource.path();
        let raw = self
            .call(ApiRequest::get(path).with_query(query.to_pairs()))
            .await?;
        match normalizer::normalize_page(raw) {
            Ok(page) => Ok(page),
            Err(e) => {
                let items = self.absorb(path, Err::<Vec<R>, _>(e))?;
                Ok(Page {
                    items,
                    count: Some(0),
                    next: None,
                    previous: None,
                })
            }
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, resource: Resource, id: i64) -> Result<R> {
        self.call_as(ApiRequest::get(resource.item_path(id))).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::ports::Method;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned responses keyed by path; records every request it sees.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        responses: Arc<Mutex<HashMap<String, Value>>>,
        pub(crate) requests: Arc<Mutex<Vec<ApiRequest>>>,
    }

    impl MockTransport {
        pub(crate) fn respond(self, path: &str, body: Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(path.to_string(), body);
            self
        }

        pub(crate) fn last_request(&self) -> ApiRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            let body = self.responses.lock().unwrap().get(&request.path).cloned();
            body.ok_or_else(|| ClientError::StatusError {
                status: 404,
                url: request.path.clone(),
                body: "{\"detail\":\"Not found.\"}".to_string(),
            })
        }
    }

    fn client(transport: MockTransport) -> PortalClient<MockTransport> {
        PortalClient::new(transport, Session::anonymous())
    }

    #[tokio::test]
    async fn test_list_unwraps_envelope() {
        let transport = MockTransport::default().respond(
            "/articles/",
            json!({"count": 1, "results": [{"id": 1, "category": {"id": 5, "name": "Phishing"}}]}),
        );
        let records = client(transport)
            .list_records(Resource::Articles, &ListQuery::new())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display("category"), "Phishing");
    }

    #[tokio::test]
    async fn test_lenient_policy_returns_empty_on_bad_shape() {
        let transport =
            MockTransport::default().respond("/courses/", json!({"detail": "Not found"}));
        let items: Vec<Value> = client(transport)
            .list(Resource::Courses, &ListQuery::new())
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_format_error() {
        let transport =
            MockTransport::default().respond("/courses/", json!({"detail": "Not found"}));
        let err = client(transport)
            .with_format_policy(FormatPolicy::Strict)
            .list::<Value>(Resource::Courses, &ListQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::FormatError(_)));
    }

    #[tokio::test]
    async fn test_http_errors_still_propagate() {
        let err = client(MockTransport::default())
            .list::<Value>(Resource::Tags, &ListQuery::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_query_is_forwarded() {
        let transport = MockTransport::default().respond("/tests/", json!([]));
        let client = client(transport.clone());
        let _: Vec<Value> = client
            .list(Resource::Tests, &ListQuery::new().search("xss").page(2))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.query,
            vec![
                ("search".to_string(), "xss".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_list_page_on_bad_shape_is_empty() {
        let transport = MockTransport::default().respond("/tags/", json!(null));
        let page: Page<Value> = client(transport)
            .list_page(Resource::Tags, &ListQuery::new())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }
}
