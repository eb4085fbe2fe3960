use crate::core::session::Session;
use crate::domain::ports::{ApiRequest, Method, Transport};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

/// reqwest transport rooted at a fixed base URL. Attaches the session's
/// bearer token to every request and ends the session on any 401.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(settings: &HttpSettings, session: Session) -> Result<Self> {
        Url::parse(&settings.base_url).map_err(|e| ClientError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: settings.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_unauthorized(&self, url: &str) -> ClientError {
        match self.session.end().await {
            Ok(true) => tracing::warn!("🔒 401 from {}, logged out", url),
            Ok(false) => tracing::debug!("401 from {} while already anonymous", url),
            Err(e) => tracing::error!("❌ Failed to clear stored tokens after 401: {}", e),
        }
        ClientError::Unauthorized {
            url: url.to_string(),
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.path);
        let mut builder = self
            .client
            .request(to_reqwest(request.method), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.session.access_token().await {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            "📡 {} {} query={:?}",
            request.method.as_str(),
            url,
            request.query
        );

        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                "❌ No response for {} {}: {}",
                request.method.as_str(),
                url,
                e
            );
            ClientError::TransportError(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("📡 {} {} -> {}", request.method.as_str(), url, status);

        if status == StatusCode::UNAUTHORIZED {
            tracing::error!("❌ API error: {} {} {}", url, status.as_u16(), body);
            return Err(self.handle_unauthorized(&url).await);
        }

        if !status.is_success() {
            tracing::error!("❌ API error: {} {} {}", url, status.as_u16(), body);
            return Err(ClientError::StatusError {
                status: status.as_u16(),
                url,
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_without_double_slashes() {
        let settings = HttpSettings {
            base_url: "http://localhost:8000/api/v1/".to_string(),
            ..Default::default()
        };
        let transport = HttpTransport::new(&settings, Session::anonymous()).unwrap();
        assert_eq!(
            transport.url_for("/articles/"),
            "http://localhost:8000/api/v1/articles/"
        );
        assert_eq!(
            transport.url_for("courses/3/sections/"),
            "http://localhost:8000/api/v1/courses/3/sections/"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let settings = HttpSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = HttpTransport::new(&settings, Session::anonymous()).err().unwrap();
        assert!(matches!(err, ClientError::InvalidConfigValueError { .. }));
    }
}
