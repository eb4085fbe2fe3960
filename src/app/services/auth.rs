use crate::app::client::PortalClient;
use crate::domain::model::{AuthResponse, RefreshResponse, RegisterResponse, User};
use crate::domain::ports::{ApiRequest, Method, TokenPair, Transport};
use crate::utils::error::{ClientError, Result};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Register,
    Reset,
}

impl<T: Transport> PortalClient<T> {
    /// Exchanges credentials for a token pair and starts the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .call_as(ApiRequest::post(
                "/auth/token/",
                json!({"email": email, "password": password}),
            ))
            .await?;
        self.begin_session(&response).await?;
        Ok(response)
    }

    /// Creates the account. The backend issues no tokens here, so the
    /// session is left as is; call [`Self::login`] afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterResponse> {
        let response: RegisterResponse = self
            .call_as(ApiRequest::post(
                "/auth/register/",
                serde_json::to_value(registration)?,
            ))
            .await?;
        tracing::info!(
            "📝 Registered {}",
            response
                .user
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or(registration.username.as_str())
        );
        Ok(response)
    }

    async fn begin_session(&self, response: &AuthResponse) -> Result<()> {
        self.session
            .begin(
                TokenPair::new(response.access.clone(), response.refresh.clone()),
                response.user.clone(),
            )
            .await
    }

    /// Trades the stored refresh token for a new access token.
    pub async fn refresh(&self) -> Result<String> {
        let refresh = self
            .session
            .refresh_token()
            .await
            .ok_or_else(|| ClientError::NotAuthenticated {
                message: "no refresh token".to_string(),
            })?;
        let response: RefreshResponse = self
            .call_as(ApiRequest::post(
                "/auth/token/refresh/",
                json!({"refresh": refresh}),
            ))
            .await?;
        self.session.update_access(response.access.clone()).await?;
        Ok(response.access)
    }

    /// Drops the token pair. Local only; the backend keeps no session.
    pub async fn logout(&self) -> Result<bool> {
        self.session.end().await
    }

    pub async fn current_user(&self) -> Result<User> {
        let user: User = self.call_as(ApiRequest::get("/users/me/")).await?;
        self.session.set_user(user.clone()).await;
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let request = ApiRequest::new(Method::Patch, "/users/me/")
            .with_body(serde_json::to_value(update)?);
        let user: User = self.call_as(request).await?;
        self.session.set_user(user.clone()).await;
        Ok(user)
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<Value> {
        self.call(ApiRequest::post(
            "/auth/change-password/",
            json!({"old_password": old_password, "new_password": new_password}),
        ))
        .await
    }

    pub async fn send_email_code(&self, email: &str, purpose: CodePurpose) -> Result<Value> {
        self.call(ApiRequest::post(
            "/auth/send-code/",
            json!({"email": email, "type": purpose}),
        ))
        .await
    }

    pub async fn verify_email_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<Value> {
        self.call(ApiRequest::post(
            "/auth/verify-code/",
            json!({"email": email, "code": code, "type": purpose}),
        ))
        .await
    }

    pub async fn reset_password_by_code(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Value> {
        self.call(ApiRequest::post(
            "/auth/reset-password/",
            json!({
                "email": email,
                "code": code,
                "new_password": new_password,
                "confirm_password": new_password
            }),
        ))
        .await
    }
}
