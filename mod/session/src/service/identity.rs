use async_trait::async_trait;
use serde::Deserialize;

use crate::service::SessionError;

/// Login grant returned by the identity service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityGrant {
    /// Compact bearer token.
    pub token: String,

    /// Human display label for the user's role.
    pub role_name: String,

    /// Whether the account's email address has been verified. The
    /// post-login dispatch parks unverified accounts on the verification
    /// page before any role routing.
    #[serde(default)]
    pub email_verified: bool,
}

/// The external identity/login endpoint.
///
/// A trait seam so handlers can be exercised without a network; a deployed
/// server uses [`HttpIdentityProvider`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a login grant.
    async fn login(&self, username: &str, password: &str) -> Result<IdentityGrant, SessionError>;
}

/// IdentityProvider over HTTP: JSON POST to the configured login URL.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    login_url: String,
}

impl HttpIdentityProvider {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            login_url: login_url.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn login(&self, username: &str, password: &str) -> Result<IdentityGrant, SessionError> {
        let resp = self
            .client
            .post(&self.login_url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| SessionError::Identity(format!("login request failed: {}", e)))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(SessionError::Unauthorized("invalid credentials".into()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SessionError::Identity(format!(
                "login endpoint returned {}: {}",
                status, body
            )));
        }

        resp.json::<IdentityGrant>()
            .await
            .map_err(|e| SessionError::Identity(format!("login response parse failed: {}", e)))
    }
}
