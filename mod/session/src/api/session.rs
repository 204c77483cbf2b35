use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use agroportal_core::ServiceError;

use crate::api::AppState;
use crate::guard::post_login_route;
use crate::model::{Role, UserInfo};
use crate::service::identity::IdentityProvider;
use crate::token;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/status", get(status))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
    /// Prefill the login form with this username next time.
    #[serde(default)]
    remember: bool,
}

/// Response body for a confirmed login.
#[derive(Debug, Serialize)]
struct LoginResponse {
    user: UserInfo,
    /// Route the portal should navigate to next.
    landing: String,
}

/// POST /session/login — exchange credentials for a session.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ServiceError::Validation(
            "username and password are required".into(),
        ));
    }

    let grant = match state.identity.login(&req.username, &req.password).await {
        Ok(grant) => grant,
        Err(e) => {
            warn!("session: login rejected for '{}': {}", req.username, e);
            return Err(e.into());
        }
    };

    // Refuse grants whose token the portal could never read back.
    if token::decode_claims(&grant.token).is_none() {
        warn!("session: identity service returned an undecodable token");
        return Err(ServiceError::Unauthorized("invalid credentials".into()));
    }

    state
        .session
        .establish(&grant.token, &grant.role_name)
        .map_err(ServiceError::from)?;
    state
        .session
        .remember_username(req.remember.then_some(req.username.as_str()))
        .map_err(ServiceError::from)?;

    let user = state
        .session
        .user_info()
        .ok_or_else(|| ServiceError::Internal("session unreadable after login".into()))?;

    let landing = post_login_route(&state.session, grant.email_verified);
    info!("session: '{}' logged in, landing {}", req.username, landing);

    Ok(Json(LoginResponse { user, landing }))
}

#[derive(Debug, Deserialize)]
struct LogoutParams {
    /// Optional reason, e.g. a forced logout pushed by the backend.
    reason: Option<String>,
}

/// POST /session/logout — clear the session. The remembered username
/// survives.
async fn logout(
    State(state): State<AppState>,
    Query(params): Query<LogoutParams>,
) -> Result<StatusCode, ServiceError> {
    state.session.logout().map_err(ServiceError::from)?;
    match params.reason.as_deref() {
        Some(reason) => info!("session: logged out ({})", reason),
        None => info!("session: logged out"),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /session/me — current user info from the stored token.
async fn me(State(state): State<AppState>) -> Result<Json<UserInfo>, ServiceError> {
    state
        .session
        .user_info()
        .map(Json)
        .ok_or_else(|| ServiceError::Unauthorized("no active session".into()))
}

/// Session snapshot for UI bootstrapping.
#[derive(Debug, Serialize)]
struct StatusResponse {
    authenticated: bool,
    token_expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remembered_username: Option<String>,
}

/// GET /session/status — presence/expiry snapshot plus login-form prefill.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        authenticated: state.session.is_authenticated(),
        token_expired: state.session.is_token_expired(),
        role: state.session.role(),
        remembered_username: state.session.remembered_username(),
    })
}
