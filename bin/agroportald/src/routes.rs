//! Route registration — module routes + the portal navigation skeleton.
//!
//! Page handlers return small JSON descriptors; the interesting part is
//! which gate wraps which zone.

use std::sync::Arc;

use axum::extract::State;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use session::service::SessionService;

use crate::gates;

/// Application shared state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionService>,
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState, module_routes: Vec<(&str, Router)>) -> Router {
    // System endpoints (public, no state needed).
    let system_routes = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Guest-only zone: a live session is bounced to its landing route.
    let guest_zone: Router<AppState> = Router::new()
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gates::guest_gate,
        ));

    // Role-restricted dashboards.
    let sales_zone: Router<AppState> = Router::new()
        .route("/sales/dashboard", get(sales_dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gates::sales_gate,
        ));
    let agency_zone: Router<AppState> = Router::new()
        .route("/agency/dashboard", get(agency_dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gates::agency_gate,
        ));

    // Generic dashboard: any live session.
    let member_zone: Router<AppState> = Router::new()
        .route("/dashboard", get(dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gates::session_gate,
        ));

    let mut app: Router<()> = Router::new()
        .merge(guest_zone)
        .merge(sales_zone)
        .merge(agency_zone)
        .merge(member_zone)
        .route("/unauthorized", get(unauthorized_page))
        .route("/verify-email", get(verify_email_page))
        .with_state(state);

    app = app.merge(system_routes);

    // Merge each module's routes (already rooted at their own prefix and
    // carrying their own state).
    for (name, router) in module_routes {
        debug!("mounting module routes: {}", name);
        app = app.merge(router);
    }

    app
}

async fn login_page() -> impl IntoResponse {
    Json(serde_json::json!({"page": "login"}))
}

async fn register_page() -> impl IntoResponse {
    Json(serde_json::json!({"page": "register"}))
}

async fn sales_dashboard() -> impl IntoResponse {
    Json(serde_json::json!({"page": "sales-dashboard"}))
}

async fn agency_dashboard() -> impl IntoResponse {
    Json(serde_json::json!({"page": "agency-dashboard"}))
}

async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "page": "dashboard",
        "role": state.session.role(),
    }))
}

async fn unauthorized_page() -> impl IntoResponse {
    Json(serde_json::json!({"page": "unauthorized"}))
}

async fn verify_email_page() -> impl IntoResponse {
    Json(serde_json::json!({"page": "verify-email"}))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "agroportald",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
