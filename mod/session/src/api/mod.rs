mod session;

use std::sync::Arc;

use axum::Router;

use crate::service::SessionService;
use crate::service::identity::IdentityProvider;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionService>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Build the complete session API router.
///
/// Routes are rooted at `/session`; the caller merges them into the app.
pub fn build_router(session: Arc<SessionService>, identity: Arc<dyn IdentityProvider>) -> Router {
    let state = AppState { session, identity };
    Router::new()
        .nest("/session", session::routes())
        .with_state(state)
}
