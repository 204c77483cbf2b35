//! Gate middleware — axum adapters over the session guards.
//!
//! Each gate evaluates a guard against the shared SessionService and either
//! lets the request through or answers with a redirect. Gates never reject
//! with an error status; navigation always lands somewhere renderable.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use session::guard::{self, Decision, GuestGate, RoleGate};
use session::model::Role;

use crate::routes::AppState;

/// Guest-only zone: live sessions are bounced to their landing route.
pub async fn guest_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match GuestGate.decide(&state.session) {
        Decision::Render => next.run(req).await,
        Decision::Redirect(to) => Redirect::temporary(&to).into_response(),
    }
}

/// Require a live (present and unexpired) session; anyone else goes back
/// to the login page.
pub async fn session_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if state.session.is_authenticated() && !state.session.is_token_expired() {
        next.run(req).await
    } else {
        Redirect::temporary(guard::routes::LOGIN).into_response()
    }
}

/// Sales-staff zone.
pub async fn sales_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    apply_role_gate(RoleGate::new(vec![Role::SalesManager]), &state, req, next).await
}

/// Agency zone.
pub async fn agency_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    apply_role_gate(RoleGate::new(vec![Role::Agency]), &state, req, next).await
}

async fn apply_role_gate(
    gate: RoleGate,
    state: &AppState,
    req: Request,
    next: Next,
) -> Response {
    match gate.decide(&state.session) {
        Decision::Render => next.run(req).await,
        Decision::Redirect(to) => Redirect::temporary(&to).into_response(),
    }
}
