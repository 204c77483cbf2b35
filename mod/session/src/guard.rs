use crate::model::Role;
use crate::service::SessionService;

/// Navigation targets the guards redirect to.
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const UNAUTHORIZED: &str = "/unauthorized";
    pub const VERIFY_EMAIL: &str = "/verify-email";
    pub const SALES_DASHBOARD: &str = "/sales/dashboard";
    pub const AGENCY_DASHBOARD: &str = "/agency/dashboard";
    pub const DASHBOARD: &str = "/dashboard";
}

/// Outcome of a navigation guard. Guards never fail: every evaluation
/// resolves to rendering the requested route or redirecting elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(String),
}

/// Landing route for a role: sales staff and agencies get their own
/// dashboards, every other (or unknown) role the generic one.
pub fn landing_route(role: Option<&Role>) -> &'static str {
    match role {
        Some(Role::SalesManager) => routes::SALES_DASHBOARD,
        Some(Role::Agency) => routes::AGENCY_DASHBOARD,
        _ => routes::DASHBOARD,
    }
}

/// Guard for guest-only routes (login, registration).
///
/// A live session has no business on these pages and is bounced to its
/// role's landing route; anonymous, expired, or unreadable sessions render
/// the requested content.
pub struct GuestGate;

impl GuestGate {
    pub fn decide(&self, session: &SessionService) -> Decision {
        if session.is_authenticated() && !session.is_token_expired() {
            let role = session.role();
            return Decision::Redirect(landing_route(role.as_ref()).to_string());
        }
        Decision::Render
    }
}

/// Guard for role-restricted routes.
///
/// Renders only when the session's role is in the allowed set; any session
/// that cannot prove membership redirects to the fallback. Membership is
/// the only check here; compose with a liveness gate where expiry should
/// bounce to the login page instead.
pub struct RoleGate {
    allowed: Vec<Role>,
    fallback: String,
}

impl RoleGate {
    pub fn new(allowed: Vec<Role>) -> Self {
        Self {
            allowed,
            fallback: routes::UNAUTHORIZED.to_string(),
        }
    }

    /// Override the redirect target for rejected sessions.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn decide(&self, session: &SessionService) -> Decision {
        if session.has_permission(&self.allowed) {
            Decision::Render
        } else {
            Decision::Redirect(self.fallback.clone())
        }
    }
}

/// Route a just-confirmed login should land on.
///
/// Email verification is checked before any role routing: an unverified
/// account is parked on the verification page whatever its role. A broken
/// or already-expired session goes back to the login page.
pub fn post_login_route(session: &SessionService, email_verified: bool) -> String {
    if !session.is_authenticated() || session.is_token_expired() {
        return routes::LOGIN.to_string();
    }
    if !email_verified {
        return routes::VERIFY_EMAIL.to_string();
    }
    let role = session.role();
    landing_route(role.as_ref()).to_string()
}
