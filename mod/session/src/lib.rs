//! Session module — bearer-token session state, navigation guards, and the
//! login API.
//!
//! # Components
//!
//! - **Token codec** ([`token::decode_claims`]) — reads the claims payload
//!   out of a compact token; never verifies signatures
//! - **SessionService** — explicit session object over a key-value store:
//!   token, expiry, user info, role, permission checks
//! - **Guards** ([`guard`]) — pure navigation decisions for guest-only
//!   routes, role-restricted routes, and the post-login dispatch
//! - **IdentityProvider** — the external login endpoint credentials are
//!   exchanged with
//!
//! # Usage
//!
//! ```ignore
//! use session::SessionModule;
//! use session::service::identity::HttpIdentityProvider;
//!
//! let identity = Arc::new(HttpIdentityProvider::new(login_url));
//! let module = SessionModule::new(kv, identity);
//! let router = module.routes(); // Mount at the API root
//! ```

pub mod model;
pub mod token;
pub mod service;
pub mod guard;
pub mod api;

use std::sync::Arc;

use axum::Router;

use agroportal_core::Module;
use agroportal_kv::KVStore;

use crate::service::SessionService;
use crate::service::identity::IdentityProvider;

/// Session module implementing the Module trait.
///
/// Holds the SessionService and the identity client, and provides the
/// session management HTTP routes.
pub struct SessionModule {
    service: Arc<SessionService>,
    identity: Arc<dyn IdentityProvider>,
}

impl SessionModule {
    /// Create a new SessionModule over the given store and identity endpoint.
    pub fn new(kv: Arc<dyn KVStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            service: SessionService::new(kv),
            identity,
        }
    }

    /// Get a reference to the underlying SessionService.
    pub fn service(&self) -> &Arc<SessionService> {
        &self.service
    }
}

impl Module for SessionModule {
    fn name(&self) -> &str {
        "session"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.identity.clone())
    }
}
