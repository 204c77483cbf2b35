pub mod accessor;
pub mod identity;

use std::sync::Arc;

use thiserror::Error;

use agroportal_kv::KVStore;

/// Storage keys for session state.
///
/// Fixed names, one session per store. `remembered_username` survives
/// logout; the other keys are cleared by it.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const ROLE_NAME: &str = "role_name";
    pub const REMEMBERED_USERNAME: &str = "remembered_username";
}

/// Session service error type.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("identity service: {0}")]
    Identity(String),

    #[error("storage: {0}")]
    Storage(String),
}

impl From<SessionError> for agroportal_core::ServiceError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(m) => agroportal_core::ServiceError::Validation(m),
            SessionError::Unauthorized(m) => agroportal_core::ServiceError::Unauthorized(m),
            SessionError::Identity(m) => agroportal_core::ServiceError::Internal(m),
            SessionError::Storage(m) => agroportal_core::ServiceError::Storage(m),
        }
    }
}

/// The session service. Owns the key-value store session state lives in.
///
/// An explicit instance is constructed at startup and handed to its
/// consumers. There is no ambient global session.
pub struct SessionService {
    pub(crate) store: Arc<dyn KVStore>,
}

impl SessionService {
    /// Create a new SessionService over the given store.
    pub fn new(store: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}
