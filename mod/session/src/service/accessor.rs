use tracing::debug;

use agroportal_kv::KVStore;

use crate::model::{Role, UserInfo};
use crate::service::{SessionError, SessionService, keys};
use crate::token;

impl SessionService {
    /// Stored bearer token, if any. A storage failure reads as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get_str(keys::AUTH_TOKEN) {
            Ok(token) => token,
            Err(e) => {
                debug!("session: token read failed: {e}");
                None
            }
        }
    }

    /// Whether a token is present. Presence only; an expired token still
    /// counts. Pair with [`Self::is_token_expired`] for liveness.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Whether the stored token is expired.
    ///
    /// True when there is no token, the payload does not decode, the exp
    /// claim is missing, or the expiry instant is not in the future.
    /// Anything that cannot prove freshness reads as expired.
    pub fn is_token_expired(&self) -> bool {
        let Some(token) = self.token() else {
            return true;
        };
        match token::decode_claims(&token).and_then(|claims| claims.expires_at_millis()) {
            Some(expires_at) => expires_at <= agroportal_core::now_millis(),
            None => true,
        }
    }

    /// Decoded claims merged with the role label cached at login.
    /// None when there is no token or its payload does not decode.
    pub fn user_info(&self) -> Option<UserInfo> {
        let token = self.token()?;
        let claims = token::decode_claims(&token)?;

        let role_name = match self.store.get_str(keys::ROLE_NAME) {
            Ok(label) => label,
            Err(e) => {
                debug!("session: role label read failed: {e}");
                None
            }
        };

        Some(UserInfo {
            id: claims.subject,
            username: claims.username,
            email: claims.email,
            role: claims.role,
            role_name,
        })
    }

    /// Role claimed by the current token, if any.
    pub fn role(&self) -> Option<Role> {
        self.user_info()?.role
    }

    /// Whether the current session's role is a member of the allowed set.
    /// An empty or unreadable session never has permission.
    pub fn has_permission(&self, allowed: &[Role]) -> bool {
        match self.role() {
            Some(role) => allowed.contains(&role),
            None => false,
        }
    }

    /// Persist a confirmed login: the bearer token and the role display
    /// label that arrived alongside it.
    pub fn establish(&self, token: &str, role_label: &str) -> Result<(), SessionError> {
        self.store
            .set_str(keys::AUTH_TOKEN, token)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        self.store
            .set_str(keys::ROLE_NAME, role_label)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Store or clear the login-form username prefill.
    pub fn remember_username(&self, username: Option<&str>) -> Result<(), SessionError> {
        match username {
            Some(name) => self
                .store
                .set_str(keys::REMEMBERED_USERNAME, name)
                .map_err(|e| SessionError::Storage(e.to_string())),
            None => self
                .store
                .delete(keys::REMEMBERED_USERNAME)
                .map_err(|e| SessionError::Storage(e.to_string())),
        }
    }

    /// Remembered login username, if one was stored.
    pub fn remembered_username(&self) -> Option<String> {
        match self.store.get_str(keys::REMEMBERED_USERNAME) {
            Ok(name) => name,
            Err(e) => {
                debug!("session: remembered username read failed: {e}");
                None
            }
        }
    }

    /// Clear the session: token and cached role label. Idempotent.
    ///
    /// The remembered username survives a logout. Forced logouts pushed
    /// by the backend arrive here too.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store
            .delete(keys::AUTH_TOKEN)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        self.store
            .delete(keys::ROLE_NAME)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use agroportal_kv::{KVStore, MemoryStore};

    use crate::model::{Claims, Role};
    use crate::service::{SessionService, keys};

    fn test_service() -> Arc<SessionService> {
        SessionService::new(Arc::new(MemoryStore::new()))
    }

    fn mint_token(role: Option<Role>, exp: Option<i64>) -> String {
        let claims = Claims {
            subject: Some("u-100".to_string()),
            username: Some("ali".to_string()),
            email: Some("ali@agro.example".to_string()),
            role,
            exp,
        };
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{header}.{payload}.sig")
    }

    fn future_exp() -> i64 {
        agroportal_core::now_millis() / 1000 + 3600
    }

    fn past_exp() -> i64 {
        agroportal_core::now_millis() / 1000 - 3600
    }

    #[test]
    fn empty_store_reads_as_signed_out() {
        let svc = test_service();
        assert!(svc.token().is_none());
        assert!(!svc.is_authenticated());
        assert!(svc.is_token_expired());
        assert!(svc.user_info().is_none());
        assert!(svc.role().is_none());
        assert!(!svc.has_permission(&[Role::SalesManager, Role::Agency]));
    }

    #[test]
    fn establish_then_read_back() {
        let svc = test_service();
        let token = mint_token(Some(Role::Agency), Some(future_exp()));
        svc.establish(&token, "Agency Manager").unwrap();

        assert!(svc.is_authenticated());
        assert!(!svc.is_token_expired());
        assert_eq!(svc.token().as_deref(), Some(token.as_str()));

        let user = svc.user_info().unwrap();
        assert_eq!(user.id.as_deref(), Some("u-100"));
        assert_eq!(user.username.as_deref(), Some("ali"));
        assert_eq!(user.role, Some(Role::Agency));
        assert_eq!(user.role_name.as_deref(), Some("Agency Manager"));
        assert_eq!(svc.role(), Some(Role::Agency));
    }

    #[test]
    fn expired_token_is_authenticated_but_expired() {
        let svc = test_service();
        svc.establish(&mint_token(Some(Role::Agency), Some(past_exp())), "Agency")
            .unwrap();

        // Presence and freshness are separate questions.
        assert!(svc.is_authenticated());
        assert!(svc.is_token_expired());
    }

    #[test]
    fn token_without_exp_reads_expired() {
        let svc = test_service();
        svc.establish(&mint_token(Some(Role::Agency), None), "Agency")
            .unwrap();
        assert!(svc.is_token_expired());
    }

    #[test]
    fn malformed_token_reads_as_no_session_data() {
        let svc = test_service();
        svc.establish("definitely-not-a-token", "Agency").unwrap();

        assert!(svc.is_authenticated()); // the bytes are there
        assert!(svc.is_token_expired()); // but they prove nothing
        assert!(svc.user_info().is_none());
        assert!(svc.role().is_none());
        assert!(!svc.has_permission(&[Role::Agency]));
    }

    #[test]
    fn has_permission_is_membership() {
        let svc = test_service();
        svc.establish(&mint_token(Some(Role::Agency), Some(future_exp())), "Agency")
            .unwrap();

        assert!(!svc.has_permission(&[Role::SalesManager]));
        assert!(svc.has_permission(&[Role::SalesManager, Role::Agency]));
        assert!(!svc.has_permission(&[]));
        assert!(!svc.has_permission(&[Role::Other("Agency2".to_string())]));
    }

    #[test]
    fn token_without_role_has_no_permission() {
        let svc = test_service();
        svc.establish(&mint_token(None, Some(future_exp())), "Agency")
            .unwrap();
        assert!(svc.role().is_none());
        assert!(!svc.has_permission(&[Role::Agency]));
    }

    #[test]
    fn logout_clears_session_but_keeps_remembered_username() {
        let svc = test_service();
        svc.remember_username(Some("ali")).unwrap();
        svc.establish(&mint_token(Some(Role::Agency), Some(future_exp())), "Agency")
            .unwrap();

        svc.logout().unwrap();

        assert!(!svc.is_authenticated());
        assert!(svc.user_info().is_none());
        assert_eq!(svc.remembered_username().as_deref(), Some("ali"));

        // Logging out twice is fine.
        svc.logout().unwrap();
    }

    #[test]
    fn remember_username_can_be_cleared() {
        let svc = test_service();
        svc.remember_username(Some("ali")).unwrap();
        svc.remember_username(None).unwrap();
        assert!(svc.remembered_username().is_none());
    }

    #[test]
    fn missing_role_label_leaves_user_info_partial() {
        // Token stored without the label, e.g. written by an older client.
        let store: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        store
            .set_str(
                keys::AUTH_TOKEN,
                &mint_token(Some(Role::SalesManager), Some(future_exp())),
            )
            .unwrap();
        let svc = SessionService::new(store);

        let user = svc.user_info().unwrap();
        assert_eq!(user.role, Some(Role::SalesManager));
        assert!(user.role_name.is_none());
    }
}
