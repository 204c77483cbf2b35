use serde::{Deserialize, Serialize};

use crate::model::Role;

/// Session user view: decoded token claims merged with the role display
/// label cached at login. Fields mirror the claims; anything the token
/// did not carry stays empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id from the subject claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Login username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Machine role from the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Human display label for the role, cached at login. Not part of
    /// the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}
