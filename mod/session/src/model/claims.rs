use serde::{Deserialize, Serialize};

use crate::model::Role;

/// Bearer-token claims payload.
///
/// The identity service issues WS-Federation style namespaced claim URIs.
/// Every field is optional so that any well-formed JSON object decodes;
/// whatever is missing is treated as absent session data by the accessor
/// and the guards, which all fail closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<String>,

    /// Login username.
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,

    /// Email address.
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    /// Assigned role.
    #[serde(
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,

    /// Expiration (unix timestamp, seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Expiry in milliseconds since the Unix epoch, for comparison against
    /// the wall clock. Saturates instead of overflowing on absurd values.
    pub fn expires_at_millis(&self) -> Option<i64> {
        self.exp.map(|secs| secs.saturating_mul(1000))
    }
}
