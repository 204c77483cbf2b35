use serde::{Deserialize, Serialize};

/// Portal role. The identity service assigns exactly one per user.
///
/// Labels other than the two known ones are carried verbatim; unknown
/// roles still land on the generic dashboard instead of being rejected
/// at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Internal sales staff.
    SalesManager,
    /// Distributor / agency account.
    Agency,
    /// Any other label the identity service assigns.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::SalesManager => "SalesManager",
            Role::Agency => "Agency",
            Role::Other(label) => label,
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        match label.as_str() {
            "SalesManager" => Role::SalesManager,
            "Agency" => Role::Agency,
            _ => Role::Other(label),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
