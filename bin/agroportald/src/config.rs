//! Server configuration loaded from a TOML context file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration.
///
/// ```toml
/// [storage]
/// data_dir = "/var/lib/agroportal"
///
/// [identity]
/// login_url = "https://id.example.com/api/auth/login"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the embedded store lives in.
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Login endpoint of the external identity service.
    pub login_url: String,
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// Names resolve to `/etc/agroportal/<name>.toml`; anything containing
    /// `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/agroportal/{}.toml", name_or_path))
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Verify the configuration is usable before starting.
    pub fn verify(&self) -> anyhow::Result<()> {
        if self.storage.data_dir.is_empty() {
            anyhow::bail!("Storage data_dir is empty in configuration.");
        }
        if self.identity.login_url.is_empty() {
            anyhow::bail!("Identity login_url is empty in configuration.");
        }
        Ok(())
    }
}
