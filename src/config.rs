use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::session::DEFAULT_SESSION_KEY;
use crate::storage::is_valid_key;

/// Environment variable naming a TOML configuration file.
pub const CONFIG_ENV: &str = "WORKFORCE_CONFIG";
/// Environment variable overriding the storage directory.
pub const STORAGE_DIR_ENV: &str = "WORKFORCE_STORAGE_DIR";

/// Runtime configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// use workforce_access::AppConfig;
///
/// let config = AppConfig::from_toml_str(r#"storage_key = "wf-user""#).unwrap();
/// assert_eq!(config.storage_key, "wf-user");
/// assert_eq!(config.landing_path, "/dashboard");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage key of the session record
    pub storage_key: String,
    /// Directory of the file-backed session storage
    pub storage_dir: PathBuf,
    /// Where anonymous visitors of protected routes are sent
    pub login_path: String,
    /// Where identities lacking a route's role are sent, and where login lands
    pub landing_path: String,
    /// Target of the catch-all redirect and of logout
    pub root_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_SESSION_KEY.to_string(),
            storage_dir: PathBuf::from(".workforce"),
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
            root_path: "/".to_string(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Builds the effective configuration.
    ///
    /// The file comes from `cli_config`, else from `$WORKFORCE_CONFIG`, else
    /// defaults apply. The storage directory is then overridden by
    /// `cli_storage_dir`, else by `$WORKFORCE_STORAGE_DIR`.
    pub fn resolve(
        cli_config: Option<PathBuf>,
        cli_storage_dir: Option<PathBuf>,
    ) -> Result<Self, Error> {
        let config_path = cli_config.or_else(|| env_path(CONFIG_ENV));
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(dir) = cli_storage_dir.or_else(|| env_path(STORAGE_DIR_ENV)) {
            config.storage_dir = dir;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured paths are absolute and the key is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.storage_key.is_empty() {
            return Err(Error::Config("storage_key must not be empty".to_string()));
        }
        if !is_valid_key(&self.storage_key) {
            return Err(Error::Config(format!(
                "storage_key '{}' must be a plain file name",
                self.storage_key
            )));
        }
        for (name, value) in [
            ("login_path", &self.login_path),
            ("landing_path", &self.landing_path),
            ("root_path", &self.root_path),
        ] {
            if !value.starts_with('/') {
                return Err(Error::Config(format!("{name} must start with '/', got '{value}'")));
            }
        }
        Ok(())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).map(PathBuf::from)
}
