//! Plugin settings, loaded from a JSON file.

use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::server::ServerConfig;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed fine but the values cannot be used.
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// User-facing settings of the control server.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// TCP port to listen on.
    pub port: u16,
    /// Listen on all interfaces instead of loopback only.
    pub allow_remote: bool,
    /// Directory served under `/`, if any.
    pub web_root: Option<PathBuf>,
    /// Music library folders, read by the embedding application. Must be absolute.
    pub music_dirs: Vec<PathBuf>,
    pub max_connections: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8880,
            allow_remote: true,
            web_root: None,
            music_dirs: Vec::new(),
            max_connections: 1024,
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, or use the defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.port == 0 {
            return Err(SettingsError::Invalid("port must not be 0".to_string()));
        }
        if self.max_connections == 0 {
            return Err(SettingsError::Invalid("maxConnections must not be 0".to_string()));
        }
        if let Some(dir) = self.music_dirs.iter().find(|dir| dir.is_relative()) {
            return Err(SettingsError::Invalid(format!(
                "music directory must be absolute: {}",
                dir.display()
            )));
        }
        Ok(())
    }

    /// Server configuration derived from these settings.
    pub fn server_config(&self) -> ServerConfig {
        let ip = if self.allow_remote { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };

        ServerConfig {
            addr: SocketAddr::from((ip, self.port)),
            max_connections: self.max_connections,
            ..ServerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddr};

    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.port, 8880);
    }

    #[test]
    fn test_camel_case_fields() {
        let settings = Settings::from_json(
            r#"{"port": 9000, "allowRemote": false, "webRoot": "/srv/www", "musicDirs": ["/music"]}"#,
        )
        .unwrap();

        assert_eq!(settings.port, 9000);
        assert!(!settings.allow_remote);
        assert_eq!(settings.web_root, Some(PathBuf::from("/srv/www")));
        assert_eq!(settings.music_dirs, vec![PathBuf::from("/music")]);
        assert_eq!(settings.server_config().addr, SocketAddr::from((Ipv4Addr::LOCALHOST, 9000)));
    }

    #[test]
    fn test_remote_binds_all_interfaces() {
        let config = Settings::default().server_config();
        assert_eq!(config.addr, SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8880)));
        assert_eq!(config.read_buffer_size, ServerConfig::default().read_buffer_size);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(Settings::from_json(r#"{"port": 0}"#), Err(SettingsError::Invalid(_))));
        assert!(matches!(Settings::from_json(r#"{"musicDirs": ["music"]}"#), Err(SettingsError::Invalid(_))));
        assert!(matches!(Settings::from_json(r#"{"port": "x"}"#), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("playerweb-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{"port": 8123}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.port, 8123);

        fs::remove_file(&path).unwrap();
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
