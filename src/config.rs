//! Configuration for the dashboard server

use std::env;
use std::path::PathBuf;

use crate::customer_config::CONFIG_FILE;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Root for the relative config, static and data paths
    pub base_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            base_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("STUDIO_HOST").unwrap_or(defaults.host),
            port: env::var("STUDIO_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            base_dir: env::var("STUDIO_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
        }
    }

    pub fn customer_config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.base_dir.join("static")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_base_dir() {
        let config = AppConfig {
            base_dir: PathBuf::from("/srv/studio"),
            ..Default::default()
        };
        assert_eq!(
            config.customer_config_path(),
            PathBuf::from("/srv/studio/config/customer_config.json")
        );
        assert_eq!(config.static_dir(), PathBuf::from("/srv/studio/static"));
        assert_eq!(config.data_dir(), PathBuf::from("/srv/studio/data"));
    }
}
