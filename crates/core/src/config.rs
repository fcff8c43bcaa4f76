//! Application Configuration
//!
//! Settings for the runtime modules: splash-screen behavior and resources,
//! notification/badge options. Stored as TOML under the platform config
//! directory.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, VelaError};

/// Splash-screen settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashSettings {
    /// Show the splash overlay automatically when the host window opens
    pub auto_show: bool,
    /// Overlay mode: "native", "contain" or "cover"
    pub mode: String,
    /// Path to the splash resource file (background color, image)
    pub resources: Option<PathBuf>,
}

impl Default for SplashSettings {
    fn default() -> Self {
        Self {
            auto_show: true,
            mode: "native".to_string(),
            resources: None,
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Apply badge counts carried by presented notifications
    pub badge_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { badge_enabled: true }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Splash-screen settings
    pub splash: SplashSettings,
    /// Notification settings
    pub notifications: NotificationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            splash: SplashSettings::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "vela", "Vela")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from file, creating defaults on first run
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| VelaError::Config("Cannot determine config path".into()))?;

        if config_file.exists() {
            debug!("Loading config from {:?}", config_file);
            let contents = tokio::fs::read_to_string(&config_file).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| VelaError::Config("Cannot determine config path".into()))?;

        if let Some(parent) = config_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(&config_file, contents).await?;

        debug!("Config saved to {:?}", config_file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.splash.auto_show);
        assert_eq!(config.splash.mode, "native");
        assert!(config.splash.resources.is_none());
        assert!(config.notifications.badge_enabled);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = AppConfig::default();
        config.splash.mode = "cover".to_string();
        config.splash.resources = Some(PathBuf::from("assets/splash.toml"));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.splash.mode, "cover");
        assert_eq!(
            parsed.splash.resources,
            Some(PathBuf::from("assets/splash.toml"))
        );
    }
}
