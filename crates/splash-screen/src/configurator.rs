//! Splash Configurators
//!
//! A configurator supplies the flow-dependent pieces of the overlay: the
//! background color and the image source for a given mode. The default
//! implementation reads them from a TOML resource file, mirroring how the
//! main application splash is resourced; embedding flows can plug in their
//! own implementation through [`SplashScreenController::show_with`].
//!
//! [`SplashScreenController::show_with`]: crate::SplashScreenController::show_with

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vela_core::{Color, ImageSource, Result, VelaError};

use crate::mode::SplashScreenMode;

/// Provides flow-dependent resources for overlay construction
pub trait SplashScreenConfigurator: Send + Sync {
    /// Background color of the overlay
    fn background_color(&self) -> Color;

    /// Image source for the given mode, or `None` when the mode needs no
    /// extra image view (the `Native` mode relies on the pre-baked platform
    /// launch image)
    fn image_source(&self, mode: SplashScreenMode) -> Option<ImageSource>;
}

/// On-disk splash resource description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashResources {
    /// Background color as `#RRGGBB` / `#RRGGBBAA` hex
    pub background_color: String,
    /// Path to the splash image, relative paths resolved against the
    /// resource file's directory
    pub image: Option<PathBuf>,
}

impl Default for SplashResources {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            image: None,
        }
    }
}

/// Default configurator backed by [`SplashResources`]
pub struct ResourceConfigurator {
    background: Color,
    image: Option<ImageSource>,
}

impl ResourceConfigurator {
    /// Build from an in-memory resource description
    pub fn from_resources(resources: &SplashResources, base_dir: Option<&Path>) -> Self {
        let background = Color::from_hex(&resources.background_color).unwrap_or_else(|| {
            warn!(
                "invalid splash background color {:?}, falling back to white",
                resources.background_color
            );
            Color::WHITE
        });

        let image = resources.image.as_ref().map(|path| {
            let path = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            let dimensions = match image::image_dimensions(&path) {
                Ok(dims) => Some(dims),
                Err(e) => {
                    warn!("could not probe splash image {:?}: {}", path, e);
                    None
                }
            };
            ImageSource { path, dimensions }
        });

        Self { background, image }
    }

    /// Load a resource file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading splash resources from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let resources: SplashResources = toml::from_str(&contents)?;
        let base_dir = path.parent();
        Ok(Self::from_resources(&resources, base_dir))
    }

    /// Load from the configured resource path, falling back to defaults
    /// when no path is configured
    pub fn from_config(resources: Option<&Path>) -> Result<Self> {
        match resources {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => Err(VelaError::NotFound(format!(
                "splash resource file {:?}",
                path
            ))),
            None => Ok(Self::default()),
        }
    }
}

impl Default for ResourceConfigurator {
    fn default() -> Self {
        Self::from_resources(&SplashResources::default(), None)
    }
}

impl SplashScreenConfigurator for ResourceConfigurator {
    fn background_color(&self) -> Color {
        self.background
    }

    fn image_source(&self, mode: SplashScreenMode) -> Option<ImageSource> {
        match mode {
            // the platform window already carries the launch image
            SplashScreenMode::Native => None,
            SplashScreenMode::Contain | SplashScreenMode::Cover => self.image.clone(),
        }
    }
}
