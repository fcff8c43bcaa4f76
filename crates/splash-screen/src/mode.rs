//! Splash-Screen Modes
//!
//! How the overlay presents its image: the pre-baked platform launch image,
//! or a supplied image scaled to fit or to fill.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vela_core::ScalePolicy;

/// Presentation mode of the splash overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplashScreenMode {
    /// Use the pre-baked platform launch image; no extra image view
    Native,
    /// Scale the supplied image preserving aspect ratio inside the bounds
    Contain,
    /// Scale the supplied image to fill the bounds, cropping if needed
    Cover,
}

impl SplashScreenMode {
    /// Scale policy applied to the overlay's image view
    pub fn scale_policy(&self) -> ScalePolicy {
        match self {
            SplashScreenMode::Native => ScalePolicy::Center,
            SplashScreenMode::Contain => ScalePolicy::FitCenter,
            SplashScreenMode::Cover => ScalePolicy::CenterCrop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplashScreenMode::Native => "native",
            SplashScreenMode::Contain => "contain",
            SplashScreenMode::Cover => "cover",
        }
    }
}

impl fmt::Display for SplashScreenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode string cannot be recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown splash screen mode: {0}")]
pub struct ParseModeError(String);

impl FromStr for SplashScreenMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(SplashScreenMode::Native),
            "contain" => Ok(SplashScreenMode::Contain),
            "cover" => Ok(SplashScreenMode::Cover),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_policy_mapping() {
        assert_eq!(SplashScreenMode::Native.scale_policy(), ScalePolicy::Center);
        assert_eq!(
            SplashScreenMode::Contain.scale_policy(),
            ScalePolicy::FitCenter
        );
        assert_eq!(
            SplashScreenMode::Cover.scale_policy(),
            ScalePolicy::CenterCrop
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("native".parse(), Ok(SplashScreenMode::Native));
        assert_eq!("contain".parse(), Ok(SplashScreenMode::Contain));
        assert_eq!("cover".parse(), Ok(SplashScreenMode::Cover));
        assert!("stretch".parse::<SplashScreenMode>().is_err());
    }
}
