//! Vela Splash Screen
//!
//! Controls the native splash overlay shown while the application's own UI
//! boots: mounting it over the host window, detecting the first rendered
//! application view, and auto-hiding unless the application prevents it.

pub mod configurator;
pub mod controller;
pub mod mode;
pub mod view;

pub use configurator::{ResourceConfigurator, SplashResources, SplashScreenConfigurator};
pub use controller::{SplashScreenController, SplashScreenError, CONTENT_PROBE_INTERVAL};
pub use mode::{ParseModeError, SplashScreenMode};
pub use view::SplashScreenView;
