//! Vela - cross-platform mobile runtime modules in pure Rust
//!
//! Framework modules that let an application layer control platform-native
//! UI chrome and notification state while the operating system does the
//! heavy lifting.
//!
//! ## Modules
//!
//! - **Splash screen**: show/prevent-auto-hide/hide lifecycle of the native
//!   launch overlay, with view-tree probing for the application's first
//!   rendered view
//! - **Notifications**: app-icon badge pass-through and presentation-time
//!   side effects
//! - **Bridge layer**: named modules with promise-style async methods and
//!   coded rejections
//!
//! ## Architecture
//!
//! Vela is organized into specialized crates:
//!
//! - `vela-core`: view-tree model, host window contract, UI-affine
//!   dispatcher, configuration, events, errors
//! - `vela-splash-screen`: the splash-screen controller state machine
//! - `vela-notifications`: badge and presentation bindings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod modules;

// Re-export main components for library usage
pub use vela_core as core;
pub use vela_notifications as notifications;
pub use vela_splash_screen as splash_screen;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::modules::{BadgeModule, ModuleRegistry, SplashScreenModule};
    pub use vela_core::{AppConfig, Event, EventBus, Host, UiThread, Window};
    pub use vela_notifications::{BadgeManager, BadgePlatform, PresentationEffectsManager};
    pub use vela_splash_screen::{SplashScreenController, SplashScreenMode};
}

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime name
pub const APP_NAME: &str = "Vela";
