//! Bridge Module Layer
//!
//! Exposes the runtime modules to the embedding application layer the way
//! a cross-language bridge would: named modules with async methods that
//! resolve to a JSON value or reject with a coded error. Each call
//! resolves exactly once.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use vela_core::Host;
use vela_notifications::{BadgeError, BadgeManager};
use vela_splash_screen::{ParseModeError, SplashScreenController, SplashScreenError, SplashScreenMode};

/// Rejection code for splash-screen methods
pub const ERR_SPLASH: &str = "ERR_SPLASH";

/// Rejection code for badge methods
pub const ERR_NOTIFICATION_BADGE: &str = "ERR_NOTIFICATION_BADGE";

/// Coded rejection handed back over the bridge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ModuleError {
    /// Stable rejection code the application layer switches on
    pub code: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl From<ModuleError> for vela_core::VelaError {
    fn from(e: ModuleError) -> Self {
        vela_core::VelaError::Module(e.to_string())
    }
}

impl From<SplashScreenError> for ModuleError {
    fn from(e: SplashScreenError) -> Self {
        Self {
            code: ERR_SPLASH,
            message: e.to_string(),
        }
    }
}

impl From<ParseModeError> for ModuleError {
    fn from(e: ParseModeError) -> Self {
        Self {
            code: ERR_SPLASH,
            message: e.to_string(),
        }
    }
}

impl From<BadgeError> for ModuleError {
    fn from(e: BadgeError) -> Self {
        Self {
            code: ERR_NOTIFICATION_BADGE,
            message: e.to_string(),
        }
    }
}

/// Splash-screen methods exported to the application layer
pub struct SplashScreenModule {
    controller: Arc<SplashScreenController>,
}

impl SplashScreenModule {
    /// Exported module name
    pub const NAME: &'static str = "VelaSplashScreen";

    /// Wrap a controller for export
    pub fn new(controller: Arc<SplashScreenController>) -> Self {
        Self { controller }
    }

    /// Show the splash overlay on the given host
    pub async fn show_async(
        &self,
        host: Arc<dyn Host>,
        mode: &str,
    ) -> Result<Value, ModuleError> {
        let mode: SplashScreenMode = mode.parse()?;
        self.controller.show(host, mode).await?;
        Ok(Value::Null)
    }

    /// Keep the overlay up until an explicit hide
    pub async fn prevent_auto_hide_async(&self) -> Result<Value, ModuleError> {
        self.controller.prevent_auto_hide().await?;
        Ok(Value::Null)
    }

    /// Hide the overlay
    pub async fn hide_async(&self) -> Result<Value, ModuleError> {
        self.controller.hide().await?;
        Ok(Value::Null)
    }
}

/// Badge methods exported to the application layer
pub struct BadgeModule {
    badge: Arc<BadgeManager>,
}

impl BadgeModule {
    /// Exported module name
    pub const NAME: &'static str = "VelaBadge";

    /// Wrap a badge manager for export
    pub fn new(badge: Arc<BadgeManager>) -> Self {
        Self { badge }
    }

    /// Read the cached badge count
    pub async fn get_badge_count_async(&self) -> Result<Value, ModuleError> {
        Ok(json!(self.badge.badge_count()))
    }

    /// Apply a new badge count
    pub async fn set_badge_count_async(&self, count: u32) -> Result<Value, ModuleError> {
        self.badge.set_badge_count(count)?;
        Ok(Value::Null)
    }
}

/// Names of the modules exported to the bridge
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    names: Vec<&'static str>,
}

impl ModuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exported module name (idempotent)
    pub fn register(&mut self, name: &'static str) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// Whether a module is exported
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Exported module names in registration order
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::{EventBus, UiThread, Window};
    use vela_notifications::NullBadgePlatform;

    fn splash_module() -> (UiThread, SplashScreenModule) {
        let ui = UiThread::spawn().unwrap();
        let events = Arc::new(EventBus::new());
        let controller = Arc::new(SplashScreenController::new(ui.handler(), events));
        (ui, SplashScreenModule::new(controller))
    }

    #[tokio::test]
    async fn test_show_and_hide_resolve_null() {
        let (_ui, module) = splash_module();
        let window = Arc::new(Window::new());
        window.init_view_hierarchy();

        let shown = module.show_async(window.clone(), "native").await.unwrap();
        assert_eq!(shown, Value::Null);
        assert_eq!(module.hide_async().await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_mode_rejects_with_splash_code() {
        let (_ui, module) = splash_module();
        let window = Arc::new(Window::new());
        window.init_view_hierarchy();

        let err = module
            .show_async(window.clone(), "stretch")
            .await
            .unwrap_err();
        assert_eq!(err.code, ERR_SPLASH);
    }

    #[tokio::test]
    async fn test_hide_before_show_rejects_with_splash_code() {
        let (_ui, module) = splash_module();
        let err = module.hide_async().await.unwrap_err();
        assert_eq!(err.code, ERR_SPLASH);
        assert_eq!(err.message, SplashScreenError::NoHost.to_string());
    }

    #[tokio::test]
    async fn test_badge_module_round_trip() {
        let events = Arc::new(EventBus::new());
        let badge = Arc::new(BadgeManager::new(Arc::new(NullBadgePlatform), events));
        let module = BadgeModule::new(badge);

        module.set_badge_count_async(9).await.unwrap();
        assert_eq!(module.get_badge_count_async().await.unwrap(), json!(9));
    }

    #[test]
    fn test_registry() {
        let mut registry = ModuleRegistry::new();
        registry.register(SplashScreenModule::NAME);
        registry.register(BadgeModule::NAME);
        registry.register(SplashScreenModule::NAME);

        assert_eq!(registry.names().len(), 2);
        assert!(registry.contains("VelaSplashScreen"));
        assert!(!registry.contains("VelaAudio"));
    }
}
