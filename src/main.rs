//! Vela demo shell
//!
//! Wires the runtime modules together the way an embedding application
//! would: opens a host window, shows the splash overlay, simulates the
//! application layer mounting its first view, and lets the content probe
//! hide the overlay.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vela::modules::{BadgeModule, ModuleRegistry, SplashScreenModule};
use vela::{APP_NAME, VERSION};
use vela_core::{AppConfig, Event, EventBus, UiThread, Window};
use vela_notifications::{
    ApplyBadgeCountEffect, BadgeManager, Notification, NullBadgePlatform,
    PresentationEffectsManager,
};
use vela_splash_screen::SplashScreenController;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("{} v{} starting...", APP_NAME, VERSION);

    let config = AppConfig::load().await?;
    let ui = UiThread::spawn()?;
    let events = Arc::new(EventBus::new());
    let subscription = events.subscribe();

    // Host window with the framework-mounted content root; the application
    // layer fills it in later.
    let window = Arc::new(Window::new());
    window.init_view_hierarchy();
    let content_root = window
        .mount_content_root()
        .expect("view hierarchy was just initialized");

    // Runtime modules
    let controller = Arc::new(SplashScreenController::new(
        ui.handler(),
        Arc::clone(&events),
    ));
    let badge = Arc::new(BadgeManager::new(
        Arc::new(NullBadgePlatform),
        Arc::clone(&events),
    ));
    let effects = PresentationEffectsManager::new(Arc::clone(&events));
    if config.notifications.badge_enabled {
        effects.add_effect(Arc::new(ApplyBadgeCountEffect::new(Arc::clone(&badge))));
    }

    let splash_module = SplashScreenModule::new(Arc::clone(&controller));
    let badge_module = BadgeModule::new(Arc::clone(&badge));

    let mut registry = ModuleRegistry::new();
    registry.register(SplashScreenModule::NAME);
    registry.register(BadgeModule::NAME);
    info!("Modules exported: {:?}", registry.names());

    if config.splash.auto_show {
        splash_module
            .show_async(window.clone(), &config.splash.mode)
            .await?;
        info!("Splash screen shown in {} mode", config.splash.mode);
    }

    // Simulate the application layer rendering its first view
    tokio::time::sleep(Duration::from_millis(150)).await;
    content_root.add_child(&vela_core::ViewNode::new(vela_core::ViewKind::Container));
    info!("Application content mounted");

    // Wait for the content probe to hide the overlay
    let auto_hidden = tokio::task::spawn_blocking(move || loop {
        match subscription.recv() {
            Ok(Event::SplashHidden { auto_hide }) => break auto_hide,
            Ok(_) => continue,
            Err(_) => break false,
        }
    })
    .await?;
    info!("Splash screen hidden (auto: {})", auto_hidden);

    // A presented notification carrying a badge count flows through the
    // presentation effects into the badge manager.
    let mut notification = Notification::new(1);
    notification.title = Some("Welcome".to_string());
    notification.badge_count = Some(1);
    effects.on_notification_presented(&notification);
    info!(
        "Badge count after notification: {:?}",
        badge_module.get_badge_count_async().await?
    );

    info!("Shell finished");
    Ok(())
}
