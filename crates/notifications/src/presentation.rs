//! Notification Presentation Effects
//!
//! Side effects applied when a notification reaches the presentation layer
//! (delivery itself happens in the OS and is out of scope here). Effects
//! are registered once and fanned out for every presented notification.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vela_core::{Event, EventBus};

use crate::badge::BadgeManager;

/// Presentation-side view of a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Optional grouping tag
    pub tag: Option<String>,
    /// Identifier, unique within the tag
    pub id: i32,
    /// Title line
    pub title: Option<String>,
    /// Body text
    pub body: Option<String>,
    /// Badge count this notification carries, if any
    pub badge_count: Option<u32>,
}

impl Notification {
    pub fn new(id: i32) -> Self {
        Self {
            tag: None,
            id,
            title: None,
            body: None,
            badge_count: None,
        }
    }
}

/// A side effect triggered by notification presentation
pub trait NotificationPresentationEffect: Send + Sync {
    /// Stable name used for registration and deduplication
    fn name(&self) -> &str;

    /// Called when a notification was presented. Returns whether the
    /// effect acted on it.
    fn on_presented(&self, notification: &Notification) -> bool;

    /// Called when presentation failed. Returns whether the effect acted.
    fn on_presentation_failed(&self, _notification: &Notification) -> bool {
        false
    }
}

/// Registry that fans presentation callbacks out to every effect
pub struct PresentationEffectsManager {
    effects: RwLock<Vec<Arc<dyn NotificationPresentationEffect>>>,
    events: Arc<EventBus>,
}

impl PresentationEffectsManager {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            effects: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Register an effect, replacing any previous one with the same name
    pub fn add_effect(&self, effect: Arc<dyn NotificationPresentationEffect>) {
        let mut effects = self.effects.write();
        effects.retain(|e| e.name() != effect.name());
        effects.push(effect);
    }

    /// Remove an effect by name. Returns whether it was registered.
    pub fn remove_effect(&self, name: &str) -> bool {
        let mut effects = self.effects.write();
        let before = effects.len();
        effects.retain(|e| e.name() != name);
        effects.len() != before
    }

    pub fn effect_count(&self) -> usize {
        self.effects.read().len()
    }

    /// Fan out a presented notification. Returns whether any effect acted.
    pub fn on_notification_presented(&self, notification: &Notification) -> bool {
        self.events.emit(Event::NotificationPresented {
            tag: notification.tag.clone(),
            id: notification.id,
        });
        let mut any_acted = false;
        for effect in self.effects.read().iter() {
            any_acted = effect.on_presented(notification) || any_acted;
        }
        any_acted
    }

    /// Fan out a failed presentation. Returns whether any effect acted.
    pub fn on_notification_presentation_failed(&self, notification: &Notification) -> bool {
        debug!(
            "notification presentation failed: tag={:?} id={}",
            notification.tag, notification.id
        );
        let mut any_acted = false;
        for effect in self.effects.read().iter() {
            any_acted = effect.on_presentation_failed(notification) || any_acted;
        }
        any_acted
    }
}

/// Effect that forwards a presented notification's badge count to the
/// badge manager
pub struct ApplyBadgeCountEffect {
    badge: Arc<BadgeManager>,
}

impl ApplyBadgeCountEffect {
    pub fn new(badge: Arc<BadgeManager>) -> Self {
        Self { badge }
    }
}

impl NotificationPresentationEffect for ApplyBadgeCountEffect {
    fn name(&self) -> &str {
        "apply-badge-count"
    }

    fn on_presented(&self, notification: &Notification) -> bool {
        let Some(count) = notification.badge_count else {
            return false;
        };
        match self.badge.set_badge_count(count) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not apply badge count from notification: {}", e);
                false
            }
        }
    }
}
