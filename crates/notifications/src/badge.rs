//! Badge Manager
//!
//! Thin pass-through from the application layer to the platform's badge
//! facility. The manager caches the last count it applied so reads never
//! have to query the OS.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};
use vela_core::{Event, EventBus};

/// Badge errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadgeError {
    #[error("badge platform rejected count {count}: {reason}")]
    PlatformRejected { count: u32, reason: String },
    #[error("badge counts are not supported on this platform")]
    Unsupported,
}

impl From<BadgeError> for vela_core::VelaError {
    fn from(e: BadgeError) -> Self {
        vela_core::VelaError::Notification(e.to_string())
    }
}

/// Platform facility that renders the badge on the app icon
pub trait BadgePlatform: Send + Sync {
    /// Apply the count to the app icon; 0 clears the badge
    fn apply_count(&self, count: u32) -> Result<(), BadgeError>;

    /// Whether the platform renders badges at all
    fn supports_badges(&self) -> bool {
        true
    }
}

/// Platform stub for hosts without a badge facility; logs and accepts
pub struct NullBadgePlatform;

impl BadgePlatform for NullBadgePlatform {
    fn apply_count(&self, count: u32) -> Result<(), BadgeError> {
        debug!("badge platform stub: count {} not rendered", count);
        Ok(())
    }

    fn supports_badges(&self) -> bool {
        false
    }
}

/// Application badge state, shared with the bridge layer
pub struct BadgeManager {
    platform: Arc<dyn BadgePlatform>,
    events: Arc<EventBus>,
    count: Mutex<u32>,
}

impl BadgeManager {
    pub fn new(platform: Arc<dyn BadgePlatform>, events: Arc<EventBus>) -> Self {
        Self {
            platform,
            events,
            count: Mutex::new(0),
        }
    }

    /// Last successfully applied badge count
    pub fn badge_count(&self) -> u32 {
        *self.count.lock()
    }

    /// Apply a new badge count through the platform and cache it
    pub fn set_badge_count(&self, count: u32) -> Result<(), BadgeError> {
        if !self.platform.supports_badges() {
            warn!("badge count {} requested on a platform without badges", count);
        }
        self.platform.apply_count(count)?;
        *self.count.lock() = count;
        self.events.emit(Event::BadgeChanged { count });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingPlatform;

    impl BadgePlatform for RejectingPlatform {
        fn apply_count(&self, count: u32) -> Result<(), BadgeError> {
            Err(BadgeError::PlatformRejected {
                count,
                reason: "no launcher".to_string(),
            })
        }
    }

    #[test]
    fn test_set_and_get() {
        let events = Arc::new(EventBus::new());
        let subscription = events.subscribe();
        let manager = BadgeManager::new(Arc::new(NullBadgePlatform), events);

        assert_eq!(manager.badge_count(), 0);
        manager.set_badge_count(4).unwrap();
        assert_eq!(manager.badge_count(), 4);
        assert!(matches!(
            subscription.try_recv(),
            Ok(Event::BadgeChanged { count: 4 })
        ));

        manager.set_badge_count(0).unwrap();
        assert_eq!(manager.badge_count(), 0);
    }

    #[test]
    fn test_rejected_count_leaves_cache_untouched() {
        let events = Arc::new(EventBus::new());
        let manager = BadgeManager::new(Arc::new(RejectingPlatform), events);

        let result = manager.set_badge_count(7);
        assert!(matches!(
            result,
            Err(BadgeError::PlatformRejected { count: 7, .. })
        ));
        assert_eq!(manager.badge_count(), 0);
    }
}
