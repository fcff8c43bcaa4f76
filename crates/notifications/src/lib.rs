//! Vela Notifications
//!
//! Bindings from the application layer to platform notification state:
//! the app-icon badge and presentation-time side effects. Delivery
//! transport and push-token issuance live in the OS, not here.

pub mod badge;
pub mod presentation;

pub use badge::{BadgeError, BadgeManager, BadgePlatform, NullBadgePlatform};
pub use presentation::{
    ApplyBadgeCountEffect, Notification, NotificationPresentationEffect,
    PresentationEffectsManager,
};
