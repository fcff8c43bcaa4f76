//! Vela Core - Shared types and platform abstractions
//!
//! This crate provides the building blocks the Vela runtime modules sit on:
//! the view-tree model, the host window contract, the UI-affine dispatcher,
//! configuration, events, and error types.

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod ui_thread;
pub mod view;

pub use config::AppConfig;
pub use error::{Result, VelaError};
pub use events::{Event, EventBus, EventSubscription};
pub use host::{Host, LifecyclePhase, Window};
pub use ui_thread::{UiHandler, UiThread};
pub use view::{Color, ImageSource, ScalePolicy, ViewId, ViewKind, ViewNode};

/// Vela version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime name
pub const RUNTIME_NAME: &str = "Vela";
