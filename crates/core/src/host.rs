//! Host Window Abstraction
//!
//! The host is the platform window/activity that owns the application's
//! view tree. Framework controllers hold it weakly so they can never keep
//! a destroyed window alive; a handle that fails to resolve is a normal
//! failure condition, not a crash.

use parking_lot::RwLock;

use crate::view::{ViewKind, ViewNode};

/// Lifecycle phase of a host window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Window created, view hierarchy not necessarily ready
    Initializing,
    /// Window is live and accepting view mutations
    Active,
    /// Window is on its way out
    Finishing,
    /// Window is gone
    Destroyed,
}

impl LifecyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecyclePhase::Initializing => "initializing",
            LifecyclePhase::Active => "active",
            LifecyclePhase::Finishing => "finishing",
            LifecyclePhase::Destroyed => "destroyed",
        }
    }

    /// Whether view mutations are still allowed in this phase
    pub fn is_operable(&self) -> bool {
        matches!(self, LifecyclePhase::Initializing | LifecyclePhase::Active)
    }
}

/// Contract a platform window must expose to framework controllers
pub trait Host: Send + Sync {
    /// Root container the framework may attach chrome views to.
    /// `None` until the window's view hierarchy is initialized enough to
    /// accept a child.
    fn attachment_point(&self) -> Option<ViewNode>;

    /// Current lifecycle phase
    fn lifecycle(&self) -> LifecyclePhase;

    /// Whether the window can still be mutated
    fn is_operable(&self) -> bool {
        self.lifecycle().is_operable()
    }
}

/// Basic in-process host window
///
/// Backs the desktop shell and the test suites. The application layer
/// mounts its content root under the attachment point; the framework only
/// observes it.
pub struct Window {
    content: RwLock<Option<ViewNode>>,
    phase: RwLock<LifecyclePhase>,
}

impl Window {
    /// Create a window whose view hierarchy is not yet initialized
    pub fn new() -> Self {
        Self {
            content: RwLock::new(None),
            phase: RwLock::new(LifecyclePhase::Initializing),
        }
    }

    /// Initialize the view hierarchy and return the root container.
    /// Idempotent: a second call returns the existing container.
    pub fn init_view_hierarchy(&self) -> ViewNode {
        let mut content = self.content.write();
        if let Some(ref root) = *content {
            return root.clone();
        }
        let root = ViewNode::new(ViewKind::Container);
        *content = Some(root.clone());
        *self.phase.write() = LifecyclePhase::Active;
        root
    }

    /// Mount the application content root under the container, returning it.
    /// Returns `None` if the hierarchy is not initialized yet.
    pub fn mount_content_root(&self) -> Option<ViewNode> {
        let container = self.content.read().clone()?;
        let content_root = ViewNode::new(ViewKind::ContentRoot);
        container.add_child(&content_root);
        Some(content_root)
    }

    /// Move the window to a new lifecycle phase
    pub fn set_lifecycle(&self, phase: LifecyclePhase) {
        *self.phase.write() = phase;
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Window {
    fn attachment_point(&self) -> Option<ViewNode> {
        self.content.read().clone()
    }

    fn lifecycle(&self) -> LifecyclePhase {
        *self.phase.read()
    }
}
