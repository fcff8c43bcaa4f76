//! Native View Tree Model
//!
//! A minimal model of the platform view hierarchy that framework chrome
//! (such as the splash overlay) attaches to. Nodes are shared handles so
//! the same subtree can be referenced from the host window, the UI
//! dispatcher, and the controllers that mutate it.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique view identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        ViewId(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a node in the view hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Plain container supplied by the host window
    Container,
    /// Marker for the application's own content root. Its first child
    /// appearing is the signal that the application has rendered.
    ContentRoot,
    /// Splash overlay mounted by the framework
    SplashOverlay,
    /// Image view
    Image,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Container => "container",
            ViewKind::ContentRoot => "content-root",
            ViewKind::SplashOverlay => "splash-overlay",
            ViewKind::Image => "image",
        }
    }
}

/// RGBA color, parsed from `#RRGGBB` or `#RRGGBBAA` hex notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };
        Some(Color { r, g, b, a })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// How an image is scaled inside its parent's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalePolicy {
    /// Center at natural size, no scaling
    Center,
    /// Scale preserving aspect ratio so the whole image fits
    FitCenter,
    /// Scale preserving aspect ratio so the image fills the bounds, cropping
    CenterCrop,
}

/// Source for an image view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Path to the image asset
    pub path: PathBuf,
    /// Pixel dimensions, when known
    pub dimensions: Option<(u32, u32)>,
}

struct ViewData {
    id: ViewId,
    kind: ViewKind,
    background: Option<Color>,
    image: Option<ImageSource>,
    scale: Option<ScalePolicy>,
    children: Vec<ViewNode>,
}

/// Shared handle to a node in the view tree
#[derive(Clone)]
pub struct ViewNode {
    inner: Arc<RwLock<ViewData>>,
}

impl ViewNode {
    /// Create a detached node of the given kind
    pub fn new(kind: ViewKind) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ViewData {
                id: ViewId::next(),
                kind,
                background: None,
                image: None,
                scale: None,
                children: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> ViewId {
        self.inner.read().id
    }

    pub fn kind(&self) -> ViewKind {
        self.inner.read().kind
    }

    pub fn background(&self) -> Option<Color> {
        self.inner.read().background
    }

    pub fn set_background(&self, color: Color) {
        self.inner.write().background = Some(color);
    }

    pub fn image(&self) -> Option<ImageSource> {
        self.inner.read().image.clone()
    }

    /// Set the image source and its scale policy
    pub fn set_image(&self, source: ImageSource, scale: ScalePolicy) {
        let mut data = self.inner.write();
        data.image = Some(source);
        data.scale = Some(scale);
    }

    pub fn scale(&self) -> Option<ScalePolicy> {
        self.inner.read().scale
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.inner.read().children.len()
    }

    /// Snapshot of the direct children
    pub fn children(&self) -> Vec<ViewNode> {
        self.inner.read().children.clone()
    }

    /// Append a child node
    pub fn add_child(&self, child: &ViewNode) {
        self.inner.write().children.push(child.clone());
    }

    /// Remove a direct child by identity. Returns whether it was present.
    pub fn remove_child(&self, child: &ViewNode) -> bool {
        let mut data = self.inner.write();
        let before = data.children.len();
        let id = child.id();
        data.children.retain(|c| c.id() != id);
        data.children.len() != before
    }

    /// Depth-first search for the first descendant of the given kind,
    /// including this node itself. Iterative over an explicit stack so the
    /// traversal depth is bounded regardless of how deep the host UI tree is.
    pub fn find_descendant(&self, kind: ViewKind) -> Option<ViewNode> {
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if node.kind() == kind {
                return Some(node);
            }
            let children = node.children();
            // push in reverse so the leftmost subtree is visited first
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        None
    }
}

impl PartialEq for ViewNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ViewNode {}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.read();
        f.debug_struct("ViewNode")
            .field("id", &data.id)
            .field("kind", &data.kind.as_str())
            .field("children", &data.children.len())
            .finish()
    }
}
