//! Splash Overlay View
//!
//! The native view mounted over the application content: a full-bleed
//! background plus, depending on the mode, a centered image view.

use vela_core::{ViewKind, ViewNode};

use crate::configurator::SplashScreenConfigurator;
use crate::mode::SplashScreenMode;

/// Overlay view bound to the container it mounts into
pub struct SplashScreenView {
    container: ViewNode,
    root: ViewNode,
}

impl SplashScreenView {
    /// Build the overlay per mode and configurator. The view is constructed
    /// detached; call [`attach`](Self::attach) to mount it.
    pub fn new(
        container: &ViewNode,
        mode: SplashScreenMode,
        configurator: &dyn SplashScreenConfigurator,
    ) -> Self {
        let root = ViewNode::new(ViewKind::SplashOverlay);
        root.set_background(configurator.background_color());

        if let Some(source) = configurator.image_source(mode) {
            let image = ViewNode::new(ViewKind::Image);
            image.set_image(source, mode.scale_policy());
            root.add_child(&image);
        }

        Self {
            container: container.clone(),
            root,
        }
    }

    /// Mount the overlay into its container
    pub fn attach(&self) {
        self.container.add_child(&self.root);
    }

    /// Remove the overlay from its container
    pub fn detach(&self) {
        self.container.remove_child(&self.root);
    }

    /// The overlay's root node
    pub fn root(&self) -> &ViewNode {
        &self.root
    }
}
