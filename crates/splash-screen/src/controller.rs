//! Splash-Screen Controller
//!
//! Owns the visibility state of the native splash overlay: mounting it over
//! the host window's content, probing the view tree for the application's
//! first rendered view, and hiding the overlay automatically unless the
//! application layer prevents it.
//!
//! All state transitions run serialized on the UI-affine dispatcher; the
//! async operations marshal onto it and resolve exactly once through a
//! oneshot completion.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use vela_core::{Event, EventBus, Host, UiHandler, ViewKind};

use crate::configurator::{ResourceConfigurator, SplashScreenConfigurator};
use crate::mode::SplashScreenMode;
use crate::view::SplashScreenView;

/// Interval between content-probe ticks
pub const CONTENT_PROBE_INTERVAL: Duration = Duration::from_millis(20);

/// Failure reasons reported by the controller operations
///
/// All variants are expected, recoverable conditions; none are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplashScreenError {
    #[error("native splash screen is already mounted")]
    AlreadyMounted,
    #[error("view hierarchy is not ready to mount the native splash screen")]
    NoAttachmentPoint,
    #[error("native splash screen auto-hide is already prevented")]
    AlreadyPrevented,
    #[error("native splash screen is already hidden")]
    AlreadyHidden,
    #[error("host window is no longer present")]
    NoHost,
    #[error("host window is not operable")]
    HostNotOperable,
}

impl From<SplashScreenError> for vela_core::VelaError {
    fn from(e: SplashScreenError) -> Self {
        vela_core::VelaError::SplashScreen(e.to_string())
    }
}

struct Inner {
    host: Option<Weak<dyn Host>>,
    overlay: Option<SplashScreenView>,
    auto_hide_enabled: bool,
}

impl Inner {
    fn resolve_host(&self) -> Option<Arc<dyn Host>> {
        self.host.as_ref().and_then(Weak::upgrade)
    }
}

/// Controller for the native splash overlay
///
/// Constructed once by the runtime bootstrap and shared with the bridge
/// layer; holds its host weakly so a destroyed window is observed as a
/// normal failure, never kept alive.
pub struct SplashScreenController {
    handler: UiHandler,
    events: Arc<EventBus>,
    inner: Arc<Mutex<Inner>>,
}

impl SplashScreenController {
    /// Create a controller bound to the UI dispatcher
    pub fn new(handler: UiHandler, events: Arc<EventBus>) -> Self {
        Self {
            handler,
            events,
            inner: Arc::new(Mutex::new(Inner {
                host: None,
                overlay: None,
                auto_hide_enabled: true,
            })),
        }
    }

    /// Whether the overlay is currently mounted
    pub fn is_shown(&self) -> bool {
        self.inner.lock().overlay.is_some()
    }

    /// Whether the content probe may still hide the overlay automatically
    pub fn auto_hide_enabled(&self) -> bool {
        self.inner.lock().auto_hide_enabled
    }

    /// Show the splash overlay using the default resource configurator
    pub async fn show(
        &self,
        host: Arc<dyn Host>,
        mode: SplashScreenMode,
    ) -> Result<(), SplashScreenError> {
        self.show_with(host, mode, Arc::new(ResourceConfigurator::default()))
            .await
    }

    /// Show the splash overlay with a custom configurator
    ///
    /// Mounts the overlay over the host's attachment point and, while
    /// auto-hide is enabled, starts probing for application content.
    pub async fn show_with(
        &self,
        host: Arc<dyn Host>,
        mode: SplashScreenMode,
        configurator: Arc<dyn SplashScreenConfigurator>,
    ) -> Result<(), SplashScreenError> {
        // the handle is recorded before marshalling so a hide queued right
        // behind this show can already resolve the host
        self.inner.lock().host = Some(Arc::downgrade(&host));

        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let handler = self.handler.clone();
        let events = Arc::clone(&self.events);
        self.handler.post(move || {
            let result = Self::mount(&inner, host.as_ref(), mode, configurator.as_ref());
            if result.is_ok() {
                events.emit(Event::SplashShown);
                let auto_hide = inner.lock().auto_hide_enabled;
                if auto_hide {
                    Self::probe_content(handler, inner, events);
                }
            }
            let _ = tx.send(result);
        });

        // a dropped completion means the dispatcher was torn down under us
        rx.await.unwrap_or(Err(SplashScreenError::HostNotOperable))
    }

    /// Prevent the content probe from hiding the overlay automatically
    pub async fn prevent_auto_hide(&self) -> Result<(), SplashScreenError> {
        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let events = Arc::clone(&self.events);
        self.handler.post(move || {
            let result = {
                let mut guard = inner.lock();
                if !guard.auto_hide_enabled {
                    Err(SplashScreenError::AlreadyPrevented)
                } else if guard.overlay.is_none() {
                    Err(SplashScreenError::AlreadyHidden)
                } else {
                    guard.auto_hide_enabled = false;
                    Ok(())
                }
            };
            if result.is_ok() {
                debug!("splash screen auto-hide prevented");
                events.emit(Event::SplashAutoHidePrevented);
            }
            let _ = tx.send(result);
        });

        rx.await.unwrap_or(Err(SplashScreenError::HostNotOperable))
    }

    /// Hide the splash overlay and fully reset controller state
    pub async fn hide(&self) -> Result<(), SplashScreenError> {
        // fail fast on a stale handle without touching the dispatcher
        if self.inner.lock().resolve_host().is_none() {
            return Err(SplashScreenError::NoHost);
        }

        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let events = Arc::clone(&self.events);
        self.handler.post(move || {
            let result = Self::unmount(&inner);
            if result.is_ok() {
                events.emit(Event::SplashHidden { auto_hide: false });
            }
            let _ = tx.send(result);
        });

        rx.await.unwrap_or(Err(SplashScreenError::HostNotOperable))
    }

    /// Overlay mount step. Runs on the UI dispatcher.
    fn mount(
        inner: &Arc<Mutex<Inner>>,
        host: &dyn Host,
        mode: SplashScreenMode,
        configurator: &dyn SplashScreenConfigurator,
    ) -> Result<(), SplashScreenError> {
        let mut guard = inner.lock();
        if guard.overlay.is_some() {
            return Err(SplashScreenError::AlreadyMounted);
        }
        let container = host
            .attachment_point()
            .ok_or(SplashScreenError::NoAttachmentPoint)?;

        let view = SplashScreenView::new(&container, mode, configurator);
        view.attach();
        guard.overlay = Some(view);
        info!("splash screen mounted in {} mode", mode);
        Ok(())
    }

    /// Overlay teardown step shared by `hide` and the content probe.
    /// Runs on the UI dispatcher.
    fn unmount(inner: &Arc<Mutex<Inner>>) -> Result<(), SplashScreenError> {
        let mut guard = inner.lock();
        let host = guard.resolve_host().ok_or(SplashScreenError::NoHost)?;
        if !host.is_operable() {
            return Err(SplashScreenError::HostNotOperable);
        }
        let view = guard
            .overlay
            .take()
            .ok_or(SplashScreenError::AlreadyHidden)?;
        view.detach();

        // restore the initial state
        guard.host = None;
        guard.auto_hide_enabled = true;
        info!("splash screen hidden");
        Ok(())
    }

    /// One content-probe tick. Runs on the UI dispatcher and reschedules
    /// itself while the application content root stays empty.
    fn probe_content(handler: UiHandler, inner: Arc<Mutex<Inner>>, events: Arc<EventBus>) {
        // prevention is re-checked at the start of every tick
        let (weak_host, auto_hide) = {
            let guard = inner.lock();
            (guard.host.clone(), guard.auto_hide_enabled)
        };
        if !auto_hide {
            debug!("content probe stopped: auto-hide prevented");
            return;
        }
        let Some(host) = weak_host.as_ref().and_then(Weak::upgrade) else {
            warn!("content probe stopped: host window is no longer present");
            return;
        };
        let content_root = host
            .attachment_point()
            .and_then(|container| container.find_descendant(ViewKind::ContentRoot));
        let Some(content_root) = content_root else {
            warn!("content probe stopped: no application content root in the view hierarchy");
            return;
        };

        if content_root.child_count() > 0 {
            match Self::unmount(&inner) {
                Ok(()) => {
                    debug!("application content mounted, splash screen auto-hidden");
                    events.emit(Event::SplashHidden { auto_hide: true });
                }
                Err(e) => warn!("splash screen auto-hide failed: {}", e),
            }
        } else {
            let next_handler = handler.clone();
            handler.post_delayed(CONTENT_PROBE_INTERVAL, move || {
                Self::probe_content(next_handler, inner, events)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::{UiThread, Window};

    fn fixture() -> (UiThread, SplashScreenController) {
        let ui = UiThread::spawn().unwrap();
        let events = Arc::new(EventBus::new());
        let controller = SplashScreenController::new(ui.handler(), events);
        (ui, controller)
    }

    /// Window with an initialized hierarchy but no application content root,
    /// so the content probe terminates right away.
    fn bare_window() -> Arc<Window> {
        let window = Arc::new(Window::new());
        window.init_view_hierarchy();
        window
    }

    /// Window with an (empty) application content root, so the content
    /// probe keeps polling until a child appears.
    fn window_with_content_root() -> (Arc<Window>, vela_core::ViewNode) {
        let window = bare_window();
        let content_root = window.mount_content_root().unwrap();
        (window, content_root)
    }

    #[tokio::test]
    async fn test_second_show_reports_already_mounted() {
        let (_ui, controller) = fixture();
        let window = bare_window();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        let second = controller
            .show(window.clone(), SplashScreenMode::Native)
            .await;

        assert_eq!(second, Err(SplashScreenError::AlreadyMounted));
        assert!(controller.is_shown());
        // the first overlay stays mounted, no duplicate appeared
        let container = window.attachment_point().unwrap();
        assert_eq!(container.child_count(), 1);
    }

    #[tokio::test]
    async fn test_show_without_hierarchy_reports_no_attachment_point() {
        let (_ui, controller) = fixture();
        let window = Arc::new(Window::new());

        let result = controller.show(window, SplashScreenMode::Native).await;
        assert_eq!(result, Err(SplashScreenError::NoAttachmentPoint));
        assert!(!controller.is_shown());
    }

    #[tokio::test]
    async fn test_hide_fully_resets_state() {
        let (_ui, controller) = fixture();
        let window = bare_window();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        controller.hide().await.unwrap();
        assert!(!controller.is_shown());
        assert!(controller.auto_hide_enabled());

        // behaves as if show had never been called
        assert_eq!(
            controller.prevent_auto_hide().await,
            Err(SplashScreenError::AlreadyHidden)
        );
        // and a subsequent show succeeds
        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        assert!(controller.is_shown());
    }

    #[tokio::test]
    async fn test_prevention_before_content_mount_wins() {
        let (_ui, controller) = fixture();
        let (window, content_root) = window_with_content_root();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        controller.prevent_auto_hide().await.unwrap();
        assert!(!controller.auto_hide_enabled());

        // content appearing now must not trigger an automatic hide
        content_root.add_child(&vela_core::ViewNode::new(vela_core::ViewKind::Container));
        tokio::time::sleep(CONTENT_PROBE_INTERVAL * 5).await;
        assert!(controller.is_shown());

        // an explicit hide still works and resets the prevention
        controller.hide().await.unwrap();
        assert!(controller.auto_hide_enabled());
    }

    #[tokio::test]
    async fn test_auto_hide_fires_once_content_appears() {
        let (_ui, controller) = fixture();
        let (window, content_root) = window_with_content_root();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        assert!(controller.is_shown());

        content_root.add_child(&vela_core::ViewNode::new(vela_core::ViewKind::Container));
        tokio::time::sleep(CONTENT_PROBE_INTERVAL * 5).await;

        assert!(!controller.is_shown());
        // state reset exactly as after an explicit hide
        assert!(controller.auto_hide_enabled());
        assert_eq!(
            controller.prevent_auto_hide().await,
            Err(SplashScreenError::AlreadyHidden)
        );
        let container = window.attachment_point().unwrap();
        assert!(container.find_descendant(ViewKind::SplashOverlay).is_none());
    }

    #[tokio::test]
    async fn test_auto_hide_when_content_present_at_show_time() {
        let (_ui, controller) = fixture();
        let (window, content_root) = window_with_content_root();
        content_root.add_child(&vela_core::ViewNode::new(vela_core::ViewKind::Container));

        controller
            .show(window, SplashScreenMode::Native)
            .await
            .unwrap();

        // the probe's first evaluation runs inside the show transition
        assert!(!controller.is_shown());
    }

    #[tokio::test]
    async fn test_double_prevention() {
        let (_ui, controller) = fixture();
        let window = bare_window();

        controller
            .show(window, SplashScreenMode::Native)
            .await
            .unwrap();
        assert_eq!(controller.prevent_auto_hide().await, Ok(()));
        assert_eq!(
            controller.prevent_auto_hide().await,
            Err(SplashScreenError::AlreadyPrevented)
        );
    }

    #[tokio::test]
    async fn test_prevention_before_show_reports_already_hidden() {
        let (_ui, controller) = fixture();
        assert_eq!(
            controller.prevent_auto_hide().await,
            Err(SplashScreenError::AlreadyHidden)
        );
    }

    #[tokio::test]
    async fn test_hide_with_stale_host_reports_no_host() {
        let (_ui, controller) = fixture();
        let window = bare_window();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        drop(window);

        assert_eq!(controller.hide().await, Err(SplashScreenError::NoHost));
        // the caller can still observe the stuck overlay
        assert!(controller.is_shown());
    }

    #[tokio::test]
    async fn test_hide_before_show_reports_no_host() {
        let (_ui, controller) = fixture();
        assert_eq!(controller.hide().await, Err(SplashScreenError::NoHost));
    }

    #[tokio::test]
    async fn test_hide_on_finishing_host_reports_not_operable() {
        let (_ui, controller) = fixture();
        let window = bare_window();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        window.set_lifecycle(vela_core::LifecyclePhase::Finishing);

        assert_eq!(
            controller.hide().await,
            Err(SplashScreenError::HostNotOperable)
        );
        assert!(controller.is_shown());
    }

    #[tokio::test]
    async fn test_events_for_auto_hide() {
        let ui = UiThread::spawn().unwrap();
        let events = Arc::new(EventBus::new());
        let subscription = events.subscribe();
        let controller = SplashScreenController::new(ui.handler(), Arc::clone(&events));
        let (window, content_root) = window_with_content_root();

        controller
            .show(window.clone(), SplashScreenMode::Native)
            .await
            .unwrap();
        content_root.add_child(&vela_core::ViewNode::new(vela_core::ViewKind::Container));
        tokio::time::sleep(CONTENT_PROBE_INTERVAL * 5).await;

        assert!(matches!(subscription.try_recv(), Ok(Event::SplashShown)));
        assert!(matches!(
            subscription.try_recv(),
            Ok(Event::SplashHidden { auto_hide: true })
        ));
    }
}
