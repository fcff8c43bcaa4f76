//! Event System
//!
//! Pub/sub event bus for runtime-module notifications (splash lifecycle,
//! badge changes, host lifecycle).

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use tracing::debug;

use crate::host::LifecyclePhase;

/// Events emitted by the runtime modules
#[derive(Debug, Clone)]
pub enum Event {
    /// Splash overlay was mounted
    SplashShown,
    /// Splash overlay was removed
    SplashHidden {
        /// True when the content probe hid it, false on an explicit hide
        auto_hide: bool,
    },
    /// Auto-hide was prevented by the application layer
    SplashAutoHidePrevented,
    /// Host window moved to a new lifecycle phase
    HostLifecycleChanged(LifecyclePhase),
    /// Application badge count changed
    BadgeChanged { count: u32 },
    /// A notification was handed to the presentation layer
    NotificationPresented { tag: Option<String>, id: i32 },
    /// Configuration changed
    ConfigChanged,
    /// Runtime shutdown
    Shutdown,
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<Event>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<Event, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<Event, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Get an iterator over events
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.iter()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<Event>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers, returning the delivery count
    pub fn emit(&self, event: Event) -> usize {
        let subscribers = self.subscribers.read();
        let mut delivered = 0;

        for sender in subscribers.iter() {
            if sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }

        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_delivery() {
        let bus = EventBus::new();
        let sub1 = bus.subscribe();
        let sub2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let delivered = bus.emit(Event::SplashShown);
        assert_eq!(delivered, 2);

        assert!(matches!(sub1.try_recv(), Ok(Event::SplashShown)));
        assert!(matches!(sub2.try_recv(), Ok(Event::SplashShown)));
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.emit(Event::ConfigChanged), 0);
    }
}
