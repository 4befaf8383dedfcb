//! Process-wide draft event bus.
//!
//! # Responsibility
//! - Fan draft mutation events out to registered listeners synchronously.
//! - Tie listener lifetime to explicit subscribe/unsubscribe calls.
//!
//! # Invariants
//! - Listeners of one kind are invoked in registration order.
//! - No buffering or replay; delivery reaches only the listeners that are
//!   registered at emission time.
//! - `unsubscribe` is idempotent.

use crate::model::comment::Comment;
use crate::model::draft::{Draft, DraftId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Event kinds published by the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    DraftUpdated,
    DraftCommented,
}

impl EventKind {
    /// Wire name used by stream framing and subscribers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DraftUpdated => "draft:updated",
            Self::DraftCommented => "draft:commented",
        }
    }
}

/// Payload delivered to listeners.
#[derive(Debug, Clone)]
pub enum DraftEvent {
    /// Full draft after any successful mutation.
    Updated { draft: Draft },
    /// New comment on a draft.
    Commented { draft_id: DraftId, comment: Comment },
}

impl DraftEvent {
    /// Kind under which this event is delivered.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Updated { .. } => EventKind::DraftUpdated,
            Self::Commented { .. } => EventKind::DraftCommented,
        }
    }
}

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&DraftEvent) + Send + Sync>;

struct Registration {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// In-process publish/subscribe channel for draft events.
///
/// One instance spans the process; it is injected into the workspace
/// service at construction instead of living as a global singleton.
#[derive(Default)]
pub struct DraftEventBus {
    state: Mutex<BusState>,
}

impl DraftEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener for one event kind.
    pub fn subscribe(
        &self,
        kind: EventKind,
        listener: impl Fn(&DraftEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut state = self.locked();
        state.next_id += 1;
        let id = state.next_id;
        state.registrations.push(Registration {
            id,
            kind,
            listener: Arc::new(listener),
        });
        SubscriptionId(id)
    }

    /// Removes one listener; unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, subscription: SubscriptionId) {
        self.locked()
            .registrations
            .retain(|registration| registration.id != subscription.0);
    }

    /// Returns how many listeners are registered for one kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.locked()
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .count()
    }

    /// Delivers the event to every listener of its kind, in registration
    /// order.
    ///
    /// Listener handles are cloned out before invocation, so a listener may
    /// subscribe, unsubscribe or publish without deadlocking the bus.
    pub fn emit(&self, event: &DraftEvent) {
        let kind = event.kind();
        let listeners: Vec<Listener> = self
            .locked()
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .map(|registration| Arc::clone(&registration.listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn locked(&self) -> MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftEvent, DraftEventBus, EventKind};
    use crate::model::draft::{Draft, Visibility};
    use std::sync::{Arc, Mutex};

    fn updated_event() -> DraftEvent {
        DraftEvent::Updated {
            draft: Draft::new("writer-aria", "Bus test", "body", Visibility::Private, 1_000),
        }
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let bus = DraftEventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for index in 0..3 {
            let seen = Arc::clone(&seen);
            bus.subscribe(EventKind::DraftUpdated, move |_event| {
                seen.lock().unwrap().push(index);
            });
        }

        bus.emit(&updated_event());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn emission_reaches_only_matching_kind() {
        let bus = DraftEventBus::new();
        let hits = Arc::new(Mutex::new(0_u32));

        let hits_clone = Arc::clone(&hits);
        bus.subscribe(EventKind::DraftCommented, move |_event| {
            *hits_clone.lock().unwrap() += 1;
        });

        bus.emit(&updated_event());
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let bus = DraftEventBus::new();
        let hits = Arc::new(Mutex::new(0_u32));

        let hits_clone = Arc::clone(&hits);
        let subscription = bus.subscribe(EventKind::DraftUpdated, move |_event| {
            *hits_clone.lock().unwrap() += 1;
        });

        bus.emit(&updated_event());
        bus.unsubscribe(subscription);
        bus.unsubscribe(subscription);
        bus.emit(&updated_event());

        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(bus.listener_count(EventKind::DraftUpdated), 0);
    }

    #[test]
    fn listener_may_unsubscribe_itself_during_emission() {
        let bus = Arc::new(DraftEventBus::new());
        let slot = Arc::new(Mutex::new(None));

        let bus_clone = Arc::clone(&bus);
        let slot_clone = Arc::clone(&slot);
        let subscription = bus.subscribe(EventKind::DraftUpdated, move |_event| {
            if let Some(id) = slot_clone.lock().unwrap().take() {
                bus_clone.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(subscription);

        bus.emit(&updated_event());
        assert_eq!(bus.listener_count(EventKind::DraftUpdated), 0);
    }
}
