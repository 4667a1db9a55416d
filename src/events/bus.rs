//! Event bus: an ordered subscriber registry keyed by event kind.
//!
//! The bus stores which subscriber reacts to which event kind, in
//! subscription order. Dispatch itself is driven by the game session,
//! which owns the state every handler mutates: publishing takes an ordered
//! `snapshot` of the current subscribers and re-checks membership with
//! `is_subscribed` before each call, so a handler unsubscribed mid-dispatch
//! is skipped rather than invoked. Delivery is synchronous: each handler
//! finishes, and its follow-up events are fully dispatched, before the next
//! handler sees the triggering event.
//!
//! Subscribers are tagged with the session generation they belong to.
//! Generation `PERSISTENT` marks the orchestrator's own subscriptions,
//! which survive board rebuilds; per-board services register under the
//! current generation and are dropped wholesale on teardown.

use rustc_hash::FxHashMap;

use super::event::EventKind;

/// Generation tag for subscriptions that outlive board rebuilds.
pub const PERSISTENT: u64 = 0;

/// Stable identity of an event subscriber.
///
/// The subscriber set is closed: every handler is a service the session
/// owns, dispatched by matching on this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubscriberId {
    /// The orchestrator itself (input routing, queue drain, autosave).
    Session,
    /// Pair resolution state machine.
    Matcher,
    /// Score and combo tracking.
    Score,
    /// Try budget tracking.
    Attempts,
    /// Win detection.
    Win,
    /// Post-game restart scheduling.
    Endgame,
}

/// A registered subscriber: who, and under which session generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriberId,
    pub generation: u64,
}

/// Ordered subscriber registry.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    handlers: FxHashMap<EventKind, Vec<Subscription>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for an event kind.
    ///
    /// Handlers for one kind run in subscription order.
    pub fn subscribe(&mut self, kind: EventKind, id: SubscriberId, generation: u64) {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Subscription { id, generation });
    }

    /// Remove one subscriber from an event kind. No-op if absent.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriberId, generation: u64) {
        if let Some(list) = self.handlers.get_mut(&kind) {
            list.retain(|s| !(s.id == id && s.generation == generation));
        }
    }

    /// Remove every subscriber registered under a generation.
    ///
    /// Used on session teardown; the orchestrator's `PERSISTENT`
    /// subscriptions are never passed here.
    pub fn unsubscribe_generation(&mut self, generation: u64) {
        for list in self.handlers.values_mut() {
            list.retain(|s| s.generation != generation);
        }
        self.handlers.retain(|_, list| !list.is_empty());
    }

    /// Ordered snapshot of the current subscribers for a kind.
    #[must_use]
    pub fn snapshot(&self, kind: EventKind) -> Vec<Subscription> {
        self.handlers.get(&kind).cloned().unwrap_or_default()
    }

    /// Check whether a snapshot entry is still registered.
    #[must_use]
    pub fn is_subscribed(&self, kind: EventKind, sub: Subscription) -> bool {
        self.handlers
            .get(&kind)
            .is_some_and(|list| list.contains(&sub))
    }

    /// Number of subscribers for a kind.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}
