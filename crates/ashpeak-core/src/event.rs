//! Combat notifications and their delivery.
//!
//! The core talks to the outside world through a single typed event enum,
//! [`CombatEvent`], delivered by the [`EventBus`]. Presentation layers
//! (damage popups, health bars, death screens) subscribe to the bus; the
//! core never knows who is listening.
//!
//! # Delivery Guarantees
//!
//! - **Synchronous**: `emit` runs every listener to completion before it
//!   returns. No event is queued or deferred.
//! - **Ordered**: listeners run in subscription order, and events arrive in
//!   the order the core produced them. A single damage application is always
//!   observed as `DamageTaken`, then `HealthChanged`, then (at most once per
//!   actor lifetime) `ActorDied`.
//! - **Single-threaded**: the bus is not `Send`. All mutation and all
//!   delivery happen on the one logical thread that drives the simulation,
//!   so listeners never observe a torn state.
//!
//! # Example
//!
//! ```
//! use ashpeak_core::event::{CombatEvent, EventBus, EventLog};
//!
//! let mut bus = EventBus::new();
//! let log = EventLog::attach(&mut bus);
//!
//! bus.emit(&CombatEvent::CombatEnded);
//!
//! assert_eq!(log.take(), vec![CombatEvent::CombatEnded]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorKind};

// =============================================================================
// Events
// =============================================================================

/// Notification emitted by the combat core.
///
/// Variants mirror the external interface of the simulation: lifecycle
/// events come from the engine, per-actor events from [`ActorHealth`]
/// operations.
///
/// [`ActorHealth`]: crate::actor::ActorHealth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A combat session began between the two actors.
    CombatStarted {
        /// The player participant.
        player: ActorId,
        /// The enemy participant.
        enemy: ActorId,
    },
    /// The active combat session ended (victory, defeat, or cancellation).
    CombatEnded,
    /// An attacker's turn resolved and damage was dealt to its opponent.
    DamageDealt {
        /// Damage amount applied this turn.
        amount: f32,
        /// Which side attacked. `ActorKind::Player` means the player struck
        /// the enemy.
        attacker: ActorKind,
    },
    /// An actor absorbed damage.
    DamageTaken {
        /// The actor that was hit.
        actor: ActorId,
        /// Damage amount requested (before clamping at zero health).
        amount: f32,
    },
    /// An actor's health value changed (damage, healing, max-health change,
    /// spawn, or revival).
    HealthChanged {
        /// The actor whose health changed.
        actor: ActorId,
        /// Current health after the change.
        hp: f32,
        /// Maximum health after the change.
        max_hp: f32,
    },
    /// An actor's health first reached zero. Fired exactly once per life.
    ActorDied {
        /// The fallen actor.
        actor: ActorId,
    },
}

impl CombatEvent {
    /// Returns the actor a per-instance event pertains to.
    ///
    /// Lifecycle events (`CombatStarted`, `CombatEnded`, `DamageDealt`)
    /// concern the session rather than a single actor and return `None`.
    #[must_use]
    pub const fn concerns(&self) -> Option<ActorId> {
        match self {
            Self::DamageTaken { actor, .. }
            | Self::HealthChanged { actor, .. }
            | Self::ActorDied { actor } => Some(*actor),
            Self::CombatStarted { .. } | Self::CombatEnded | Self::DamageDealt { .. } => None,
        }
    }
}

// =============================================================================
// Event Bus
// =============================================================================

/// Handle identifying a subscription on an [`EventBus`].
///
/// Returned by [`EventBus::subscribe`]; pass it to [`EventBus::unsubscribe`]
/// to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener:{}", self.0)
    }
}

/// Ordered, synchronous subscriber registry for [`CombatEvent`]s.
///
/// The bus is the one seam between the core and its observers. The core
/// emits; listeners react inside the same call. Listeners receive events by
/// reference and cannot reach back into the simulation, which rules out
/// re-entrant mutation during delivery.
pub struct EventBus {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&CombatEvent)>)>,
    next_id: u64,
}

impl EventBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a listener. Listeners are invoked in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detaches a listener. Returns true if the id was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Delivers an event to every listener, in subscription order, before
    /// returning.
    pub fn emit(&mut self, event: &CombatEvent) {
        tracing::trace!(?event, "emit");
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Returns the number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("[{} listeners]", self.listeners.len()))
            .field("next_id", &self.next_id)
            .finish()
    }
}

// =============================================================================
// Event Log
// =============================================================================

/// Recording subscriber with a drainable buffer.
///
/// Attach one to a bus and every event emitted afterwards is captured in
/// order. Typical uses: test assertions, replay capture, and telemetry.
/// Cloning the log clones the handle, not the buffer — all clones drain the
/// same storage.
///
/// The buffer is shared through `Rc<RefCell<_>>`; the simulation is
/// single-threaded by contract, so no lock is involved.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    buf: Rc<RefCell<Vec<CombatEvent>>>,
}

impl EventLog {
    /// Creates a log and subscribes it to the given bus.
    #[must_use]
    pub fn attach(bus: &mut EventBus) -> Self {
        let log = Self::default();
        let buf = Rc::clone(&log.buf);
        bus.subscribe(move |event| buf.borrow_mut().push(event.clone()));
        log
    }

    /// Drains and returns all recorded events, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<CombatEvent> {
        std::mem::take(&mut *self.buf.borrow_mut())
    }

    /// Returns the number of events currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// Returns true if no events are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    /// Discards all recorded events without returning them.
    pub fn clear(&self) {
        self.buf.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> ActorId {
        ActorId::new(n)
    }

    mod bus_tests {
        use super::*;

        #[test]
        fn emit_reaches_every_listener() {
            let mut bus = EventBus::new();
            let a = EventLog::attach(&mut bus);
            let b = EventLog::attach(&mut bus);

            bus.emit(&CombatEvent::CombatEnded);

            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
        }

        #[test]
        fn listeners_run_in_subscription_order() {
            let order = Rc::new(RefCell::new(Vec::new()));
            let mut bus = EventBus::new();

            let first = Rc::clone(&order);
            bus.subscribe(move |_| first.borrow_mut().push("first"));
            let second = Rc::clone(&order);
            bus.subscribe(move |_| second.borrow_mut().push("second"));

            bus.emit(&CombatEvent::CombatEnded);

            assert_eq!(*order.borrow(), vec!["first", "second"]);
        }

        #[test]
        fn unsubscribe_detaches_listener() {
            let mut bus = EventBus::new();
            let log = EventLog::attach(&mut bus);
            let doomed = Rc::new(RefCell::new(0_u32));
            let counter = Rc::clone(&doomed);
            let id = bus.subscribe(move |_| *counter.borrow_mut() += 1);

            assert!(bus.unsubscribe(id));
            assert!(!bus.unsubscribe(id));

            bus.emit(&CombatEvent::CombatEnded);

            assert_eq!(*doomed.borrow(), 0);
            assert_eq!(log.len(), 1);
            assert_eq!(bus.listener_count(), 1);
        }

        #[test]
        fn emit_with_no_listeners_is_fine() {
            let mut bus = EventBus::new();
            bus.emit(&CombatEvent::CombatEnded);
            assert_eq!(bus.listener_count(), 0);
        }
    }

    mod log_tests {
        use super::*;

        #[test]
        fn take_drains_in_order() {
            let mut bus = EventBus::new();
            let log = EventLog::attach(&mut bus);

            bus.emit(&CombatEvent::DamageTaken {
                actor: id(1),
                amount: 10.0,
            });
            bus.emit(&CombatEvent::HealthChanged {
                actor: id(1),
                hp: 90.0,
                max_hp: 100.0,
            });

            let events = log.take();
            assert_eq!(events.len(), 2);
            assert!(matches!(events[0], CombatEvent::DamageTaken { .. }));
            assert!(matches!(events[1], CombatEvent::HealthChanged { .. }));

            // Log is empty after draining.
            assert!(log.is_empty());
            assert!(log.take().is_empty());
        }

        #[test]
        fn clear_empties_log() {
            let mut bus = EventBus::new();
            let log = EventLog::attach(&mut bus);

            bus.emit(&CombatEvent::CombatEnded);
            assert!(!log.is_empty());

            log.clear();
            assert!(log.is_empty());
        }

        #[test]
        fn clones_share_the_buffer() {
            let mut bus = EventBus::new();
            let log = EventLog::attach(&mut bus);
            let other = log.clone();

            bus.emit(&CombatEvent::CombatEnded);

            assert_eq!(other.len(), 1);
            other.take();
            assert!(log.is_empty());
        }
    }

    mod event_tests {
        use super::*;

        #[test]
        fn concerns_names_per_actor_events() {
            assert_eq!(
                CombatEvent::DamageTaken {
                    actor: id(7),
                    amount: 1.0
                }
                .concerns(),
                Some(id(7))
            );
            assert_eq!(CombatEvent::ActorDied { actor: id(7) }.concerns(), Some(id(7)));
            assert_eq!(CombatEvent::CombatEnded.concerns(), None);
            assert_eq!(
                CombatEvent::DamageDealt {
                    amount: 5.0,
                    attacker: ActorKind::Player
                }
                .concerns(),
                None
            );
        }

        #[test]
        fn events_round_trip_through_serde() {
            let event = CombatEvent::HealthChanged {
                actor: id(3),
                hp: 42.0,
                max_hp: 100.0,
            };
            let json = serde_json::to_string(&event).unwrap();
            let back: CombatEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }
}
