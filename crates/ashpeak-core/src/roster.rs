//! Owning store for actor health records.
//!
//! The [`Roster`] is the container every other part of the core addresses
//! actors through. It provides:
//! - Record storage with deterministic iteration order (`BTreeMap`)
//! - Actor lifecycle management (spawn/despawn)
//! - The damage entry point that runs the death procedure
//!
//! The combat engine never holds a reference into the roster; it keeps
//! [`ActorId`]s and resolves them each tick. An id that no longer resolves
//! is how an out-of-band actor destruction shows up to the rest of the core.

use std::collections::BTreeMap;
use std::fmt;

use crate::actor::{ActorHealth, ActorId, ActorKind, ActorStats, DeathHandler};
use crate::event::{CombatEvent, EventBus};

/// Owning container for every live [`ActorHealth`] record.
///
/// Ids are monotonically increasing and never reused within one roster, so
/// a stale id held across a despawn can never silently alias a new actor.
///
/// # Example
///
/// ```
/// use ashpeak_core::actor::{ActorKind, ActorStats};
/// use ashpeak_core::event::EventBus;
/// use ashpeak_core::roster::Roster;
///
/// let mut roster = Roster::new();
/// let mut bus = EventBus::new();
///
/// let stats = ActorStats::new(300.0, 150.0).unwrap();
/// let enemy = roster.spawn(ActorKind::Enemy, stats, &mut bus);
///
/// assert_eq!(roster.get(enemy).unwrap().hp(), 300.0);
/// ```
pub struct Roster {
    /// Records in id order. `BTreeMap` keeps iteration deterministic.
    actors: BTreeMap<ActorId, ActorHealth>,
    /// Next id to assign.
    next_id: u64,
    /// Optional presentation hook for deaths, see [`Roster::apply_damage`].
    death_handler: Option<Box<dyn DeathHandler>>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            next_id: 0,
            death_handler: None,
        }
    }

    /// Spawns an actor with full health and returns its id.
    ///
    /// Broadcasts the initial `HealthChanged` so freshly attached observers
    /// (health bars) see the starting value without polling.
    pub fn spawn(&mut self, kind: ActorKind, stats: ActorStats, events: &mut EventBus) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;

        let actor = ActorHealth::new(id, kind, stats);
        tracing::debug!(actor = %id, %kind, max_hp = stats.max_hp, "spawned actor");
        self.actors.insert(id, actor);

        events.emit(&CombatEvent::HealthChanged {
            actor: id,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
        });
        id
    }

    /// Removes an actor, returning its final record if it existed.
    pub fn despawn(&mut self, id: ActorId) -> Option<ActorHealth> {
        let removed = self.actors.remove(&id);
        if removed.is_some() {
            tracing::debug!(actor = %id, "despawned actor");
        }
        removed
    }

    /// Returns a reference to an actor's record.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&ActorHealth> {
        self.actors.get(&id)
    }

    /// Returns a mutable reference to an actor's record.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorHealth> {
        self.actors.get_mut(&id)
    }

    /// True if the id resolves to a live record.
    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True if no actors are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterates records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorHealth> {
        self.actors.values()
    }

    /// Registers the presentation hook invoked when damage applied through
    /// [`Roster::apply_damage`] kills an actor. Replaces any previous hook.
    pub fn set_death_handler(&mut self, handler: Box<dyn DeathHandler>) {
        self.death_handler = Some(handler);
    }

    /// Removes the registered death hook, if any.
    pub fn clear_death_handler(&mut self) {
        self.death_handler = None;
    }

    /// Applies damage to an actor and, if the hit was fatal, invokes the
    /// registered [`DeathHandler`] after the `ActorDied` notification.
    ///
    /// This is the path all combat damage takes. Damage to an unknown id is
    /// ignored, mirroring the rest of the core's treatment of stale ids.
    ///
    /// Returns true if this call killed the actor.
    pub fn apply_damage(&mut self, id: ActorId, amount: f32, events: &mut EventBus) -> bool {
        let Some(actor) = self.actors.get_mut(&id) else {
            return false;
        };
        let died = actor.take_damage(amount, events);
        if died {
            if let Some(handler) = self.death_handler.as_mut() {
                // Lookup again so the handler sees the final record state.
                if let Some(actor) = self.actors.get(&id) {
                    handler.on_death(actor, events);
                }
            }
        }
        died
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roster")
            .field("actors", &self.actors)
            .field("next_id", &self.next_id)
            .field(
                "death_handler",
                &if self.death_handler.is_some() {
                    "Some(..)"
                } else {
                    "None"
                },
            )
            .finish()
    }
}
