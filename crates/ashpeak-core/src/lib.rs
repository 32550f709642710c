//! # Ashpeak Core
//!
//! Turn-based combat core simulation for Ashpeak.
//!
//! This crate provides the deterministic encounter engine: a state machine
//! that alternates control between a player actor and an enemy actor,
//! sequences timed attack resolution, and propagates health and damage
//! changes to observers. Rendering, input, audio, and persistence live in
//! the host application and only see this core through its event stream.
//!
//! ## Architecture
//!
//! - **Actors** ([`actor`]): per-combatant health records with damage, heal,
//!   and death semantics
//! - **Roster** ([`roster`]): the owning actor store the engine addresses
//!   by id
//! - **Engine** ([`engine`]): combat lifecycle and the tick-stepped turn
//!   sequencer
//! - **Events** ([`event`]): synchronous, ordered notifications consumed by
//!   presentation layers
//!
//! ## Usage
//!
//! ```
//! use ashpeak_core::{ActorKind, ActorStats, CombatConfig, CombatEngine, EventBus, EventLog, Roster};
//!
//! let mut roster = Roster::new();
//! let mut bus = EventBus::new();
//! let log = EventLog::attach(&mut bus);
//! let mut engine = CombatEngine::new(CombatConfig::with_turn_delay(0.5));
//!
//! let player = roster.spawn(ActorKind::Player, ActorStats::new(2000.0, 150.0).unwrap(), &mut bus);
//! let enemy = roster.spawn(ActorKind::Enemy, ActorStats::new(300.0, 1000.0).unwrap(), &mut bus);
//!
//! engine.start_combat(&roster, &mut bus, player, enemy);
//! while engine.is_in_combat() {
//!     engine.tick(&mut roster, &mut bus, 0.1);
//! }
//!
//! // The encounter resolved itself; the log holds the full story.
//! assert!(!log.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod config;
pub mod engine;
pub mod event;
pub mod roster;

pub use actor::{ActorHealth, ActorId, ActorKind, ActorStats, DeathHandler, StatsError, StatusFlags};
pub use config::CombatConfig;
pub use engine::{CombatEngine, CombatState};
pub use event::{CombatEvent, EventBus, EventLog, ListenerId};
pub use roster::Roster;

#[cfg(test)]
mod tests;
