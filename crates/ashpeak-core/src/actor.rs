//! Actor identity, stats, and status flags.
//!
//! This module provides the building blocks for combat participants:
//! - [`ActorId`]: unique identifier for actors
//! - [`ActorKind`]: which side of an encounter an actor fights on
//! - [`ActorStats`]: validated spawn-time statistics
//! - [`StatusFlags`]: sticky status bits, currently just `DEAD`
//! - [`ActorHealth`]: the mutable per-combatant health record (in
//!   [`health`])
//!
//! # Example
//!
//! ```
//! use ashpeak_core::actor::{ActorHealth, ActorId, ActorKind, ActorStats};
//!
//! let stats = ActorStats::new(300.0, 150.0).unwrap();
//! let enemy = ActorHealth::new(ActorId::new(1), ActorKind::Enemy, stats);
//!
//! assert_eq!(enemy.hp(), 300.0);
//! assert!(!enemy.is_dead());
//! ```

pub mod health;

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use health::ActorHealth;

use crate::event::EventBus;

/// Unique identifier for an actor.
///
/// `ActorId` is a newtype wrapper around `u64`. Ids are assigned at spawn
/// time, are immutable, and must be unique within a [`Roster`]. Their
/// numeric ordering gives the roster a deterministic iteration order.
///
/// [`Roster`]: crate::roster::Roster
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates an `ActorId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

/// Which side of an encounter an actor fights on.
///
/// The turn sequencer alternates between the two kinds, and
/// [`CombatEvent::DamageDealt`] attributes each strike to one of them.
///
/// [`CombatEvent::DamageDealt`]: crate::event::CombatEvent::DamageDealt
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player character.
    Player,
    /// An enemy combatant.
    Enemy,
}

impl ActorKind {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
        }
    }
}

bitflags! {
    /// Sticky status bits for an actor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
    pub struct StatusFlags: u8 {
        /// Set exactly once when health first reaches zero. Cleared only by
        /// an explicit revive.
        const DEAD = 1 << 0;
    }
}

/// Validation failure for actor statistics.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// Maximum health must be positive and finite.
    #[error("max health must be positive and finite, got {0}")]
    InvalidMaxHealth(f32),
    /// Attack damage must be non-negative and finite.
    #[error("attack damage must be non-negative and finite, got {0}")]
    InvalidAttackDamage(f32),
}

/// Spawn-time statistics for an actor, validated at construction.
///
/// # Example
///
/// ```
/// use ashpeak_core::actor::ActorStats;
///
/// let stats = ActorStats::new(2000.0, 150.0).unwrap();
/// assert_eq!(stats.max_hp, 2000.0);
///
/// assert!(ActorStats::new(0.0, 150.0).is_err());
/// assert!(ActorStats::new(100.0, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    /// Maximum (and starting) health.
    pub max_hp: f32,
    /// Damage dealt on this actor's turn.
    pub attack_damage: f32,
}

impl ActorStats {
    /// Creates validated stats.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidMaxHealth`] unless `max_hp` is positive
    /// and finite, and [`StatsError::InvalidAttackDamage`] unless
    /// `attack_damage` is non-negative and finite.
    pub fn new(max_hp: f32, attack_damage: f32) -> Result<Self, StatsError> {
        if !max_hp.is_finite() || max_hp <= 0.0 {
            return Err(StatsError::InvalidMaxHealth(max_hp));
        }
        if !attack_damage.is_finite() || attack_damage < 0.0 {
            return Err(StatsError::InvalidAttackDamage(attack_damage));
        }
        Ok(Self {
            max_hp,
            attack_damage,
        })
    }
}

/// Presentation-layer hook invoked when an actor falls.
///
/// Registered on the [`Roster`]; damage routed through
/// [`Roster::apply_damage`] calls it after the minimal
/// [`CombatEvent::ActorDied`] notification has been emitted. Implementations
/// may emit further events on the bus (a death-screen cue, say) but the core
/// attaches no behavior of its own.
///
/// [`Roster`]: crate::roster::Roster
/// [`Roster::apply_damage`]: crate::roster::Roster::apply_damage
/// [`CombatEvent::ActorDied`]: crate::event::CombatEvent::ActorDied
pub trait DeathHandler {
    /// Called once per death, with the fallen actor's final record.
    fn on_death(&mut self, actor: &ActorHealth, events: &mut EventBus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_ordering_follows_raw_value() {
        assert!(ActorId::new(1) < ActorId::new(2));
        assert_eq!(ActorId::new(7).as_u64(), 7);
        assert_eq!(u64::from(ActorId::new(9)), 9);
        assert_eq!(ActorId::from(3), ActorId::new(3));
    }

    #[test]
    fn opponent_flips_side() {
        assert_eq!(ActorKind::Player.opponent(), ActorKind::Enemy);
        assert_eq!(ActorKind::Enemy.opponent(), ActorKind::Player);
    }

    #[test]
    fn stats_validation_rejects_bad_values() {
        assert!(ActorStats::new(100.0, 0.0).is_ok());
        assert_eq!(
            ActorStats::new(0.0, 10.0),
            Err(StatsError::InvalidMaxHealth(0.0))
        );
        assert_eq!(
            ActorStats::new(-5.0, 10.0),
            Err(StatsError::InvalidMaxHealth(-5.0))
        );
        assert!(ActorStats::new(f32::NAN, 10.0).is_err());
        assert!(ActorStats::new(f32::INFINITY, 10.0).is_err());
        assert_eq!(
            ActorStats::new(100.0, -1.0),
            Err(StatsError::InvalidAttackDamage(-1.0))
        );
        assert!(ActorStats::new(100.0, f32::NAN).is_err());
    }

    #[test]
    fn stats_error_messages_name_the_value() {
        let err = ActorStats::new(0.0, 10.0).unwrap_err();
        assert!(err.to_string().contains("max health"));
        let err = ActorStats::new(100.0, -2.0).unwrap_err();
        assert!(err.to_string().contains("attack damage"));
    }

    #[test]
    fn status_flags_default_empty() {
        let flags = StatusFlags::default();
        assert!(!flags.contains(StatusFlags::DEAD));
    }
}
