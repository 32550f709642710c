//! The per-combatant health record.
//!
//! [`ActorHealth`] is a pure state holder: it knows nothing about combat
//! sessions or turn order. Whichever system needs an actor's health observes
//! it here, and every mutation announces itself on the [`EventBus`] before
//! the call returns.
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp` after every operation.
//! - The `DEAD` flag is set exactly once, when `hp` first reaches zero, and
//!   stays set until [`ActorHealth::revive`]. While it is set,
//!   [`ActorHealth::take_damage`] is a no-op.
//! - Notification order for one damage application is `DamageTaken`, then
//!   `HealthChanged`, then — on the dead transition only — `ActorDied`.

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorKind, ActorStats, StatsError, StatusFlags};
use crate::event::{CombatEvent, EventBus};

/// Mutable health record for one combat participant.
///
/// Created when the owning actor spawns (health starts full) and destroyed
/// with it. Fields are private; external code mutates the record only
/// through its public operations, which keep the invariants above and fire
/// the corresponding notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorHealth {
    id: ActorId,
    kind: ActorKind,
    hp: f32,
    max_hp: f32,
    attack_damage: f32,
    flags: StatusFlags,
}

impl ActorHealth {
    /// Creates a record with full health.
    #[must_use]
    pub fn new(id: ActorId, kind: ActorKind, stats: ActorStats) -> Self {
        Self {
            id,
            kind,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            attack_damage: stats.attack_damage,
            flags: StatusFlags::empty(),
        }
    }

    /// This actor's identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Which side this actor fights on.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Current health, in `[0, max_hp]`.
    #[must_use]
    pub const fn hp(&self) -> f32 {
        self.hp
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_hp(&self) -> f32 {
        self.max_hp
    }

    /// Damage this actor deals on its turn.
    #[must_use]
    pub const fn attack_damage(&self) -> f32 {
        self.attack_damage
    }

    /// True once health has reached zero, until an explicit revive.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.flags.contains(StatusFlags::DEAD)
    }

    /// True while the actor can still take part in a combat turn.
    ///
    /// Distinct from `!is_dead()`: a dead actor healed back above zero
    /// health stays non-viable until revived.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dead() && self.hp > 0.0
    }

    /// Applies damage, clamping health at zero.
    ///
    /// No-op when already dead. Fires `DamageTaken` then `HealthChanged`;
    /// on the transition to zero health, marks the actor dead and fires
    /// `ActorDied` exactly once.
    ///
    /// Returns true if this call killed the actor.
    pub fn take_damage(&mut self, amount: f32, events: &mut EventBus) -> bool {
        debug_assert!(amount >= 0.0, "damage amount must be non-negative");
        if self.is_dead() {
            return false;
        }

        let amount = amount.max(0.0);
        self.hp = (self.hp - amount).max(0.0);

        events.emit(&CombatEvent::DamageTaken {
            actor: self.id,
            amount,
        });
        events.emit(&CombatEvent::HealthChanged {
            actor: self.id,
            hp: self.hp,
            max_hp: self.max_hp,
        });

        if self.hp <= 0.0 {
            self.die(events);
            return true;
        }
        false
    }

    /// Restores health, capped at the maximum.
    ///
    /// Always fires `HealthChanged`, even when health was already full.
    /// Healing never clears the dead state; see [`ActorHealth::revive`].
    pub fn heal(&mut self, amount: f32, events: &mut EventBus) {
        debug_assert!(amount >= 0.0, "heal amount must be non-negative");
        self.hp = (self.hp + amount.max(0.0)).min(self.max_hp);
        events.emit(&CombatEvent::HealthChanged {
            actor: self.id,
            hp: self.hp,
            max_hp: self.max_hp,
        });
    }

    /// Changes the maximum health, clamping current health downward if it
    /// now exceeds the new maximum. Fires one `HealthChanged`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidMaxHealth`] unless `new_max` is positive
    /// and finite; the record is untouched on error.
    pub fn set_max_hp(&mut self, new_max: f32, events: &mut EventBus) -> Result<(), StatsError> {
        if !new_max.is_finite() || new_max <= 0.0 {
            return Err(StatsError::InvalidMaxHealth(new_max));
        }
        self.max_hp = new_max;
        self.hp = self.hp.min(new_max);
        events.emit(&CombatEvent::HealthChanged {
            actor: self.id,
            hp: self.hp,
            max_hp: self.max_hp,
        });
        Ok(())
    }

    /// Changes the damage this actor deals on its turn.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidAttackDamage`] unless `amount` is
    /// non-negative and finite.
    pub fn set_attack_damage(&mut self, amount: f32) -> Result<(), StatsError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(StatsError::InvalidAttackDamage(amount));
        }
        self.attack_damage = amount;
        Ok(())
    }

    /// Clears the dead state and restores full health. Fires
    /// `HealthChanged`.
    ///
    /// This is the only way back from death; used by respawn logic.
    pub fn revive(&mut self, events: &mut EventBus) {
        self.flags.remove(StatusFlags::DEAD);
        self.hp = self.max_hp;
        events.emit(&CombatEvent::HealthChanged {
            actor: self.id,
            hp: self.hp,
            max_hp: self.max_hp,
        });
    }

    /// Marks the actor dead, at most once per life.
    fn die(&mut self, events: &mut EventBus) {
        if self.flags.contains(StatusFlags::DEAD) {
            return;
        }
        self.flags.insert(StatusFlags::DEAD);
        tracing::debug!(actor = %self.id, kind = %self.kind, "actor fell");
        events.emit(&CombatEvent::ActorDied { actor: self.id });
    }
}
