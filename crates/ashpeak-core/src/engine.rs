//! Combat lifecycle and the turn-sequencing state machine.
//!
//! The [`CombatEngine`] owns at most one combat session at a time and
//! drives it through an explicit state machine stepped by
//! [`CombatEngine::tick`]. Each turn is split into phases so the host's
//! scheduler (a frame loop, a test, a fixed-step driver) owns the clock:
//!
//! - **Strike**: the acting side's attack lands. Damage, the resulting
//!   health notifications, and `DamageDealt` are all delivered synchronously
//!   inside one tick — observers never see an intermediate state.
//! - **Recover**: the pacing delay counts down across ticks so presentation
//!   layers can animate the hit. On expiry the defender's death check runs;
//!   either combat ends or the turn passes to the other side.
//!
//! Every tick begins with a boundary check: if either participant has been
//! destroyed out-of-band (its id no longer resolves) or has fallen (death
//! flag or zero health — damage-over-time may land between turns), the
//! session ends cleanly. The engine never panics and never returns an error
//! from the turn loop.
//!
//! # Cancellation
//!
//! [`CombatEngine::end_combat`] is the only cancellation entry point.
//! Dropping the session discards the pacing countdown with it, and because
//! turn logic only ever runs inside `tick`, no queued continuation can fire
//! afterwards.
//!
//! # Example
//!
//! ```
//! use ashpeak_core::actor::{ActorKind, ActorStats};
//! use ashpeak_core::config::CombatConfig;
//! use ashpeak_core::engine::{CombatEngine, CombatState};
//! use ashpeak_core::event::EventBus;
//! use ashpeak_core::roster::Roster;
//!
//! let mut roster = Roster::new();
//! let mut bus = EventBus::new();
//! let mut engine = CombatEngine::new(CombatConfig::default());
//!
//! let player = roster.spawn(ActorKind::Player, ActorStats::new(2000.0, 150.0).unwrap(), &mut bus);
//! let enemy = roster.spawn(ActorKind::Enemy, ActorStats::new(300.0, 1000.0).unwrap(), &mut bus);
//!
//! engine.start_combat(&roster, &mut bus, player, enemy);
//! assert_eq!(engine.state(), CombatState::PlayerTurn);
//!
//! // Drive the encounter with a 60 Hz step until it resolves itself.
//! while engine.is_in_combat() {
//!     engine.tick(&mut roster, &mut bus, 1.0 / 60.0);
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorHealth, ActorId, ActorKind};
use crate::config::CombatConfig;
use crate::event::{CombatEvent, EventBus};
use crate::roster::Roster;

// =============================================================================
// Combat State
// =============================================================================

/// Public view of the engine's state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    /// No combat session is active.
    Idle,
    /// A session is active and the player side acts.
    PlayerTurn,
    /// A session is active and the enemy side acts.
    EnemyTurn,
}

impl fmt::Display for CombatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::PlayerTurn => write!(f, "PlayerTurn"),
            Self::EnemyTurn => write!(f, "EnemyTurn"),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Phase of the acting side's turn.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TurnPhase {
    /// The attack has not landed yet; the next tick resolves it.
    Strike,
    /// The pacing delay is counting down, in seconds.
    Recover { remaining: f32 },
}

/// One player-vs-enemy encounter. Exists iff combat is active, so an idle
/// engine cannot hold stale actor handles by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Session {
    player: ActorId,
    enemy: ActorId,
    turn: ActorKind,
    phase: TurnPhase,
}

impl Session {
    /// Returns `(attacker, defender)` for the current turn.
    fn pairing(self) -> (ActorId, ActorId) {
        match self.turn {
            ActorKind::Player => (self.player, self.enemy),
            ActorKind::Enemy => (self.enemy, self.player),
        }
    }
}

// =============================================================================
// Combat Engine
// =============================================================================

/// Owns the combat lifecycle: starting and ending encounters, alternating
/// turns, applying damage, and emitting lifecycle notifications.
///
/// The engine is a plain value with no global registration; the composition
/// root constructs one and passes it to whatever trigger code needs it
/// (collision handlers, scripted encounters). Holding exactly one engine is
/// what makes the one-session-at-a-time guarantee process-wide.
#[derive(Debug)]
pub struct CombatEngine {
    config: CombatConfig,
    session: Option<Session>,
}

impl CombatEngine {
    /// Creates an idle engine with the given pacing configuration.
    #[must_use]
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// The pacing configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> CombatConfig {
        self.config
    }

    /// True iff a combat session is active.
    #[must_use]
    pub fn is_in_combat(&self) -> bool {
        self.session.is_some()
    }

    /// Current state of the turn machine.
    #[must_use]
    pub fn state(&self) -> CombatState {
        match &self.session {
            None => CombatState::Idle,
            Some(session) => match session.turn {
                ActorKind::Player => CombatState::PlayerTurn,
                ActorKind::Enemy => CombatState::EnemyTurn,
            },
        }
    }

    /// The `(player, enemy)` pair of the active session, if any.
    #[must_use]
    pub fn participants(&self) -> Option<(ActorId, ActorId)> {
        self.session.map(|s| (s.player, s.enemy))
    }

    /// Starts an encounter between the two actors, player side first.
    ///
    /// Ignored (with a diagnostic log) if a session is already active —
    /// starting a new combat with a previous one unfinished is never
    /// allowed — or if either id does not resolve to a living actor.
    /// On success emits `CombatStarted` and arms the sequencer; the first
    /// strike lands on the next [`CombatEngine::tick`].
    pub fn start_combat(
        &mut self,
        roster: &Roster,
        events: &mut EventBus,
        player: ActorId,
        enemy: ActorId,
    ) {
        if self.session.is_some() {
            tracing::debug!(%player, %enemy, "start_combat ignored: already in combat");
            return;
        }
        if Self::is_down(roster, player) || Self::is_down(roster, enemy) {
            tracing::debug!(%player, %enemy, "start_combat ignored: participant missing or fallen");
            return;
        }

        self.session = Some(Session {
            player,
            enemy,
            turn: ActorKind::Player,
            phase: TurnPhase::Strike,
        });
        tracing::info!(%player, %enemy, "combat started");
        events.emit(&CombatEvent::CombatStarted { player, enemy });
    }

    /// Ends the active session, cancelling any in-flight pacing delay.
    ///
    /// Emits `CombatEnded` once. Idempotent: calling while idle does
    /// nothing. Safe to call between any two ticks.
    pub fn end_combat(&mut self, events: &mut EventBus) {
        if self.session.take().is_none() {
            return;
        }
        tracing::info!("combat ended");
        events.emit(&CombatEvent::CombatEnded);
    }

    /// Advances the turn machine by `dt` seconds.
    ///
    /// At most one phase transition happens per call, which is what
    /// guarantees exactly one `DamageDealt` per pacing window regardless of
    /// how coarse the caller's step is (or how short the configured delay).
    /// No-op while idle. Never panics on missing or fallen actors; those
    /// end the session cleanly instead.
    pub fn tick(&mut self, roster: &mut Roster, events: &mut EventBus, dt: f32) {
        let Some(mut session) = self.session else {
            return;
        };

        // Session fault: a participant was destroyed out-of-band.
        if !roster.contains(session.player) || !roster.contains(session.enemy) {
            tracing::warn!(
                player = %session.player,
                enemy = %session.enemy,
                "combat participant no longer exists, ending combat"
            );
            self.end_combat(events);
            return;
        }

        // Boundary check: damage may have landed between turns
        // (damage-over-time, scripted hits), so read authoritative state
        // before doing anything else.
        if Self::is_down(roster, session.player) || Self::is_down(roster, session.enemy) {
            self.end_combat(events);
            return;
        }

        match session.phase {
            TurnPhase::Strike => {
                let (attacker, defender) = session.pairing();
                let Some(amount) = roster.get(attacker).map(ActorHealth::attack_damage) else {
                    // Unreachable after the checks above; treat as a fault.
                    self.end_combat(events);
                    return;
                };

                roster.apply_damage(defender, amount, events);
                events.emit(&CombatEvent::DamageDealt {
                    amount,
                    attacker: session.turn,
                });
                tracing::debug!(attacker = %session.turn, amount, "turn resolved");

                session.phase = TurnPhase::Recover {
                    remaining: self.config.turn_delay,
                };
            }
            TurnPhase::Recover { remaining } => {
                let remaining = (remaining - dt.max(0.0)).max(0.0);
                if remaining > 0.0 {
                    session.phase = TurnPhase::Recover { remaining };
                } else {
                    let (_, defender) = session.pairing();
                    if Self::is_down(roster, defender) {
                        self.end_combat(events);
                        return;
                    }
                    session.turn = session.turn.opponent();
                    session.phase = TurnPhase::Strike;
                }
            }
        }

        self.session = Some(session);
    }

    /// True unless the id resolves to an actor that can still fight.
    fn is_down(roster: &Roster, id: ActorId) -> bool {
        !roster.get(id).is_some_and(ActorHealth::is_alive)
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
