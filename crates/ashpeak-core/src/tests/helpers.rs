//! Test setup utilities shared by the integration and property tests.

use crate::actor::{ActorId, ActorKind, ActorStats};
use crate::config::CombatConfig;
use crate::engine::CombatEngine;
use crate::event::{CombatEvent, EventBus, EventLog};
use crate::roster::Roster;

/// Everything a scripted encounter needs, wired together.
pub struct Duel {
    pub roster: Roster,
    pub bus: EventBus,
    pub log: EventLog,
    pub engine: CombatEngine,
    pub player: ActorId,
    pub enemy: ActorId,
}

/// Builds a roster with one player and one enemy, an attached log, and an
/// engine with the given pacing delay. The spawn-time `HealthChanged`
/// broadcasts are cleared so tests start from a quiet log.
pub fn duel(player: (f32, f32), enemy: (f32, f32), turn_delay: f32) -> Duel {
    let mut roster = Roster::new();
    let mut bus = EventBus::new();
    let log = EventLog::attach(&mut bus);

    let player = roster.spawn(
        ActorKind::Player,
        ActorStats::new(player.0, player.1).unwrap(),
        &mut bus,
    );
    let enemy = roster.spawn(
        ActorKind::Enemy,
        ActorStats::new(enemy.0, enemy.1).unwrap(),
        &mut bus,
    );
    log.clear();

    Duel {
        roster,
        bus,
        log,
        engine: CombatEngine::new(CombatConfig::with_turn_delay(turn_delay)),
        player,
        enemy,
    }
}

impl Duel {
    pub fn start(&mut self) {
        self.engine
            .start_combat(&self.roster, &mut self.bus, self.player, self.enemy);
    }

    /// Ticks with a fixed step until the session resolves itself, with a
    /// cap so a broken sequencer cannot hang the suite.
    pub fn run_to_completion(&mut self, dt: f32) {
        let mut ticks = 0;
        while self.engine.is_in_combat() {
            self.engine.tick(&mut self.roster, &mut self.bus, dt);
            ticks += 1;
            assert!(ticks < 100_000, "combat did not terminate");
        }
    }

    pub fn player_hp(&self) -> f32 {
        self.roster.get(self.player).map_or(0.0, |a| a.hp())
    }

    pub fn enemy_hp(&self) -> f32 {
        self.roster.get(self.enemy).map_or(0.0, |a| a.hp())
    }
}

/// Extracts the attacker of every `DamageDealt` event, in order.
pub fn dealt_sequence(events: &[CombatEvent]) -> Vec<ActorKind> {
    events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::DamageDealt { attacker, .. } => Some(*attacker),
            _ => None,
        })
        .collect()
}

/// Counts events matching a predicate.
pub fn count_where(events: &[CombatEvent], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
