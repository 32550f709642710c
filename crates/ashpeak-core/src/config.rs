//! Combat pacing configuration.

use serde::{Deserialize, Serialize};

/// Default pacing delay between turns, in seconds.
pub const DEFAULT_TURN_DELAY: f32 = 2.0;

/// Caller-supplied configuration for a [`CombatEngine`].
///
/// [`CombatEngine`]: crate::engine::CombatEngine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Seconds between an attack landing and the following death check /
    /// turn handover. Exists purely so presentation layers can animate the
    /// hit; the sequencer guarantees one strike per pacing window even at
    /// zero.
    pub turn_delay: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            turn_delay: DEFAULT_TURN_DELAY,
        }
    }
}

impl CombatConfig {
    /// Creates a config with the given pacing delay in seconds.
    #[must_use]
    pub fn with_turn_delay(turn_delay: f32) -> Self {
        Self { turn_delay }
    }
}
