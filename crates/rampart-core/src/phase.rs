//! Turn/phase state machine building blocks.
//!
//! The session cycles through three combat phases per turn — towers attack,
//! enemies attack, enemies move — bracketed by the pre-wave building state
//! and the two terminal states. Transitions are evaluated once per tick and
//! gated on the presentation layer reporting everything settled; "waiting"
//! is simply not transitioning this tick.
//!
//! Within an attacking phase, entities act one at a time in a fixed order.
//! The order is snapshotted into a [`TurnQueue`] when the phase is entered,
//! so entities spawned mid-phase wait for the next cycle and entities
//! destroyed mid-phase are skipped by a liveness check at dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The session's current phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to start the wave; building is allowed.
    PreWave,
    /// Towers act in order, pausing while projectiles fly.
    TowersAttacking,
    /// Enemies act in order against whatever blocks their path.
    EnemiesAttacking,
    /// Enemies advance toward the defended boundary.
    EnemiesMoving,
    /// All waves cleared. Terminal.
    Victory,
    /// The defense fell. Terminal; only ever entered through
    /// [`crate::session::GameSession::trigger_defeat`].
    GameOver,
}

impl Phase {
    /// True for the two states the session never leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::GameOver)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PreWave => "pre-wave",
            Self::TowersAttacking => "towers-attacking",
            Self::EnemiesAttacking => "enemies-attacking",
            Self::EnemiesMoving => "enemies-moving",
            Self::Victory => "victory",
            Self::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

/// Snapshotted acting order for one phase.
///
/// Every entity in the queue is eligible to act exactly once; the cursor
/// only ever moves forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnQueue<T> {
    order: Vec<T>,
    acting: usize,
}

impl<T: Copy> TurnQueue<T> {
    /// Captures the acting order from an iterator.
    pub fn capture(order: impl Iterator<Item = T>) -> Self {
        Self {
            order: order.collect(),
            acting: 0,
        }
    }

    /// An empty, exhausted queue.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            order: Vec::new(),
            acting: 0,
        }
    }

    /// Takes the next entity slated to act, advancing the cursor.
    pub fn next_actor(&mut self) -> Option<T> {
        let actor = self.order.get(self.acting).copied();
        if actor.is_some() {
            self.acting += 1;
        }
        actor
    }

    /// True once every queued entity has had its slot.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.acting >= self.order.len()
    }
}
