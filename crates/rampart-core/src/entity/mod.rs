//! Entity types of the simulation: enemies, towers and projectiles.
//!
//! Entities are identified by per-kind id newtypes ([`EnemyId`], [`TowerId`],
//! [`ProjectileId`]). Ids are assigned monotonically by the arena and never
//! reused, so holding an id of a destroyed entity is always safe: looking it
//! up simply yields `None`. This replaces the "scan the list to confirm the
//! pointer is still valid" pattern with an O(1) liveness check.
//!
//! Every enemy and tower also carries an [`ActionState`]: the read-only
//! signal the presentation layer maps to animations. The core writes it when
//! it dispatches an action and otherwise ignores it; pacing decisions flow
//! back in through [`crate::gate::SettleGate`].

pub mod enemy;
pub mod projectile;
pub mod tower;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use enemy::{Enemy, EnemyKind};
pub use projectile::{Flight, Projectile};
pub use tower::{Tower, TowerKind};

/// Unique identifier for an enemy.
///
/// Ids are ordered by their numeric value, which doubles as spawn order and
/// as the deterministic iteration order of the arena's enemy table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Creates an `EnemyId` from a raw `u64` value.
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

impl fmt::Debug for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnemyId({})", self.0)
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a tower.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TowerId(u64);

impl TowerId {
    /// Creates a `TowerId` from a raw `u64` value.
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

impl fmt::Debug for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TowerId({})", self.0)
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an in-flight projectile.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Creates a `ProjectileId` from a raw `u64` value.
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

impl fmt::Debug for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectileId({})", self.0)
    }
}

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation signal describing the action an entity last performed.
///
/// The core sets this when it dispatches an action; the presentation layer
/// reads it to start the matching animation and answers through
/// [`crate::gate::SettleGate`] once the animation has played out. The
/// simulation itself never branches on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionState {
    /// At rest. The default after any action completes.
    Idle,
    /// Moved by the given tile delta during the last movement dispatch.
    Moving {
        /// Signed column displacement of the move.
        d_column: i32,
        /// Signed row displacement of the move.
        d_row: i32,
    },
    /// Performed an attack this phase.
    Attacking,
    /// Took damage from the latest resolution.
    Hurt,
}

impl ActionState {
    /// Returns true for the resting state.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for ActionState {
    fn default() -> Self {
        Self::Idle
    }
}
