//! In-flight projectiles.
//!
//! A projectile is a weak reference pair: it does not keep its origin tower
//! or target enemy alive, and either may be destroyed by another effect
//! before the projectile resolves. Resolution re-checks both ids against the
//! live tables and silently drops the projectile when a lookup fails.

use serde::{Deserialize, Serialize};

use crate::entity::{EnemyId, ProjectileId, TowerId};
use crate::grid::TilePos;

/// Travel data attached to a projectile.
///
/// Pure presentation pacing information: the simulation records where the
/// shot started, where it was aimed and how fast it flies, and the
/// presentation layer decides when it has visually landed (reported back via
/// [`crate::gate::SettleGate::projectile_landed`]).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Tile the projectile was fired from.
    pub from: TilePos,
    /// Tile of the target at launch time.
    pub to: TilePos,
    /// Tick the projectile was launched on.
    pub launched_at: u64,
    /// Travel speed in tiles per second.
    pub speed: f64,
}

impl Flight {
    /// Manhattan distance of the planned travel, in tiles.
    #[must_use]
    pub const fn distance(&self) -> i32 {
        (self.from.column - self.to.column).abs() + (self.from.row - self.to.row).abs()
    }
}

/// A projectile travelling from a tower toward an enemy.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    id: ProjectileId,
    /// Tower that fired the shot. Weak: may be dead at resolution time.
    pub origin: TowerId,
    /// Enemy the shot was aimed at. Weak: may be dead at resolution time.
    pub target: EnemyId,
    /// Travel data for the presentation layer.
    pub flight: Flight,
}

impl Projectile {
    /// Creates a projectile from `origin` aimed at `target`.
    #[must_use]
    pub const fn new(id: ProjectileId, origin: TowerId, target: EnemyId, flight: Flight) -> Self {
        Self {
            id,
            origin,
            target,
            flight,
        }
    }

    /// The projectile's unique identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectileId {
        self.id
    }
}
