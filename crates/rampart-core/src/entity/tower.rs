//! Tower kinds and per-tower state.

use serde::{Deserialize, Serialize};

use crate::entity::{ActionState, TowerId};
use crate::grid::TilePos;

/// The buildable (and spawnable) tower roster.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Long-range single-target shooter.
    Archer,
    /// Pure blocker. Upgrades into a barrack.
    Wall,
    /// Periodically deploys a free soldier on an adjacent tile.
    Barrack,
    /// Deployed by barracks. Short range, covers adjacent rows, disposable.
    Soldier,
    /// Short-range heavy hitter. Upgrades into a destroyer.
    Canon,
    /// Upgraded canon with splash damage around the impact.
    Destroyer,
    /// Damages and slows its target. Upgrades into a mage.
    Sorcerer,
    /// Upgraded sorcerer covering the adjacent rows as well.
    Mage,
}

impl TowerKind {
    /// One-character code used by snapshots.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Archer => 'A',
            Self::Wall => 'W',
            Self::Barrack => 'B',
            Self::Soldier => 's',
            Self::Canon => 'C',
            Self::Destroyer => 'D',
            Self::Sorcerer => 'S',
            Self::Mage => 'M',
        }
    }

    /// Parses a one-character code back into a kind.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Self::Archer),
            'W' => Some(Self::Wall),
            'B' => Some(Self::Barrack),
            's' => Some(Self::Soldier),
            'C' => Some(Self::Canon),
            'D' => Some(Self::Destroyer),
            'S' => Some(Self::Sorcerer),
            'M' => Some(Self::Mage),
            _ => None,
        }
    }

    /// Life points a fresh tower of this kind starts with.
    #[must_use]
    pub const fn max_life(self) -> i32 {
        match self {
            Self::Archer => 6,
            Self::Wall => 10,
            Self::Barrack => 15,
            Self::Soldier => 3,
            Self::Canon => 4,
            Self::Destroyer => 8,
            Self::Sorcerer => 5,
            Self::Mage => 7,
        }
    }

    /// Placement cost. Soldiers are free: they are deployed, never bought.
    #[must_use]
    pub const fn cost(self) -> i64 {
        match self {
            Self::Archer => 50,
            Self::Wall => 30,
            Self::Barrack => 70,
            Self::Soldier => 0,
            Self::Canon => 100,
            Self::Destroyer => 120,
            Self::Sorcerer => 70,
            Self::Mage => 100,
        }
    }

    /// Turns between two actions of this tower.
    #[must_use]
    pub const fn base_cooldown(self) -> i32 {
        match self {
            Self::Archer | Self::Wall | Self::Soldier => 1,
            Self::Barrack => 5,
            Self::Canon | Self::Destroyer => 3,
            Self::Sorcerer | Self::Mage => 2,
        }
    }

    /// Forward range in tiles for ranged kinds, `None` for the others.
    #[must_use]
    pub const fn range(self) -> Option<i32> {
        match self {
            Self::Archer => Some(9),
            Self::Soldier => Some(2),
            Self::Canon => Some(3),
            Self::Destroyer => Some(4),
            Self::Sorcerer | Self::Mage => Some(7),
            Self::Wall | Self::Barrack => None,
        }
    }

    /// Damage of a projectile fired by this kind, `None` for non-shooters.
    #[must_use]
    pub const fn projectile_damage(self) -> Option<i32> {
        match self {
            Self::Archer | Self::Soldier => Some(2),
            Self::Canon => Some(9),
            Self::Destroyer => Some(10),
            Self::Sorcerer | Self::Mage => Some(3),
            Self::Wall | Self::Barrack => None,
        }
    }

    /// Projectile travel speed in tiles per second. Presentation pacing
    /// data only; the simulation never reads it back.
    #[must_use]
    pub const fn projectile_speed(self) -> f64 {
        match self {
            Self::Archer => 15.0,
            Self::Canon | Self::Destroyer => 20.0,
            Self::Soldier | Self::Sorcerer | Self::Mage => 10.0,
            Self::Wall | Self::Barrack => 0.0,
        }
    }

    /// The kind this tower upgrades into, if an upgrade path exists.
    #[must_use]
    pub const fn upgrade_target(self) -> Option<Self> {
        match self {
            Self::Wall => Some(Self::Barrack),
            Self::Canon => Some(Self::Destroyer),
            Self::Sorcerer => Some(Self::Mage),
            _ => None,
        }
    }
}

/// A live tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    id: TowerId,
    /// Kind of the tower, fixing its stats and attack profile.
    pub kind: TowerKind,
    /// Life points at placement.
    pub max_life: i32,
    /// Current life points. The tower collapses at 0 or below.
    pub life: i32,
    /// Tile the tower occupies.
    pub position: TilePos,
    /// What placing this tower cost (refunded when sold).
    pub cost: i64,
    /// Turns between two actions.
    pub base_cooldown: i32,
    /// Countdown to the next action. The tower acts when it reaches 0.
    ///
    /// Starts at 1 so a freshly placed tower acts on its first eligible
    /// turn.
    pub cooldown: i32,
    /// Presentation signal for the last dispatched action.
    pub action: ActionState,
}

impl Tower {
    /// Creates a fresh tower of `kind` at `position` with full life.
    #[must_use]
    pub fn new(id: TowerId, kind: TowerKind, position: TilePos) -> Self {
        Self {
            id,
            kind,
            max_life: kind.max_life(),
            life: kind.max_life(),
            position,
            cost: kind.cost(),
            base_cooldown: kind.base_cooldown(),
            cooldown: 1,
            action: ActionState::Idle,
        }
    }

    /// The tower's unique identifier.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// True once life has dropped to 0 or below.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.life <= 0
    }
}
