//! Enemy kinds and per-enemy state.

use serde::{Deserialize, Serialize};

use crate::entity::{ActionState, EnemyId};
use crate::grid::TilePos;

/// The enemy roster. The kind fixes an enemy's stats and special behavior.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak and common. The currency of the horde.
    Slime,
    /// A slime variant that splits into slimes when killed.
    Gelly,
    /// Fast attacker that dodges to an adjacent row after striking.
    Goblin,
    /// Slow, durable, hits hard.
    Orc,
    /// Raises a skeleton next to itself whenever its attack connects.
    Necromancer,
    /// Summoned by necromancers; never appears in level files.
    Skeleton,
}

impl EnemyKind {
    /// One-character code used by level files and snapshots.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Slime => 'S',
            Self::Gelly => 'G',
            Self::Goblin => 'g',
            Self::Orc => 'O',
            Self::Necromancer => 'N',
            Self::Skeleton => 'k',
        }
    }

    /// Parses a one-character code back into a kind.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'S' => Some(Self::Slime),
            'G' => Some(Self::Gelly),
            'g' => Some(Self::Goblin),
            'O' => Some(Self::Orc),
            'N' => Some(Self::Necromancer),
            'k' => Some(Self::Skeleton),
            _ => None,
        }
    }

    /// Life points a fresh enemy of this kind starts with.
    #[must_use]
    pub const fn max_life(self) -> i32 {
        match self {
            Self::Slime => 5,
            Self::Gelly => 6,
            Self::Goblin => 10,
            Self::Orc => 20,
            Self::Necromancer => 12,
            Self::Skeleton => 4,
        }
    }

    /// Columns travelled per movement phase when unobstructed.
    #[must_use]
    pub const fn base_speed(self) -> i32 {
        match self {
            Self::Slime | Self::Gelly | Self::Skeleton => 2,
            Self::Goblin => 3,
            Self::Orc | Self::Necromancer => 1,
        }
    }

    /// Damage dealt to the tower blocking this enemy's path.
    #[must_use]
    pub const fn attack_damage(self) -> i32 {
        match self {
            Self::Slime | Self::Gelly | Self::Skeleton => 2,
            Self::Goblin => 3,
            Self::Orc => 5,
            Self::Necromancer => 4,
        }
    }

    /// Score granted to the player when this enemy dies.
    #[must_use]
    pub const fn score_reward(self) -> u32 {
        match self {
            Self::Slime => 25,
            Self::Gelly => 40,
            Self::Goblin => 60,
            Self::Orc => 100,
            Self::Necromancer => 150,
            Self::Skeleton => 10,
        }
    }
}

/// A live enemy.
///
/// Enemies participate in two orderings at once: the arena's id-ordered
/// table, and a per-row doubly linked chain ordered by column. The chain
/// links (`front`, `back`) are owned and maintained exclusively by the
/// arena; within a row they always satisfy
/// `front.column < self.column < back.column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    id: EnemyId,
    /// Kind of the enemy, fixing its stats and abilities.
    pub kind: EnemyKind,
    /// Life points at spawn.
    pub max_life: i32,
    /// Current life points. The enemy dies at 0 or below.
    pub life: i32,
    /// Current tile, possibly in the staging area.
    pub position: TilePos,
    /// Columns travelled per movement phase when unobstructed.
    pub base_speed: i32,
    /// Speed for the next movement phase. Reset to `base_speed` after each
    /// move; zeroed when an attack connects; reduced (floor 1) by slows.
    pub speed: i32,
    /// Score granted on death.
    pub score_reward: u32,
    /// Presentation signal for the last dispatched action.
    pub action: ActionState,
    /// Nearest same-row enemy at a lower column, if any.
    pub(crate) front: Option<EnemyId>,
    /// Nearest same-row enemy at a higher column, if any.
    pub(crate) back: Option<EnemyId>,
}

impl Enemy {
    /// Creates a fresh enemy of `kind` at `position` with full life.
    #[must_use]
    pub fn new(id: EnemyId, kind: EnemyKind, position: TilePos) -> Self {
        Self {
            id,
            kind,
            max_life: kind.max_life(),
            life: kind.max_life(),
            position,
            base_speed: kind.base_speed(),
            speed: kind.base_speed(),
            score_reward: kind.score_reward(),
            action: ActionState::Idle,
            front: None,
            back: None,
        }
    }

    /// The enemy's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Nearest enemy in front of this one on the same row (lower column).
    #[must_use]
    pub const fn front_neighbor(&self) -> Option<EnemyId> {
        self.front
    }

    /// Nearest enemy behind this one on the same row (higher column).
    #[must_use]
    pub const fn back_neighbor(&self) -> Option<EnemyId> {
        self.back
    }

    /// True once life has dropped to 0 or below.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.life <= 0
    }
}
