//! Waves: scripted batches of enemies plus the endless-mode generator.
//!
//! A wave is the unit of progression: an income grant and a list of spawn
//! orders. Scripted waves come from level files; endless mode produces one
//! procedurally whenever the field clears, spending a power budget that
//! grows quadratically with the wave number so the pressure keeps climbing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::EnemyKind;
use crate::grid::{TilePos, GRID_COLUMNS, GRID_ROWS};

/// One enemy spawn order of a wave.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    /// Kind of enemy to spawn.
    pub kind: EnemyKind,
    /// Spawn tile, normally in the staging area.
    pub position: TilePos,
}

/// A batch of enemies and the funds granted when it becomes active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Funds granted to the player when the wave becomes the current one.
    pub income: i64,
    /// Enemies the wave feeds into the arena.
    pub spawns: Vec<Spawn>,
}

// =============================================================================
// Endless-mode generation
// =============================================================================

/// Power drawn from the wave budget per enemy of each tier.
const fn power_cost(kind: EnemyKind) -> i64 {
    match kind {
        EnemyKind::Slime | EnemyKind::Skeleton => 50,
        EnemyKind::Gelly => 90,
        EnemyKind::Goblin => 150,
        EnemyKind::Orc => 300,
        EnemyKind::Necromancer => 500,
    }
}

/// Power budget available to the wave at `index`.
#[must_use]
pub const fn power_budget(index: u32) -> i64 {
    let index = index as i64;
    1000 + 250 * index * index
}

/// Generates the endless-mode wave at `index`.
///
/// Enemies are drawn one at a time until the budget no longer covers the
/// cheapest tier. Each draw rolls the tiers strongest first with a
/// probability that grows with the remaining power, so early waves are
/// slime floods and late waves lean on orcs and necromancers. Spawn tiles
/// are staged further out as the wave fills up, nudged one more column
/// whenever a tile is already taken.
pub fn generate_wave<R: Rng>(index: u32, rng: &mut R) -> Wave {
    let income = 150 + 25 * i64::from(index);
    let mut remaining = power_budget(index);
    let mut spawns: Vec<Spawn> = Vec::new();

    while remaining >= power_cost(EnemyKind::Slime) {
        let kind = roll_tier(remaining, rng);
        remaining -= power_cost(kind);
        let position = stage_position(&spawns, rng);
        spawns.push(Spawn { kind, position });
    }

    Wave { income, spawns }
}

/// Rolls one tier, strongest first. A tier is eligible only while the
/// remaining budget covers it; its selection probability rises linearly
/// with the remaining power up to a per-tier cap.
fn roll_tier<R: Rng>(remaining: i64, rng: &mut R) -> EnemyKind {
    let tiers: [(EnemyKind, f64, f64); 4] = [
        (EnemyKind::Necromancer, 8000.0, 0.35),
        (EnemyKind::Orc, 5000.0, 0.45),
        (EnemyKind::Goblin, 3000.0, 0.60),
        (EnemyKind::Gelly, 1500.0, 0.70),
    ];
    for (kind, scale, cap) in tiers {
        if remaining < power_cost(kind) {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let chance = (remaining as f64 / scale).min(cap);
        if rng.gen_bool(chance) {
            return kind;
        }
    }
    EnemyKind::Slime
}

/// Picks a collision-free staging tile. The column pushes out as the wave
/// grows (one column per full board height of enemies) so the horde
/// arrives in echelons rather than a pile.
fn stage_position<R: Rng>(spawns: &[Spawn], rng: &mut R) -> TilePos {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let depth = spawns.len() as i32 / GRID_ROWS;
    let row = rng.gen_range(1..=GRID_ROWS);
    let mut column = GRID_COLUMNS + 1 + depth + rng.gen_range(0..2);
    while spawns
        .iter()
        .any(|spawn| spawn.position == TilePos::new(column, row))
    {
        column += 1;
    }
    TilePos::new(column, row)
}

// =============================================================================
// Tests
// =============================================================================
