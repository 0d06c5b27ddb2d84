//! Combat resolution: action dispatch, damage application, death effects
//! and projectile resolution.
//!
//! All functions here mutate the arena directly and tolerate stale ids: an
//! id whose entity has already been destroyed makes the operation a silent
//! no-op. That property carries the whole stale-reference story — a
//! projectile whose target died mid-flight, a queued tower that collapsed
//! before its slot, a splash hitting a tile whose occupant was just removed.
//!
//! Score is not stored here; killing blows report the reward to the caller
//! and the session does the accounting.

use crate::arena::Arena;
use crate::entity::{ActionState, EnemyId, EnemyKind, Flight, ProjectileId, TowerId, TowerKind};
use crate::grid::{TilePos, GRID_COLUMNS, GRID_ROWS};

/// Splash damage dealt by a destroyer shell around its impact tile.
const SPLASH_DAMAGE: i32 = 4;

/// Result of striking an enemy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnemyStrike {
    /// The id was stale (or the amount void); nothing happened.
    Stale,
    /// Damage applied, the enemy lives.
    Survived,
    /// The enemy died; its score reward is reported.
    Killed {
        /// Score granted for the kill.
        score: u32,
    },
}

/// Result of striking a tower.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TowerStrike {
    /// The id was stale (or the amount void); nothing happened.
    Stale,
    /// Damage applied, the tower stands.
    Survived,
    /// The tower collapsed and was removed.
    Destroyed,
}

// =============================================================================
// Damage application
// =============================================================================

/// Applies `amount` damage to an enemy.
///
/// Death removes the enemy immediately and triggers its on-death effect:
/// a Gelly attempts to spawn a Slime on each of {above, below, right, same
/// tile}, in that order, each slot independently skipped when its tile is
/// occupied or off-map — skipped slots are not made up elsewhere.
pub fn damage_enemy(arena: &mut Arena, id: EnemyId, amount: i32) -> EnemyStrike {
    if amount <= 0 {
        return EnemyStrike::Stale;
    }
    let Some(enemy) = arena.enemy_mut(id) else {
        return EnemyStrike::Stale;
    };
    enemy.life -= amount;
    enemy.action = ActionState::Hurt;
    if !enemy.is_dead() {
        return EnemyStrike::Survived;
    }

    let kind = enemy.kind;
    let position = enemy.position;
    let score = enemy.score_reward;
    let _ = arena.remove_enemy(id);
    if kind == EnemyKind::Gelly {
        split_gelly(arena, position);
    }
    EnemyStrike::Killed { score }
}

/// Applies `amount` damage to a tower, removing it on collapse.
pub fn damage_tower(arena: &mut Arena, id: TowerId, amount: i32) -> TowerStrike {
    if amount <= 0 {
        return TowerStrike::Stale;
    }
    let Some(tower) = arena.tower_mut(id) else {
        return TowerStrike::Stale;
    };
    tower.life -= amount;
    tower.action = ActionState::Hurt;
    if tower.is_dead() {
        let _ = arena.remove_tower(id);
        TowerStrike::Destroyed
    } else {
        TowerStrike::Survived
    }
}

fn split_gelly(arena: &mut Arena, origin: TilePos) {
    let slots = [(0, -1), (0, 1), (1, 0), (0, 0)];
    for (d_column, d_row) in slots {
        let pos = origin.offset(d_column, d_row);
        if !pos.is_on_map() || !arena.is_empty(pos) {
            continue;
        }
        if let Ok(slime) = arena.spawn_enemy(EnemyKind::Slime, pos) {
            if d_column != 0 || d_row != 0 {
                if let Some(spawned) = arena.enemy_mut(slime) {
                    spawned.action = ActionState::Moving { d_column, d_row };
                }
            }
        }
    }
}

// =============================================================================
// Tower actions
// =============================================================================

/// Dispatches one tower's action for the current turn.
///
/// The cooldown ticks down on every slot; the tower acts when it reaches 0.
/// Ranged kinds that find no target keep the expired cooldown and re-scan
/// on their next slot.
pub fn tower_act(arena: &mut Arena, id: TowerId, tick: u64) {
    let Some(tower) = arena.tower_mut(id) else {
        return;
    };
    tower.cooldown -= 1;
    if tower.cooldown > 0 {
        return;
    }
    let kind = tower.kind;

    match kind {
        TowerKind::Wall => reset_cooldown(arena, id),
        TowerKind::Barrack => deploy_soldier(arena, id),
        TowerKind::Soldier => soldier_fire(arena, id, tick),
        TowerKind::Mage => mage_fire(arena, id, tick),
        TowerKind::Archer | TowerKind::Canon | TowerKind::Destroyer | TowerKind::Sorcerer => {
            fire_along_row(arena, id, tick);
        }
    }
}

fn reset_cooldown(arena: &mut Arena, id: TowerId) {
    if let Some(tower) = arena.tower_mut(id) {
        tower.cooldown = tower.base_cooldown;
    }
}

/// Scans forward from `from` along `d_row` and returns the first enemy
/// within `range` tiles. Intervening towers never block the scan; tiles
/// off the map are skipped.
fn scan_row(arena: &Arena, from: TilePos, range: i32, d_row: i32) -> Option<EnemyId> {
    (1..=range).find_map(|distance| {
        let pos = from.offset(distance, d_row);
        if pos.is_on_map() {
            arena.enemy_at(pos)
        } else {
            None
        }
    })
}

/// Spawns a projectile from `tower` aimed at `target` and marks the tower
/// attacking.
fn launch(arena: &mut Arena, tower_id: TowerId, target_id: EnemyId, tick: u64) {
    let Some(tower) = arena.tower(tower_id) else {
        return;
    };
    let Some(target) = arena.enemy(target_id) else {
        return;
    };
    let flight = Flight {
        from: tower.position,
        to: target.position,
        launched_at: tick,
        speed: tower.kind.projectile_speed(),
    };
    let _ = arena.spawn_projectile(tower_id, target_id, flight);
    if let Some(tower) = arena.tower_mut(tower_id) {
        tower.action = ActionState::Attacking;
    }
}

fn fire_along_row(arena: &mut Arena, id: TowerId, tick: u64) {
    let Some(tower) = arena.tower(id) else {
        return;
    };
    let Some(range) = tower.kind.range() else {
        return;
    };
    let from = tower.position;
    if let Some(target) = scan_row(arena, from, range, 0) {
        reset_cooldown(arena, id);
        launch(arena, id, target, tick);
    }
}

/// Soldiers cover their own row and both adjacent rows, preferring the
/// closest enemy; at equal distance the own row wins, then the row above.
fn soldier_fire(arena: &mut Arena, id: TowerId, tick: u64) {
    let Some(tower) = arena.tower(id) else {
        return;
    };
    let Some(range) = tower.kind.range() else {
        return;
    };
    let from = tower.position;
    for distance in 1..=range {
        for d_row in [0, -1, 1] {
            let pos = from.offset(distance, d_row);
            if !pos.is_on_map() {
                continue;
            }
            if let Some(target) = arena.enemy_at(pos) {
                reset_cooldown(arena, id);
                launch(arena, id, target, tick);
                return;
            }
        }
    }
}

/// Mages fire independently per row: one projectile at the first match on
/// the own row, one on the row above, one on the row below.
fn mage_fire(arena: &mut Arena, id: TowerId, tick: u64) {
    let Some(tower) = arena.tower(id) else {
        return;
    };
    let Some(range) = tower.kind.range() else {
        return;
    };
    let from = tower.position;
    for d_row in [0, -1, 1] {
        if let Some(target) = scan_row(arena, from, range, d_row) {
            reset_cooldown(arena, id);
            launch(arena, id, target, tick);
        }
    }
}

/// Barracks place a free soldier on the first empty adjacent tile, trying
/// up, down, right, left in that order. With every tile blocked the action
/// fails and is retried on the next turn.
fn deploy_soldier(arena: &mut Arena, id: TowerId) {
    reset_cooldown(arena, id);
    let Some(tower) = arena.tower(id) else {
        return;
    };
    let origin = tower.position;
    for (d_column, d_row) in [(0, -1), (0, 1), (1, 0), (-1, 0)] {
        let pos = origin.offset(d_column, d_row);
        if let Ok(soldier) = arena.place_tower(TowerKind::Soldier, pos) {
            if let Some(spawned) = arena.tower_mut(soldier) {
                spawned.action = ActionState::Moving { d_column, d_row };
            }
            return;
        }
    }
    if let Some(tower) = arena.tower_mut(id) {
        tower.cooldown = 1;
    }
}

// =============================================================================
// Enemy actions
// =============================================================================

/// Dispatches one enemy's action for the current turn.
///
/// Enemies only ever strike the tile directly in front (one column toward
/// the boundary, same row). An enemy with nothing in front performs no
/// action but still consumes its slot; `speed` is zeroed only when the
/// attack actually connects, halting that enemy's advance this turn.
pub fn enemy_act(arena: &mut Arena, id: EnemyId) {
    let Some(enemy) = arena.enemy(id) else {
        return;
    };
    let kind = enemy.kind;
    let position = enemy.position;
    let Some(blocking_tower) = arena.tower_at(position.offset(-1, 0)) else {
        return;
    };

    let strike = damage_tower(arena, blocking_tower, kind.attack_damage());
    if strike == TowerStrike::Stale {
        return;
    }
    if let Some(enemy) = arena.enemy_mut(id) {
        enemy.action = ActionState::Attacking;
        enemy.speed = 0;
    }

    match kind {
        EnemyKind::Goblin => dodge_rows(arena, id),
        EnemyKind::Necromancer => raise_skeleton(arena, position),
        _ => {}
    }
}

/// Goblins slip to an adjacent row after striking. Odd remaining life
/// picks the row below first, even the row above; a blocked direction
/// falls back to the opposite one.
fn dodge_rows(arena: &mut Arena, id: EnemyId) {
    let Some(enemy) = arena.enemy(id) else {
        return;
    };
    let preferred = if enemy.life % 2 != 0 { 1 } else { -1 };
    let mut shifted = arena.move_enemy_rows(id, preferred);
    if shifted == 0 {
        shifted = arena.move_enemy_rows(id, -preferred);
    }
    if shifted != 0 {
        if let Some(enemy) = arena.enemy_mut(id) {
            enemy.action = ActionState::Moving {
                d_column: 0,
                d_row: shifted,
            };
        }
    }
}

/// Necromancers raise a skeleton on the first empty existing tile among
/// {left, up, down, right}, in that order. No tile free, no skeleton.
fn raise_skeleton(arena: &mut Arena, origin: TilePos) {
    for (d_column, d_row) in [(-1, 0), (0, -1), (0, 1), (1, 0)] {
        let pos = origin.offset(d_column, d_row);
        if !pos.is_on_map() || !arena.is_empty(pos) {
            continue;
        }
        if let Ok(skeleton) = arena.spawn_enemy(EnemyKind::Skeleton, pos) {
            if let Some(spawned) = arena.enemy_mut(skeleton) {
                spawned.action = ActionState::Moving { d_column, d_row };
            }
            return;
        }
    }
}

// =============================================================================
// Projectile resolution
// =============================================================================

/// Resolves a landed projectile and returns the score earned.
///
/// The projectile is consumed unconditionally. Before any effect applies,
/// both weak references are re-checked against the live tables: a dead
/// origin or target makes the shot fizzle silently. Destroyer shells splash
/// the eight tiles around the target's position as read at resolution time,
/// before the primary hit lands.
pub fn resolve_projectile(arena: &mut Arena, id: ProjectileId) -> u32 {
    let Some(projectile) = arena.remove_projectile(id) else {
        return 0;
    };
    let Some(origin) = arena.tower(projectile.origin) else {
        return 0;
    };
    let origin_kind = origin.kind;
    let Some(damage) = origin_kind.projectile_damage() else {
        return 0;
    };
    let Some(target) = arena.enemy(projectile.target) else {
        return 0;
    };
    let impact = target.position;

    let mut score = 0;
    let primary = damage_enemy(arena, projectile.target, damage);
    if let EnemyStrike::Killed { score: reward } = primary {
        score += reward;
    }

    match origin_kind {
        TowerKind::Destroyer => {
            for pos in impact.neighbors() {
                if let Some(splashed) = arena.enemy_at(pos) {
                    if let EnemyStrike::Killed { score: reward } =
                        damage_enemy(arena, splashed, SPLASH_DAMAGE)
                    {
                        score += reward;
                    }
                }
            }
        }
        TowerKind::Sorcerer | TowerKind::Mage => {
            if primary == EnemyStrike::Survived {
                if let Some(slowed) = arena.enemy_mut(projectile.target) {
                    slowed.speed = (slowed.speed - 1).max(1);
                }
            }
        }
        _ => {}
    }
    score
}

// =============================================================================
// Movement phase
// =============================================================================

/// Advances every enemy toward the defended boundary.
///
/// Rows are processed top to bottom, each row front to back via the row
/// chain, so an enemy never blocks the one behind it from using the tile
/// it just vacated. Enemies still in the staging area crawl in at one
/// column per turn regardless of their speed; afterwards every enemy's
/// speed resets to its base value.
pub fn run_movement_phase(arena: &mut Arena) {
    for row in 1..=GRID_ROWS {
        let mut cursor = arena.first_enemy_in_row(row);
        while let Some(id) = cursor {
            let speed = match arena.enemy_mut(id) {
                Some(enemy) => {
                    if enemy.position.column > GRID_COLUMNS {
                        enemy.speed = 1;
                    }
                    enemy.speed
                }
                None => 0,
            };
            let travelled = arena.move_enemy_columns(id, -speed);
            if let Some(enemy) = arena.enemy_mut(id) {
                if travelled != 0 {
                    enemy.action = ActionState::Moving {
                        d_column: travelled,
                        d_row: 0,
                    };
                }
                enemy.speed = enemy.base_speed;
            }
            cursor = arena.enemy(id).and_then(|enemy| enemy.back_neighbor());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
