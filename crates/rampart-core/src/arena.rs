//! Arena: owner of all live entities and their spatial relations.
//!
//! The arena holds the enemy, tower and projectile tables. Entities are
//! stored in `BTreeMap`s keyed by monotonically assigned ids, which gives
//! deterministic iteration order across platforms and makes stale-reference
//! checks O(1): an id whose entity was removed simply fails the lookup.
//!
//! # Row chains
//!
//! Besides the id-ordered table, every enemy is linked into a per-row chain
//! ordered by column (`front` toward the defended boundary, `back` toward
//! the staging area). The arena is the only code that touches those links.
//! Invariants maintained by every mutation:
//!
//! - at most one enemy per tile, and a tile never holds an enemy and a
//!   tower at the same time;
//! - following `back` links from any enemy yields strictly increasing
//!   columns, and `front` links strictly decreasing ones.
//!
//! Horizontal movement preserves rank (same-row occupants block overtaking),
//! so only spawning, removal and row changes relink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Enemy, EnemyId, EnemyKind, Flight, Projectile, ProjectileId, Tower, TowerId, TowerKind};
use crate::error::PlacementError;
use crate::grid::{tile_exists, TilePos, GRID_COLUMNS, GRID_ROWS};

/// Container for all live simulation entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    next_enemy_id: u64,
    next_tower_id: u64,
    next_projectile_id: u64,
    enemies: BTreeMap<EnemyId, Enemy>,
    towers: BTreeMap<TowerId, Tower>,
    projectiles: BTreeMap<ProjectileId, Projectile>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Spatial queries
    // =========================================================================

    /// Returns the enemy occupying `pos`, if any. Linear scan.
    #[must_use]
    pub fn enemy_at(&self, pos: TilePos) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|(_, e)| e.position == pos)
            .map(|(id, _)| *id)
    }

    /// Returns the tower occupying `pos`, if any. Linear scan.
    #[must_use]
    pub fn tower_at(&self, pos: TilePos) -> Option<TowerId> {
        self.towers
            .iter()
            .find(|(_, t)| t.position == pos)
            .map(|(id, _)| *id)
    }

    /// Returns whichever entities occupy `pos`.
    #[must_use]
    pub fn entities_at(&self, pos: TilePos) -> (Option<EnemyId>, Option<TowerId>) {
        (self.enemy_at(pos), self.tower_at(pos))
    }

    /// True iff no enemy and no tower occupies `pos`.
    #[must_use]
    pub fn is_empty(&self, pos: TilePos) -> bool {
        self.enemy_at(pos).is_none() && self.tower_at(pos).is_none()
    }

    // =========================================================================
    // Enemies
    // =========================================================================

    /// Spawns a fresh enemy of `kind` at `pos` and links it into its row.
    ///
    /// Spawning is rejected when the row is out of range or another enemy
    /// already sits on the exact tile. Towers do not block spawning: enemies
    /// enter the world through the off-map staging area where no tower can
    /// stand.
    ///
    /// # Errors
    ///
    /// [`PlacementError::RowOutOfRange`] or [`PlacementError::TileOccupied`];
    /// the arena is left unchanged on failure.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: TilePos) -> Result<EnemyId, PlacementError> {
        if pos.row < 1 || pos.row > GRID_ROWS {
            return Err(PlacementError::RowOutOfRange(pos.row));
        }
        if self.enemy_at(pos).is_some() {
            return Err(PlacementError::TileOccupied(pos));
        }

        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        let inserted = self.enemies.insert(id, Enemy::new(id, kind, pos));
        debug_assert!(inserted.is_none());
        self.link_into_row(id);
        Ok(id)
    }

    /// Removes an enemy, bridging its row neighbors around the gap.
    ///
    /// Returns the removed enemy, or `None` for an id that is no longer
    /// live.
    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        if !self.enemies.contains_key(&id) {
            return None;
        }
        self.unlink_from_row(id);
        self.enemies.remove(&id)
    }

    /// Returns a reference to an enemy by id.
    #[must_use]
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    /// Returns a mutable reference to an enemy by id.
    ///
    /// Position must not be modified through this handle; use the movement
    /// operations so the row chains stay consistent.
    #[must_use]
    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// True while the enemy is a live member of the table.
    #[must_use]
    pub fn contains_enemy(&self, id: EnemyId) -> bool {
        self.enemies.contains_key(&id)
    }

    /// Iterates enemies in deterministic (id) order.
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.enemies.values()
    }

    /// Iterates enemy ids in deterministic (id) order.
    pub fn enemy_ids(&self) -> impl Iterator<Item = EnemyId> + '_ {
        self.enemies.keys().copied()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// The frontmost (lowest-column) enemy of `row`, if the row holds any.
    #[must_use]
    pub fn first_enemy_in_row(&self, row: i32) -> Option<EnemyId> {
        self.enemies
            .iter()
            .filter(|(_, e)| e.position.row == row)
            .min_by_key(|(_, e)| e.position.column)
            .map(|(id, _)| *id)
    }

    /// Moves an enemy along its row by a signed column delta.
    ///
    /// The delta is clipped one step at a time at the first obstruction:
    /// an occupied tile, or the left map edge (column 1). Columns beyond
    /// the map are legal, so staging enemies can walk in. A fully blocked
    /// move is a legal no-op. Returns the displacement actually travelled.
    pub fn move_enemy_columns(&mut self, id: EnemyId, delta: i32) -> i32 {
        let Some(enemy) = self.enemies.get(&id) else {
            return 0;
        };
        let pos = enemy.position;
        let step = delta.signum();
        let mut travelled = 0;
        for i in 1..=delta.abs() {
            let next = pos.column + i * step;
            if next < 1 || !self.is_empty(TilePos::new(next, pos.row)) {
                break;
            }
            travelled = i * step;
        }
        if let Some(enemy) = self.enemies.get_mut(&id) {
            enemy.position.column += travelled;
        }
        travelled
    }

    /// Moves an enemy across rows by a signed row delta.
    ///
    /// Clipped like column movement, except that every intermediate tile
    /// must also be an existing map tile (row abilities never leave the
    /// map, and staging enemies cannot change rows). On success the enemy
    /// is unlinked from its old row chain and rescanned into the new one:
    /// a row change permits no rank-preserving shortcut. Returns the
    /// displacement actually travelled.
    pub fn move_enemy_rows(&mut self, id: EnemyId, delta: i32) -> i32 {
        let Some(enemy) = self.enemies.get(&id) else {
            return 0;
        };
        let pos = enemy.position;
        let step = delta.signum();
        let mut travelled = 0;
        for i in 1..=delta.abs() {
            let next = TilePos::new(pos.column, pos.row + i * step);
            if !next.is_on_map() || !self.is_empty(next) {
                break;
            }
            travelled = i * step;
        }
        if travelled == 0 {
            return 0;
        }
        self.unlink_from_row(id);
        if let Some(enemy) = self.enemies.get_mut(&id) {
            enemy.position.row += travelled;
        }
        self.link_into_row(id);
        travelled
    }

    // =========================================================================
    // Towers
    // =========================================================================

    /// Places a fresh tower of `kind` at `pos`.
    ///
    /// Placement requires an existing tile on a buildable column (the last
    /// column is reserved for arriving enemies) that holds neither a tower
    /// nor an enemy.
    ///
    /// # Errors
    ///
    /// [`PlacementError::OutsideBuildableArea`] or
    /// [`PlacementError::TileOccupied`]; the arena is left unchanged on
    /// failure.
    pub fn place_tower(&mut self, kind: TowerKind, pos: TilePos) -> Result<TowerId, PlacementError> {
        if !tile_exists(pos.column, pos.row) || pos.column >= GRID_COLUMNS {
            return Err(PlacementError::OutsideBuildableArea(pos));
        }
        if !self.is_empty(pos) {
            return Err(PlacementError::TileOccupied(pos));
        }

        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id += 1;
        let inserted = self.towers.insert(id, Tower::new(id, kind, pos));
        debug_assert!(inserted.is_none());
        Ok(id)
    }

    /// Removes a tower. Returns it, or `None` for an id no longer live.
    pub fn remove_tower(&mut self, id: TowerId) -> Option<Tower> {
        self.towers.remove(&id)
    }

    /// Returns a reference to a tower by id.
    #[must_use]
    pub fn tower(&self, id: TowerId) -> Option<&Tower> {
        self.towers.get(&id)
    }

    /// Returns a mutable reference to a tower by id.
    #[must_use]
    pub fn tower_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.towers.get_mut(&id)
    }

    /// True while the tower is a live member of the table.
    #[must_use]
    pub fn contains_tower(&self, id: TowerId) -> bool {
        self.towers.contains_key(&id)
    }

    /// Iterates towers in deterministic (id) order.
    pub fn towers(&self) -> impl Iterator<Item = &Tower> + '_ {
        self.towers.values()
    }

    /// Iterates tower ids in deterministic (id) order.
    pub fn tower_ids(&self) -> impl Iterator<Item = TowerId> + '_ {
        self.towers.keys().copied()
    }

    /// Number of live towers.
    #[must_use]
    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    // =========================================================================
    // Projectiles
    // =========================================================================

    /// Registers a projectile fired from `origin` at `target`.
    pub fn spawn_projectile(&mut self, origin: TowerId, target: EnemyId, flight: Flight) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id += 1;
        let inserted = self
            .projectiles
            .insert(id, Projectile::new(id, origin, target, flight));
        debug_assert!(inserted.is_none());
        id
    }

    /// Removes a resolved projectile.
    pub fn remove_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        self.projectiles.remove(&id)
    }

    /// Returns a reference to a projectile by id.
    #[must_use]
    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Iterates projectiles in deterministic (id) order.
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> + '_ {
        self.projectiles.values()
    }

    /// Iterates projectile ids in deterministic (id) order.
    pub fn projectile_ids(&self) -> impl Iterator<Item = ProjectileId> + '_ {
        self.projectiles.keys().copied()
    }

    /// True while any projectile is in flight.
    #[must_use]
    pub fn has_projectiles(&self) -> bool {
        !self.projectiles.is_empty()
    }

    // =========================================================================
    // Row chain maintenance
    // =========================================================================

    /// Links an enemy into its row chain by a single scan over the table,
    /// selecting the nearest lower-column and nearest higher-column enemies
    /// of the same row and stitching their back/front links around the
    /// newcomer.
    fn link_into_row(&mut self, id: EnemyId) {
        let Some(enemy) = self.enemies.get(&id) else {
            return;
        };
        let pos = enemy.position;

        let mut front: Option<(EnemyId, i32)> = None;
        let mut back: Option<(EnemyId, i32)> = None;
        for (other_id, other) in &self.enemies {
            if *other_id == id || other.position.row != pos.row {
                continue;
            }
            let column = other.position.column;
            if column < pos.column {
                if front.map_or(true, |(_, best)| best < column) {
                    front = Some((*other_id, column));
                }
            } else if column > pos.column && back.map_or(true, |(_, best)| best > column) {
                back = Some((*other_id, column));
            }
        }

        if let Some((front_id, _)) = front {
            if let Some(neighbor) = self.enemies.get_mut(&front_id) {
                neighbor.back = Some(id);
            }
        }
        if let Some((back_id, _)) = back {
            if let Some(neighbor) = self.enemies.get_mut(&back_id) {
                neighbor.front = Some(id);
            }
        }
        if let Some(enemy) = self.enemies.get_mut(&id) {
            enemy.front = front.map(|(front_id, _)| front_id);
            enemy.back = back.map(|(back_id, _)| back_id);
        }
    }

    /// Unlinks an enemy from its row chain, bridging its neighbors.
    fn unlink_from_row(&mut self, id: EnemyId) {
        let Some(enemy) = self.enemies.get(&id) else {
            return;
        };
        let (front, back) = (enemy.front, enemy.back);
        if let Some(front_id) = front {
            if let Some(neighbor) = self.enemies.get_mut(&front_id) {
                neighbor.back = back;
            }
        }
        if let Some(back_id) = back {
            if let Some(neighbor) = self.enemies.get_mut(&back_id) {
                neighbor.front = front;
            }
        }
        if let Some(enemy) = self.enemies.get_mut(&id) {
            enemy.front = None;
            enemy.back = None;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks a row front to back and asserts strictly increasing columns
    /// and mutually consistent links.
    fn assert_row_chain(arena: &Arena, row: i32) {
        let mut cursor = arena.first_enemy_in_row(row);
        let mut previous_column = i32::MIN;
        let mut seen = 0;
        while let Some(id) = cursor {
            let enemy = arena.enemy(id).unwrap();
            assert_eq!(enemy.position.row, row);
            assert!(enemy.position.column > previous_column, "columns must increase front to back");
            if let Some(front_id) = enemy.front_neighbor() {
                assert_eq!(arena.enemy(front_id).unwrap().back_neighbor(), Some(id));
            }
            previous_column = enemy.position.column;
            cursor = enemy.back_neighbor();
            seen += 1;
        }
        let expected = arena.enemies().filter(|e| e.position.row == row).count();
        assert_eq!(seen, expected, "row chain must reach every enemy of the row");
    }

    mod spawning_tests {
        use super::*;

        #[test]
        fn spawn_rejects_out_of_range_rows() {
            let mut arena = Arena::new();
            assert!(matches!(
                arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 0)),
                Err(PlacementError::RowOutOfRange(0))
            ));
            assert!(matches!(
                arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, GRID_ROWS + 1)),
                Err(PlacementError::RowOutOfRange(_))
            ));
            assert_eq!(arena.enemy_count(), 0);
        }

        #[test]
        fn spawn_rejects_exact_tile_duplicates() {
            let mut arena = Arena::new();
            arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 3)).unwrap();
            assert!(matches!(
                arena.spawn_enemy(EnemyKind::Orc, TilePos::new(5, 3)),
                Err(PlacementError::TileOccupied(_))
            ));
            assert_eq!(arena.enemy_count(), 1);
        }

        #[test]
        fn towers_do_not_block_enemy_spawning() {
            let mut arena = Arena::new();
            arena.place_tower(TowerKind::Wall, TilePos::new(5, 3)).unwrap();
            assert!(arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 3)).is_ok());
        }

        #[test]
        fn spawn_links_between_existing_neighbors() {
            let mut arena = Arena::new();
            let left = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 2)).unwrap();
            let right = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(9, 2)).unwrap();
            let middle = arena.spawn_enemy(EnemyKind::Goblin, TilePos::new(6, 2)).unwrap();

            let enemy = arena.enemy(middle).unwrap();
            assert_eq!(enemy.front_neighbor(), Some(left));
            assert_eq!(enemy.back_neighbor(), Some(right));
            assert_eq!(arena.enemy(left).unwrap().back_neighbor(), Some(middle));
            assert_eq!(arena.enemy(right).unwrap().front_neighbor(), Some(middle));
            assert_row_chain(&arena, 2);
        }

        #[test]
        fn rows_are_chained_independently() {
            let mut arena = Arena::new();
            arena.spawn_enemy(EnemyKind::Slime, TilePos::new(4, 1)).unwrap();
            let lone = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(4, 2)).unwrap();
            arena.spawn_enemy(EnemyKind::Slime, TilePos::new(8, 1)).unwrap();

            let enemy = arena.enemy(lone).unwrap();
            assert_eq!(enemy.front_neighbor(), None);
            assert_eq!(enemy.back_neighbor(), None);
            assert_row_chain(&arena, 1);
        }
    }

    mod removal_tests {
        use super::*;

        #[test]
        fn removal_bridges_neighbors() {
            let mut arena = Arena::new();
            let left = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 4)).unwrap();
            let middle = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 4)).unwrap();
            let right = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(7, 4)).unwrap();

            arena.remove_enemy(middle);

            assert_eq!(arena.enemy(left).unwrap().back_neighbor(), Some(right));
            assert_eq!(arena.enemy(right).unwrap().front_neighbor(), Some(left));
            assert_row_chain(&arena, 4);
        }

        #[test]
        fn removing_twice_is_a_noop() {
            let mut arena = Arena::new();
            let id = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 4)).unwrap();
            assert!(arena.remove_enemy(id).is_some());
            assert!(arena.remove_enemy(id).is_none());
        }

        #[test]
        fn ids_are_never_reused() {
            let mut arena = Arena::new();
            let first = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 4)).unwrap();
            arena.remove_enemy(first);
            let second = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 4)).unwrap();
            assert_ne!(first, second);
            assert!(arena.enemy(first).is_none());
        }
    }

    mod movement_tests {
        use super::*;

        #[test]
        fn unobstructed_move_travels_the_full_delta() {
            let mut arena = Arena::new();
            let id = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(10, 3)).unwrap();
            assert_eq!(arena.move_enemy_columns(id, -3), -3);
            assert_eq!(arena.enemy(id).unwrap().position, TilePos::new(7, 3));
        }

        #[test]
        fn move_clips_at_the_first_obstruction() {
            let mut arena = Arena::new();
            arena.place_tower(TowerKind::Wall, TilePos::new(7, 3)).unwrap();
            let id = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(10, 3)).unwrap();

            // Obstruction two tiles ahead: a delta of -5 must yield exactly -2.
            assert_eq!(arena.move_enemy_columns(id, -5), -2);
            assert_eq!(arena.enemy(id).unwrap().position, TilePos::new(8, 3));
        }

        #[test]
        fn move_clips_at_the_left_map_edge() {
            let mut arena = Arena::new();
            let id = arena.spawn_enemy(EnemyKind::Goblin, TilePos::new(2, 3)).unwrap();
            assert_eq!(arena.move_enemy_columns(id, -5), -1);
            assert_eq!(arena.enemy(id).unwrap().position.column, 1);
        }

        #[test]
        fn fully_blocked_move_is_a_noop() {
            let mut arena = Arena::new();
            arena.place_tower(TowerKind::Wall, TilePos::new(9, 3)).unwrap();
            let id = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(10, 3)).unwrap();
            assert_eq!(arena.move_enemy_columns(id, -4), 0);
            assert_eq!(arena.enemy(id).unwrap().position, TilePos::new(10, 3));
        }

        #[test]
        fn staging_enemies_walk_onto_the_map() {
            let mut arena = Arena::new();
            let id = arena
                .spawn_enemy(EnemyKind::Slime, TilePos::new(GRID_COLUMNS + 2, 3))
                .unwrap();
            assert_eq!(arena.move_enemy_columns(id, -3), -3);
            assert!(arena.enemy(id).unwrap().position.is_on_map());
        }

        #[test]
        fn row_move_relinks_both_rows() {
            let mut arena = Arena::new();
            let stay = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(4, 2)).unwrap();
            let mover = arena.spawn_enemy(EnemyKind::Goblin, TilePos::new(6, 2)).unwrap();
            let below = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(3, 3)).unwrap();

            assert_eq!(arena.move_enemy_rows(mover, 1), 1);
            assert_eq!(arena.enemy(mover).unwrap().position, TilePos::new(6, 3));

            // Old row closed up, new row adopted the mover.
            assert_eq!(arena.enemy(stay).unwrap().back_neighbor(), None);
            assert_eq!(arena.enemy(mover).unwrap().front_neighbor(), Some(below));
            assert_eq!(arena.enemy(below).unwrap().back_neighbor(), Some(mover));
            assert_row_chain(&arena, 2);
            assert_row_chain(&arena, 3);
        }

        #[test]
        fn row_move_is_blocked_by_occupancy_and_map_bounds() {
            let mut arena = Arena::new();
            let top = arena.spawn_enemy(EnemyKind::Goblin, TilePos::new(6, 1)).unwrap();
            assert_eq!(arena.move_enemy_rows(top, -1), 0);

            arena.spawn_enemy(EnemyKind::Slime, TilePos::new(6, 2)).unwrap();
            assert_eq!(arena.move_enemy_rows(top, 1), 0);
            assert_eq!(arena.enemy(top).unwrap().position, TilePos::new(6, 1));
        }

        #[test]
        fn staging_enemies_cannot_change_rows() {
            let mut arena = Arena::new();
            let id = arena
                .spawn_enemy(EnemyKind::Goblin, TilePos::new(GRID_COLUMNS + 1, 3))
                .unwrap();
            assert_eq!(arena.move_enemy_rows(id, 1), 0);
        }

        #[test]
        fn moving_a_dead_id_is_a_noop() {
            let mut arena = Arena::new();
            let id = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 3)).unwrap();
            arena.remove_enemy(id);
            assert_eq!(arena.move_enemy_columns(id, -2), 0);
            assert_eq!(arena.move_enemy_rows(id, 1), 0);
        }
    }

    mod tower_tests {
        use super::*;

        #[test]
        fn placement_rejects_the_last_column() {
            let mut arena = Arena::new();
            assert!(matches!(
                arena.place_tower(TowerKind::Archer, TilePos::new(GRID_COLUMNS, 3)),
                Err(PlacementError::OutsideBuildableArea(_))
            ));
            assert!(arena
                .place_tower(TowerKind::Archer, TilePos::new(GRID_COLUMNS - 1, 3))
                .is_ok());
        }

        #[test]
        fn placement_rejects_occupied_tiles() {
            let mut arena = Arena::new();
            arena.spawn_enemy(EnemyKind::Slime, TilePos::new(5, 3)).unwrap();
            assert!(matches!(
                arena.place_tower(TowerKind::Wall, TilePos::new(5, 3)),
                Err(PlacementError::TileOccupied(_))
            ));

            arena.place_tower(TowerKind::Wall, TilePos::new(6, 3)).unwrap();
            assert!(matches!(
                arena.place_tower(TowerKind::Archer, TilePos::new(6, 3)),
                Err(PlacementError::TileOccupied(_))
            ));
        }

        #[test]
        fn placement_rejects_off_map_tiles() {
            let mut arena = Arena::new();
            assert!(arena.place_tower(TowerKind::Wall, TilePos::new(0, 3)).is_err());
            assert!(arena.place_tower(TowerKind::Wall, TilePos::new(3, 0)).is_err());
        }
    }

    mod projectile_tests {
        use super::*;

        fn flight() -> Flight {
            Flight {
                from: TilePos::new(2, 3),
                to: TilePos::new(6, 3),
                launched_at: 0,
                speed: 15.0,
            }
        }

        #[test]
        fn projectiles_are_tracked_until_removed() {
            let mut arena = Arena::new();
            let tower = arena.place_tower(TowerKind::Archer, TilePos::new(2, 3)).unwrap();
            let enemy = arena.spawn_enemy(EnemyKind::Slime, TilePos::new(6, 3)).unwrap();

            assert!(!arena.has_projectiles());
            let id = arena.spawn_projectile(tower, enemy, flight());
            assert!(arena.has_projectiles());
            assert_eq!(arena.projectile(id).unwrap().target, enemy);

            arena.remove_projectile(id);
            assert!(!arena.has_projectiles());
        }
    }

    mod serialization_tests {
        use super::*;

        #[test]
        fn arena_roundtrips_through_json() {
            let mut arena = Arena::new();
            arena.spawn_enemy(EnemyKind::Gelly, TilePos::new(8, 2)).unwrap();
            arena.spawn_enemy(EnemyKind::Orc, TilePos::new(11, 2)).unwrap();
            arena.place_tower(TowerKind::Canon, TilePos::new(2, 2)).unwrap();

            let json = serde_json::to_string(&arena).unwrap();
            let mut back: Arena = serde_json::from_str(&json).unwrap();

            assert_eq!(back.enemy_count(), 2);
            assert_eq!(back.tower_count(), 1);
            assert_row_chain(&back, 2);

            // Id counters survive: the next spawn continues the sequence.
            let next = back.spawn_enemy(EnemyKind::Slime, TilePos::new(14, 2)).unwrap();
            assert_eq!(next.as_u64(), 2);
        }
    }
}
