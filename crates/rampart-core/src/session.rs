//! Game session: the single entry point the presentation layer drives.
//!
//! A session owns the arena, the wave list, the economy and the phase
//! machine, and exposes exactly one mutation path per tick: [`GameSession::advance`].
//! Commands (starting the wave, buying, selling, upgrading) are atomic,
//! immediately resolved operations that either succeed or leave the session
//! untouched.
//!
//! The tick loop is cooperative polling: a phase that is waiting for
//! something (a projectile in flight, an entity the gate reports unsettled)
//! simply does not transition this tick and is re-evaluated on the next
//! one. With the [`AlwaysSettled`](crate::gate::AlwaysSettled) stub a full
//! combat cycle settles in three ticks.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::arena::Arena;
use crate::combat;
use crate::context::SimContext;
use crate::entity::{EnemyId, ProjectileId, TowerId, TowerKind};
use crate::error::{CommandError, LevelError, SnapshotError};
use crate::gate::SettleGate;
use crate::grid::TilePos;
use crate::level::{self, SavedEnemy, SavedTower, Snapshot};
use crate::phase::{Phase, TurnQueue};
use crate::wave::{self, Wave};

/// Whether the session ends with its scripted waves or keeps generating.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Play the level's waves; clearing the last one is victory.
    Scripted,
    /// After the field clears, generate the next wave procedurally and
    /// keep going with no pre-wave pause.
    Endless,
}

/// One running game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    level_name: String,
    mode: GameMode,
    waves: Vec<Wave>,
    wave_index: usize,
    funds: i64,
    score: u64,
    turn: u32,
    phase: Phase,
    arena: Arena,
    tower_queue: TurnQueue<TowerId>,
    enemy_queue: TurnQueue<EnemyId>,
}

impl GameSession {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a session from level definition text.
    ///
    /// The first wave becomes active immediately: its income is granted and
    /// its enemies staged, and the session waits in the pre-wave state for
    /// [`GameSession::start_wave`].
    ///
    /// # Errors
    ///
    /// [`LevelError`] when the level text is malformed; no session is
    /// created.
    pub fn from_level(
        level_name: impl Into<String>,
        level_text: &str,
        mode: GameMode,
    ) -> Result<Self, LevelError> {
        let waves = level::parse_level(level_text)?;
        let mut session = Self {
            level_name: level_name.into(),
            mode,
            waves,
            wave_index: 0,
            funds: 0,
            score: 0,
            turn: 0,
            phase: Phase::PreWave,
            arena: Arena::new(),
            tower_queue: TurnQueue::empty(),
            enemy_queue: TurnQueue::empty(),
        };
        session.activate_wave(0);
        Ok(session)
    }

    /// Rebuilds a session from a snapshot plus the level text its
    /// `level_name` refers to.
    ///
    /// The level supplies the wave definitions; the snapshot's live entity
    /// rows replace anything the level loader would have staged, with life
    /// values taken from the save.
    ///
    /// # Errors
    ///
    /// [`SnapshotError`] when the level fails to parse, the saved wave
    /// index does not exist, or a saved entity cannot be placed.
    pub fn restore(
        snapshot: &Snapshot,
        level_text: &str,
        mode: GameMode,
    ) -> Result<Self, SnapshotError> {
        let waves = level::parse_level(level_text)?;
        if snapshot.wave_index >= waves.len() {
            return Err(SnapshotError::WaveOutOfRange {
                index: snapshot.wave_index,
            });
        }
        let mut session = Self {
            level_name: snapshot.level_name.clone(),
            mode,
            waves,
            wave_index: snapshot.wave_index,
            funds: snapshot.funds,
            score: snapshot.score,
            turn: 0,
            phase: Phase::PreWave,
            arena: Arena::new(),
            tower_queue: TurnQueue::empty(),
            enemy_queue: TurnQueue::empty(),
        };
        for tower in &snapshot.towers {
            let id = session.arena.place_tower(tower.kind, tower.position)?;
            if let Some(placed) = session.arena.tower_mut(id) {
                placed.life = tower.life;
            }
        }
        for enemy in &snapshot.enemies {
            let id = session.arena.spawn_enemy(enemy.kind, enemy.position)?;
            if let Some(spawned) = session.arena.enemy_mut(id) {
                spawned.life = enemy.life;
            }
        }
        if !snapshot.pre_wave {
            session.enter_towers_attacking();
        }
        Ok(session)
    }

    /// Captures the session in snapshot form.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level_name: self.level_name.clone(),
            wave_index: self.wave_index,
            funds: self.funds,
            score: self.score,
            pre_wave: self.phase == Phase::PreWave,
            towers: self
                .arena
                .towers()
                .map(|tower| SavedTower {
                    kind: tower.kind,
                    position: tower.position,
                    life: tower.life,
                })
                .collect(),
            enemies: self
                .arena
                .enemies()
                .map(|enemy| SavedEnemy {
                    kind: enemy.kind,
                    position: enemy.position,
                    life: enemy.life,
                })
                .collect(),
        }
    }

    // =========================================================================
    // Tick loop
    // =========================================================================

    /// Advances the simulation by one tick.
    ///
    /// Resolves any projectile the gate reports landed, drives the current
    /// phase (dispatching at most up to the next pacing boundary), performs
    /// at most one phase transition, handles the wave boundary and advances
    /// the context clock.
    pub fn advance(&mut self, ctx: &mut SimContext, gate: &dyn SettleGate) {
        self.resolve_landed_projectiles(gate);
        match self.phase {
            Phase::PreWave | Phase::Victory | Phase::GameOver => {}
            Phase::TowersAttacking => self.advance_towers_attacking(ctx, gate),
            Phase::EnemiesAttacking => self.advance_enemies_attacking(gate),
            Phase::EnemiesMoving => {
                if self.all_enemies_settled(gate) {
                    self.enter_towers_attacking();
                }
            }
        }
        self.check_wave_boundary(ctx);
        ctx.advance_tick();
    }

    fn resolve_landed_projectiles(&mut self, gate: &dyn SettleGate) {
        let landed: Vec<ProjectileId> = self
            .arena
            .projectile_ids()
            .filter(|&id| gate.projectile_landed(id))
            .collect();
        for id in landed {
            self.score += u64::from(combat::resolve_projectile(&mut self.arena, id));
        }
    }

    /// Towers act one after another while nothing is pending: a projectile
    /// in flight or an unsettled enemy pauses the queue until resolved.
    fn advance_towers_attacking(&mut self, ctx: &SimContext, gate: &dyn SettleGate) {
        while !self.arena.has_projectiles() && self.all_enemies_settled(gate) {
            match self.tower_queue.next_actor() {
                Some(tower) => combat::tower_act(&mut self.arena, tower, ctx.tick()),
                None => break,
            }
        }
        if self.tower_queue.is_exhausted()
            && !self.arena.has_projectiles()
            && self.all_enemies_settled(gate)
        {
            self.enter_enemies_attacking();
        }
    }

    /// Enemies act one after another once the previous strike has visually
    /// settled on both sides.
    fn advance_enemies_attacking(&mut self, gate: &dyn SettleGate) {
        while self.all_enemies_settled(gate) && self.all_towers_settled(gate) {
            match self.enemy_queue.next_actor() {
                Some(enemy) => combat::enemy_act(&mut self.arena, enemy),
                None => break,
            }
        }
        if self.enemy_queue.is_exhausted()
            && self.all_enemies_settled(gate)
            && self.all_towers_settled(gate)
        {
            self.enter_enemies_moving();
        }
    }

    fn all_enemies_settled(&self, gate: &dyn SettleGate) -> bool {
        self.arena.enemy_ids().all(|id| gate.enemy_settled(id))
    }

    fn all_towers_settled(&self, gate: &dyn SettleGate) -> bool {
        self.arena.tower_ids().all(|id| gate.tower_settled(id))
    }

    fn enter_towers_attacking(&mut self) {
        self.phase = Phase::TowersAttacking;
        self.turn += 1;
        self.tower_queue = TurnQueue::capture(self.arena.tower_ids());
        debug!(phase = %self.phase, turn = self.turn, "phase entered");
    }

    fn enter_enemies_attacking(&mut self) {
        self.phase = Phase::EnemiesAttacking;
        self.enemy_queue = TurnQueue::capture(self.arena.enemy_ids());
        debug!(phase = %self.phase, "phase entered");
    }

    /// The movement sweep runs on entry; the phase then only waits for the
    /// moves to settle.
    fn enter_enemies_moving(&mut self) {
        self.phase = Phase::EnemiesMoving;
        combat::run_movement_phase(&mut self.arena);
        debug!(phase = %self.phase, "phase entered");
    }

    /// Wave boundary: the live enemy collection emptied outside the
    /// pre-wave and terminal states.
    fn check_wave_boundary(&mut self, ctx: &mut SimContext) {
        if self.phase == Phase::PreWave || self.phase.is_terminal() {
            return;
        }
        if self.arena.enemy_count() > 0 {
            return;
        }
        match self.mode {
            GameMode::Endless => {
                let index = self.wave_index + 1;
                let generated =
                    wave::generate_wave(u32::try_from(index).unwrap_or(u32::MAX), ctx.rng());
                self.waves.push(generated);
                self.activate_wave(index);
                // Endless waves roll straight into combat: no pre-wave pause.
                self.enter_towers_attacking();
            }
            GameMode::Scripted => {
                if self.wave_index + 1 < self.waves.len() {
                    self.activate_wave(self.wave_index + 1);
                    self.phase = Phase::PreWave;
                    self.tower_queue = TurnQueue::empty();
                    self.enemy_queue = TurnQueue::empty();
                    debug!(wave = self.wave_index, "returning to pre-wave");
                } else {
                    self.phase = Phase::Victory;
                    debug!("all waves cleared");
                }
            }
        }
    }

    /// Makes the wave at `index` current: grants its income and stages its
    /// enemies.
    fn activate_wave(&mut self, index: usize) {
        let Some(wave) = self.waves.get(index).cloned() else {
            return;
        };
        self.wave_index = index;
        self.funds += wave.income;
        for spawn in wave.spawns {
            if let Err(err) = self.arena.spawn_enemy(spawn.kind, spawn.position) {
                warn!(%err, kind = ?spawn.kind, "dropping unspawnable wave enemy");
            }
        }
        debug!(wave = index, funds = self.funds, "wave activated");
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Starts the current wave. Valid only while waiting in the pre-wave
    /// state.
    ///
    /// # Errors
    ///
    /// [`CommandError::WaveInProgress`] in any other phase.
    pub fn start_wave(&mut self) -> Result<(), CommandError> {
        if self.phase != Phase::PreWave {
            return Err(CommandError::WaveInProgress);
        }
        self.enter_towers_attacking();
        Ok(())
    }

    /// Buys and places a tower, deducting its cost.
    ///
    /// # Errors
    ///
    /// [`CommandError::InsufficientFunds`] or a placement rejection; funds
    /// and the arena are untouched on failure.
    pub fn buy_tower(&mut self, kind: TowerKind, pos: TilePos) -> Result<TowerId, CommandError> {
        let cost = kind.cost();
        if self.funds < cost {
            warn!(?kind, %pos, "purchase rejected: insufficient funds");
            return Err(CommandError::InsufficientFunds {
                needed: cost,
                available: self.funds,
            });
        }
        let id = self.arena.place_tower(kind, pos)?;
        self.funds -= cost;
        Ok(id)
    }

    /// Sells the tower on `pos`, refunding its cost. Returns the refund.
    ///
    /// # Errors
    ///
    /// [`CommandError::NoTowerAt`] when the tile holds no tower.
    pub fn sell_tower(&mut self, pos: TilePos) -> Result<i64, CommandError> {
        let id = self.arena.tower_at(pos).ok_or(CommandError::NoTowerAt(pos))?;
        let Some(tower) = self.arena.remove_tower(id) else {
            return Err(CommandError::NoTowerAt(pos));
        };
        self.funds += tower.cost;
        Ok(tower.cost)
    }

    /// Upgrades the tower on `pos` along its upgrade path, deducting only
    /// the cost difference. The upgraded tower starts at full life.
    ///
    /// # Errors
    ///
    /// [`CommandError::NoTowerAt`], [`CommandError::NoUpgrade`] or
    /// [`CommandError::InsufficientFunds`]; the original tower is untouched
    /// on failure.
    pub fn upgrade_tower(&mut self, pos: TilePos) -> Result<TowerId, CommandError> {
        let id = self.arena.tower_at(pos).ok_or(CommandError::NoTowerAt(pos))?;
        let Some(tower) = self.arena.tower(id) else {
            return Err(CommandError::NoTowerAt(pos));
        };
        let current = tower.kind;
        let target = current.upgrade_target().ok_or(CommandError::NoUpgrade(current))?;
        let price = target.cost() - tower.cost;
        if self.funds < price {
            warn!(?current, ?target, "upgrade rejected: insufficient funds");
            return Err(CommandError::InsufficientFunds {
                needed: price,
                available: self.funds,
            });
        }

        let _ = self.arena.remove_tower(id);
        match self.arena.place_tower(target, pos) {
            Ok(upgraded) => {
                self.funds -= price;
                Ok(upgraded)
            }
            Err(err) => {
                // The tile was just freed, so this is unreachable in
                // practice; revert rather than leave a hole in the wall.
                let _ = self.arena.place_tower(current, pos);
                Err(err.into())
            }
        }
    }

    /// Ends the game in defeat.
    ///
    /// No rule in the core triggers defeat on its own; this is the
    /// extension point an outer layer wires its losing condition to.
    pub fn trigger_defeat(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = Phase::GameOver;
            debug!("defeat triggered");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Name of the level the session was created from.
    #[must_use]
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Scripted or endless.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Index of the current wave.
    #[must_use]
    pub const fn wave_index(&self) -> usize {
        self.wave_index
    }

    /// Funds available for building.
    #[must_use]
    pub const fn funds(&self) -> i64 {
        self.funds
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Completed turn count (one per full combat cycle).
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The session's current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Read access to the entity tables.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the entity tables, for setup and tests. Avoid
    /// mutating mid-tick; commands and `advance` are the normal paths.
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}

// =============================================================================
// Tests
// =============================================================================
