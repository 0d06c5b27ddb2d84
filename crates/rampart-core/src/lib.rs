//! # Rampart Core
//!
//! Turn-based tower defence simulation core for Rampart.
//!
//! This crate implements the whole game simulation with no rendering,
//! window or audio dependency: enemies advance along fixed rows toward the
//! defended boundary, player towers intercept them, and a phase machine
//! serializes every action into a presentable sequence.
//!
//! ## Architecture
//!
//! - **Arena** ([`arena::Arena`]): owner of the enemy/tower/projectile
//!   tables, the occupancy queries and the per-row orderings.
//! - **Combat** ([`combat`]): per-kind action dispatch, damage application,
//!   death effects and projectile resolution.
//! - **Phase machine** ([`phase`], driven by [`session::GameSession`]):
//!   towers attack, enemies attack, enemies move, one actor at a time.
//! - **Waves & economy** ([`wave`], [`session`]): scripted waves from level
//!   files, procedural waves in endless mode, funds and score.
//! - **External interface** ([`level`]): the level and snapshot text
//!   formats, parsed from and encoded to strings.
//!
//! The presentation layer connects through two seams only: it reads the
//! per-entity [`entity::ActionState`] signals the core emits, and it
//! answers pacing queries through [`gate::SettleGate`]. Headless callers
//! use [`gate::AlwaysSettled`] and get identical semantics at full speed.
//!
//! ## Usage
//!
//! ```
//! use rampart_core::{AlwaysSettled, GameMode, GameSession, SimContext};
//!
//! let level = "100\n0 3 S\n1 4 G\n";
//! let mut session = GameSession::from_level("intro", level, GameMode::Scripted).unwrap();
//! let mut ctx = SimContext::new(42);
//!
//! session.start_wave().unwrap();
//! for _ in 0..10 {
//!     session.advance(&mut ctx, &AlwaysSettled);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod combat;
pub mod context;
pub mod entity;
pub mod error;
pub mod gate;
pub mod grid;
pub mod level;
pub mod phase;
pub mod session;
pub mod wave;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use context::SimContext;
pub use entity::{ActionState, Enemy, EnemyId, EnemyKind, Projectile, ProjectileId, Tower, TowerId, TowerKind};
pub use error::{CommandError, LevelError, PlacementError, SnapshotError};
pub use gate::{AlwaysSettled, SettleGate};
pub use grid::{TilePos, GRID_COLUMNS, GRID_ROWS};
pub use level::Snapshot;
pub use phase::Phase;
pub use session::{GameMode, GameSession};
pub use wave::Wave;
