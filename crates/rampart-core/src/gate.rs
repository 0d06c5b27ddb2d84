//! Presentation gate: the single channel through which animation pacing
//! reaches the simulation.
//!
//! The phase machine advances only when the entities involved have visually
//! settled, but the core itself knows nothing about animations or wall-clock
//! time. Instead it asks a [`SettleGate`] before dispatching the next action
//! or leaving a phase. A presentation layer answers from its animation
//! state; headless callers pass [`AlwaysSettled`] and the simulation runs at
//! full speed with identical semantics.

use crate::entity::{EnemyId, ProjectileId, TowerId};

/// Answers "has this entity finished presenting its last action?".
///
/// All methods default to `true`, so an implementation only overrides the
/// signals it actually animates.
pub trait SettleGate {
    /// True when the enemy's last dispatched action has played out.
    fn enemy_settled(&self, id: EnemyId) -> bool {
        let _ = id;
        true
    }

    /// True when the tower's last dispatched action has played out.
    fn tower_settled(&self, id: TowerId) -> bool {
        let _ = id;
        true
    }

    /// True when the projectile has visually reached its target and its
    /// effect should be applied.
    fn projectile_landed(&self, id: ProjectileId) -> bool {
        let _ = id;
        true
    }
}

/// No-op gate for headless execution: everything is always settled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSettled;

impl SettleGate for AlwaysSettled {}
