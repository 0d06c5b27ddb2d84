//! Setup utilities shared by the test suites.

use crate::context::SimContext;
use crate::gate::AlwaysSettled;
use crate::phase::Phase;
use crate::session::{GameMode, GameSession};

/// Builds a one-wave level with the given income and no scripted enemies.
pub fn single_wave_level(income: i64) -> String {
    format!("{income}\n")
}

/// Creates a scripted session whose only wave grants `funds`.
pub fn session_with_funds(funds: i64) -> GameSession {
    GameSession::from_level("test", &single_wave_level(funds), GameMode::Scripted)
        .expect("test level must parse")
}

/// Advances the session `ticks` times with the headless gate.
pub fn run_ticks(session: &mut GameSession, ctx: &mut SimContext, ticks: usize) {
    for _ in 0..ticks {
        session.advance(ctx, &AlwaysSettled);
    }
}

/// Advances until the session reaches `target`, up to `max_ticks`.
/// Returns true when the phase was reached.
pub fn run_until_phase(
    session: &mut GameSession,
    ctx: &mut SimContext,
    target: Phase,
    max_ticks: usize,
) -> bool {
    for _ in 0..max_ticks {
        if session.phase() == target {
            return true;
        }
        session.advance(ctx, &AlwaysSettled);
    }
    session.phase() == target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_with_funds_grants_the_income() {
        let session = session_with_funds(120);
        assert_eq!(session.funds(), 120);
        assert_eq!(session.phase(), Phase::PreWave);
    }

    #[test]
    fn run_until_phase_reports_failure() {
        let mut session = session_with_funds(0);
        let mut ctx = SimContext::new(0);
        // Never started: the session stays pre-wave.
        assert!(!run_until_phase(
            &mut session,
            &mut ctx,
            Phase::Victory,
            5
        ));
    }
}
