use crate::solver::{Solution, Solver};
use crate::peg::Peg;
use crate::state::{GameState, MoveOutcome};
use tracing::{info, warn};

/// Plays the optimal solution onto a [`GameState`], one move per [`step`].
///
/// The driver never waits. The caller applies a move, lets its presentation
/// catch up, and calls `step` again when it is ready. While the driver is
/// running the state reports `is_auto_solving()` and ignores manual clicks.
///
/// [`step`]: AutoSolve::step
#[derive(Debug, Clone)]
pub struct AutoSolve {
    moves: Solution,
    run: u64,
}

impl AutoSolve {
    /// Put the tower back in its start position and begin solving it.
    ///
    /// Returns `None` if an auto-solve is already running on this state.
    pub fn begin(state: &mut GameState) -> Option<Self> {
        if state.is_auto_solving() {
            return None;
        }

        state.restart();
        let run = state.start_auto_run();

        let moves = Solver::new().solve(state.disk_count(), Peg::Left, Peg::Right, Peg::Middle);
        info!(
            disks = state.disk_count(),
            moves = moves.remaining(),
            "auto-solve started"
        );

        Some(Self { moves, run })
    }

    /// Apply the next move.
    ///
    /// Returns `None` once the solution is exhausted, after a cancel, if a
    /// newer run has started on the state, or if the state no longer accepts
    /// the planned move. The auto-solving flag is cleared as soon as the last
    /// move lands.
    pub fn step(&mut self, state: &mut GameState) -> Option<MoveOutcome> {
        if !self.is_current(state) {
            return None;
        }

        let Some(mv) = self.moves.next() else {
            state.set_auto_solving(false);
            return None;
        };

        match state.apply_move(mv.from, mv.to) {
            Ok(outcome) => {
                if self.moves.remaining() == 0 {
                    state.set_auto_solving(false);
                    info!(moves = state.move_count(), "auto-solve finished");
                }
                Some(outcome)
            }
            Err(err) => {
                warn!(%mv, error = %err, "auto-solve stopped on an illegal move");
                state.set_auto_solving(false);
                None
            }
        }
    }

    /// Stop between moves, handing control back to manual play
    ///
    /// A driver left over from an earlier run leaves the state alone.
    pub fn cancel(self, state: &mut GameState) {
        if self.is_current(state) {
            info!(remaining = self.moves.remaining(), "auto-solve cancelled");
            state.set_auto_solving(false);
        }
    }

    fn is_current(&self, state: &GameState) -> bool {
        state.is_auto_solving() && state.auto_run() == self.run
    }

    /// Moves still to be applied
    pub fn remaining(&self) -> u64 {
        self.moves.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ClickOutcome;

    #[test]
    fn test_steps_to_win_with_single_count() {
        for n in 3..=8 {
            let mut state = GameState::new(n);
            let mut auto = AutoSolve::begin(&mut state).unwrap();
            assert!(state.is_auto_solving());

            let mut steps = 0u64;
            let mut last = None;
            while let Some(outcome) = auto.step(&mut state) {
                steps += 1;
                last = Some(outcome);
            }

            assert_eq!(steps, state.min_moves());
            assert_eq!(state.move_count(), state.min_moves());
            assert!(state.check_win());
            assert!(last.unwrap().won);
            assert!(!state.is_auto_solving());
            assert_eq!(auto.remaining(), 0);
        }
    }

    #[test]
    fn test_begin_restores_start_position() {
        let mut state = GameState::new(4);
        state.apply_move(Peg::Left, Peg::Middle).unwrap();
        state.select(Peg::Left);

        let auto = AutoSolve::begin(&mut state).unwrap();

        assert_eq!(state.move_count(), 0);
        assert_eq!(state.peg(Peg::Left), &[4, 3, 2, 1]);
        assert_eq!(state.selected_peg(), None);
        assert_eq!(auto.remaining(), 15);
    }

    #[test]
    fn test_second_begin_is_refused() {
        let mut state = GameState::new(3);
        let _auto = AutoSolve::begin(&mut state).unwrap();
        assert!(AutoSolve::begin(&mut state).is_none());
    }

    #[test]
    fn test_manual_input_ignored_between_steps() {
        let mut state = GameState::new(3);
        let mut auto = AutoSolve::begin(&mut state).unwrap();
        auto.step(&mut state);

        let before = state.clone();
        assert_eq!(state.click(Peg::Right), ClickOutcome::Ignored);
        assert_eq!(state, before);

        auto.step(&mut state);
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_cancel_returns_control() {
        let mut state = GameState::new(3);
        let mut auto = AutoSolve::begin(&mut state).unwrap();
        auto.step(&mut state);
        auto.cancel(&mut state);

        assert!(!state.is_auto_solving());
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.click(Peg::Left), ClickOutcome::Selected(Peg::Left));
    }

    #[test]
    fn test_reset_mid_solve_stops_driver() {
        let mut state = GameState::new(3);
        let mut auto = AutoSolve::begin(&mut state).unwrap();
        auto.step(&mut state);

        state.reset(5);
        assert_eq!(auto.step(&mut state), None);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_stale_driver_leaves_new_run_alone() {
        let mut state = GameState::new(3);
        let mut stale = AutoSolve::begin(&mut state).unwrap();
        stale.step(&mut state);

        state.reset(3);
        let mut fresh = AutoSolve::begin(&mut state).unwrap();

        assert_eq!(stale.step(&mut state), None);
        assert!(state.is_auto_solving());
        assert_eq!(state.move_count(), 0);

        stale.cancel(&mut state);
        assert!(state.is_auto_solving());

        let mut steps = 0;
        while fresh.step(&mut state).is_some() {
            steps += 1;
        }
        assert_eq!(steps, 7);
        assert!(state.check_win());
    }
}
