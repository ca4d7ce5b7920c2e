//! Property-based tests for the game state and solver.
//!
//! Random move sequences (legal and illegal) drive the state into arbitrary
//! reachable positions; the stacking invariants must hold at every point.

use hanoi_core::{min_moves, GameState, Peg, Solver};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_peg()(index in 0..3usize) -> Peg {
        Peg::from_index(index).unwrap()
    }
}

fn assert_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let mut seen: Vec<u8> = state.pegs().iter().flatten().copied().collect();
    seen.sort_unstable();
    let expected: Vec<u8> = (1..=state.disk_count()).collect();
    prop_assert_eq!(seen, expected, "every disk exactly once");

    for peg in Peg::ALL {
        let stack = state.peg(peg);
        prop_assert!(
            stack.windows(2).all(|w| w[0] > w[1]),
            "peg {} not decreasing: {:?}",
            peg,
            stack
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_attempt(
        disks in 3..=8usize,
        attempts in prop::collection::vec((arbitrary_peg(), arbitrary_peg()), 0..200),
    ) {
        let mut state = GameState::new(disks);
        assert_invariants(&state)?;

        for (from, to) in attempts {
            let before = state.clone();
            match state.apply_move(from, to) {
                Ok(outcome) => {
                    prop_assert_eq!(state.move_count(), before.move_count() + 1);
                    prop_assert_eq!(state.peg(from).len() + 1, before.peg(from).len());
                    prop_assert_eq!(state.peg(to).len(), before.peg(to).len() + 1);
                    prop_assert_eq!(state.top_disk(to), Some(outcome.disk));
                    prop_assert_eq!(outcome.won, state.check_win());
                }
                Err(_) => {
                    prop_assert_eq!(&state, &before);
                }
            }
            assert_invariants(&state)?;
        }
    }

    #[test]
    fn valid_move_matches_rules(
        attempts in prop::collection::vec((arbitrary_peg(), arbitrary_peg()), 0..60),
        from in arbitrary_peg(),
        to in arbitrary_peg(),
    ) {
        let mut state = GameState::new(5);
        for (f, t) in attempts {
            let _ = state.apply_move(f, t);
        }

        let expected = match (state.top_disk(from), state.top_disk(to)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(a), Some(b)) => a < b,
        };
        prop_assert_eq!(state.is_valid_move(from, to), expected);
    }

    #[test]
    fn win_iff_right_peg_full(
        attempts in prop::collection::vec((arbitrary_peg(), arbitrary_peg()), 0..300),
    ) {
        let mut state = GameState::new(3);
        for (f, t) in attempts {
            let _ = state.apply_move(f, t);
            prop_assert_eq!(
                state.check_win(),
                state.peg(Peg::Right).len() == state.disk_count() as usize
            );
        }
    }

    #[test]
    fn hints_always_reach_the_goal(
        disks in 3..=8usize,
        attempts in prop::collection::vec((arbitrary_peg(), arbitrary_peg()), 0..100),
    ) {
        let mut state = GameState::new(disks);
        for (f, t) in attempts {
            let _ = state.apply_move(f, t);
        }

        let solver = Solver::new();
        let budget = min_moves(state.disk_count());
        let mut used = 0;
        while let Some(mv) = solver.hint(&state) {
            prop_assert!(state.apply_move(mv.from, mv.to).is_ok());
            used += 1;
            prop_assert!(used <= budget, "hint took more than 2^n - 1 moves");
        }
        prop_assert!(state.check_win());
    }

    #[test]
    fn solution_between_any_pegs_is_optimal_length(
        n in 0..=10u8,
        from in arbitrary_peg(),
        to in arbitrary_peg(),
    ) {
        prop_assume!(from != to);
        let aux = from.third(to);
        let moves: Vec<_> = Solver::new().solve(n, from, to, aux).collect();
        prop_assert_eq!(moves.len() as u64, min_moves(n));
    }
}

#[test]
fn solution_replays_from_canonical_start() {
    for n in 3..=8u8 {
        let mut state = GameState::new(n as usize);
        for mv in Solver::new().solve(n, Peg::Left, Peg::Right, Peg::Middle) {
            assert!(state.apply_move(mv.from, mv.to).is_ok(), "{} failed", mv);
        }
        assert!(state.check_win());
        assert_eq!(state.move_count(), min_moves(n));
        assert!(state.peg(Peg::Left).is_empty());
        assert!(state.peg(Peg::Middle).is_empty());
    }
}

#[test]
fn three_disk_example_ends_on_right_peg() {
    let mut state = GameState::new(3);
    for mv in Solver::new().solve(3, Peg::Left, Peg::Right, Peg::Middle) {
        state.apply_move(mv.from, mv.to).unwrap();
    }
    assert_eq!(state.pegs(), &[vec![], vec![], vec![3, 2, 1]]);
}
