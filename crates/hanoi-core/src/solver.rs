//! Optimal solutions.
//!
//! [`Solver::solve`] expands the classic recursion (move n-1 disks aside, move
//! the largest, move n-1 disks back on top) with an explicit stack, so moves
//! come out one at a time and the caller decides when to apply them.

use crate::peg::{Disk, Move, Peg};
use crate::state::GameState;
use std::iter::FusedIterator;

/// Length of the optimal solution for `n` disks: 2^n - 1.
///
/// Saturates at `u64::MAX` for towers of 64 disks or more.
pub fn min_moves(n: u8) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Stateless solver, all state is per-call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Optimal move sequence taking `n` disks from `from` to `to` via `aux`.
    ///
    /// The sequence is lazy. Calling `solve` again (or cloning the returned
    /// iterator before consuming it) enumerates it again from the start.
    pub fn solve(&self, n: u8, from: Peg, to: Peg, aux: Peg) -> Solution {
        Solution::new(n, from, to, aux)
    }

    /// Next move on the shortest path from `state` to all disks on the
    /// right peg, or `None` if the puzzle is already solved.
    ///
    /// Works from any legal position, not only positions on the canonical
    /// solution path.
    pub fn hint(&self, state: &GameState) -> Option<Move> {
        // location[d] = peg holding disk d
        let mut location = vec![Peg::Left; state.disk_count() as usize + 1];
        for peg in Peg::ALL {
            for &disk in state.peg(peg) {
                location[disk as usize] = peg;
            }
        }

        first_move(&location, state.disk_count(), Peg::Right)
    }
}

/// First move of the optimal plan that gathers disks `1..=k` on `target`.
///
/// If disk `k` is already there only the smaller disks matter. Otherwise the
/// smaller disks must first be gathered on the spare peg, and once they are,
/// disk `k` moves.
fn first_move(location: &[Peg], k: Disk, target: Peg) -> Option<Move> {
    if k == 0 {
        return None;
    }

    let at = location[k as usize];
    if at == target {
        return first_move(location, k - 1, target);
    }

    let spare = at.third(target);
    first_move(location, k - 1, spare).or(Some(Move::new(at, target)))
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Move `n` disks from `from` to `to` using `aux`
    Tower { n: u8, from: Peg, to: Peg, aux: Peg },
    /// Emit a single move
    Single(Move),
}

/// Lazy optimal solution produced by [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct Solution {
    stack: Vec<Frame>,
    remaining: u64,
}

impl Solution {
    fn new(n: u8, from: Peg, to: Peg, aux: Peg) -> Self {
        Self {
            stack: vec![Frame::Tower { n, from, to, aux }],
            remaining: min_moves(n),
        }
    }

    /// Moves not yet yielded
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for Solution {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Single(mv) => {
                    self.remaining -= 1;
                    return Some(mv);
                }
                Frame::Tower { n: 0, .. } => {}
                Frame::Tower { n: 1, from, to, .. } => {
                    self.remaining -= 1;
                    return Some(Move::new(from, to));
                }
                Frame::Tower { n, from, to, aux } => {
                    // pushed in reverse so the first half comes out first
                    self.stack.push(Frame::Tower {
                        n: n - 1,
                        from: aux,
                        to,
                        aux: from,
                    });
                    self.stack.push(Frame::Single(Move::new(from, to)));
                    self.stack.push(Frame::Tower {
                        n: n - 1,
                        from,
                        to: aux,
                        aux: to,
                    });
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Solution {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(solution: Solution) -> Vec<(usize, usize)> {
        solution.map(|m| (m.from.index(), m.to.index())).collect()
    }

    #[test]
    fn test_three_disk_sequence() {
        let moves = pairs(Solver::new().solve(3, Peg::Left, Peg::Right, Peg::Middle));
        assert_eq!(
            moves,
            vec![(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)]
        );
    }

    #[test]
    fn test_single_disk() {
        let moves = pairs(Solver::new().solve(1, Peg::Middle, Peg::Left, Peg::Right));
        assert_eq!(moves, vec![(1, 0)]);
    }

    #[test]
    fn test_zero_disks_is_empty() {
        let mut solution = Solver::new().solve(0, Peg::Left, Peg::Right, Peg::Middle);
        assert_eq!(solution.remaining(), 0);
        assert_eq!(solution.next(), None);
    }

    #[test]
    fn test_length_is_two_to_the_n_minus_one() {
        for n in 1..=12u8 {
            let solution = Solver::new().solve(n, Peg::Left, Peg::Right, Peg::Middle);
            assert_eq!(solution.size_hint().0 as u64, min_moves(n));
            assert_eq!(solution.count() as u64, min_moves(n), "n = {}", n);
        }
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut solution = Solver::new().solve(4, Peg::Left, Peg::Right, Peg::Middle);
        assert_eq!(solution.remaining(), 15);
        solution.next();
        solution.next();
        assert_eq!(solution.remaining(), 13);
        assert_eq!(solution.by_ref().count(), 13);
        assert_eq!(solution.remaining(), 0);
        assert_eq!(solution.next(), None);
    }

    #[test]
    fn test_restartable() {
        let solver = Solver::new();
        let first: Vec<Move> = solver.solve(5, Peg::Left, Peg::Right, Peg::Middle).collect();
        let second: Vec<Move> = solver.solve(5, Peg::Left, Peg::Right, Peg::Middle).collect();
        assert_eq!(first, second);

        let fresh = solver.solve(5, Peg::Left, Peg::Right, Peg::Middle);
        let copy = fresh.clone();
        assert_eq!(fresh.collect::<Vec<_>>(), copy.collect::<Vec<_>>());
    }

    #[test]
    fn test_min_moves() {
        assert_eq!(min_moves(0), 0);
        assert_eq!(min_moves(3), 7);
        assert_eq!(min_moves(8), 255);
        assert_eq!(min_moves(64), u64::MAX);
    }

    #[test]
    fn test_hint_from_start_follows_solution() {
        let state = GameState::new(4);
        let expected = Solver::new()
            .solve(4, Peg::Left, Peg::Right, Peg::Middle)
            .next();
        assert_eq!(Solver::new().hint(&state), expected);
    }

    #[test]
    fn test_hint_none_when_solved() {
        let mut state = GameState::new(3);
        for mv in Solver::new().solve(3, Peg::Left, Peg::Right, Peg::Middle) {
            state.apply_move(mv.from, mv.to).unwrap();
        }
        assert_eq!(Solver::new().hint(&state), None);
    }

    #[test]
    fn test_hint_recovers_from_detour() {
        let mut state = GameState::new(3);
        // smallest disk goes the wrong way first
        state.apply_move(Peg::Left, Peg::Middle).unwrap();

        let solver = Solver::new();
        while let Some(mv) = solver.hint(&state) {
            state.apply_move(mv.from, mv.to).unwrap();
            assert!(state.move_count() < 20, "hint loop did not converge");
        }
        assert!(state.check_win());
        // one wasted move plus the undo of it at most
        assert!(state.move_count() <= state.min_moves() + 2);
    }
}
