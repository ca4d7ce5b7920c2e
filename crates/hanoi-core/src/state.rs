use crate::error::InvalidMove;
use crate::peg::{Disk, Peg};
use crate::solver::min_moves;
use serde::Serialize;
use tracing::{debug, info};

/// Smallest playable tower
pub const MIN_DISKS: u8 = 3;

/// Largest playable tower
pub const MAX_DISKS: u8 = 8;

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// Size of the disk that moved
    pub disk: Disk,
    pub from: Peg,
    pub to: Peg,
    /// Whether this move completed the puzzle
    pub won: bool,
}

/// Result of clicking a peg during manual play.
///
/// Front ends map these onto their own cues (tap, drop, shake, fanfare).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened (auto-solve running, or empty peg with no selection)
    Ignored,
    /// The peg is now selected
    Selected(Peg),
    /// The previously selected peg was clicked again
    Deselected(Peg),
    /// The selected peg's top disk moved onto the clicked peg
    Moved(MoveOutcome),
    /// The move from the selected peg was illegal; selection is cleared anyway
    Rejected(InvalidMove),
}

/// The puzzle: three pegs, the move counter, and manual-play selection.
///
/// Every disk `1..=disk_count` sits on exactly one peg, and each peg is
/// strictly decreasing from bottom to top. Only legal moves are ever applied,
/// so both hold at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Bottom of each stack first
    pegs: [Vec<Disk>; 3],
    disk_count: u8,
    move_count: u64,
    min_moves: u64,
    selected_peg: Option<Peg>,
    auto_solving: bool,
    /// Bumped by every auto-solve start; survives resets
    #[serde(skip)]
    auto_run: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(MIN_DISKS as usize)
    }
}

impl GameState {
    /// Create a puzzle in the canonical start position
    pub fn new(disk_count: usize) -> Self {
        let mut state = Self {
            pegs: [Vec::new(), Vec::new(), Vec::new()],
            disk_count: MIN_DISKS,
            move_count: 0,
            min_moves: 0,
            selected_peg: None,
            auto_solving: false,
            auto_run: 0,
        };
        state.reset(disk_count);
        state
    }

    /// Start over with `disk_count` disks on the left peg.
    ///
    /// Out-of-range counts are clamped into `MIN_DISKS..=MAX_DISKS`.
    pub fn reset(&mut self, disk_count: usize) {
        let n = disk_count.clamp(MIN_DISKS as usize, MAX_DISKS as usize) as u8;

        for peg in &mut self.pegs {
            peg.clear();
        }
        self.pegs[Peg::Left.index()].extend((1..=n).rev());

        self.disk_count = n;
        self.move_count = 0;
        self.min_moves = min_moves(n);
        self.selected_peg = None;
        self.auto_solving = false;

        info!(
            disks = n,
            requested = disk_count,
            min_moves = self.min_moves,
            "new game"
        );
    }

    /// Back to the start position with the current disk count
    pub(crate) fn restart(&mut self) {
        self.reset(self.disk_count as usize);
    }

    pub(crate) fn set_auto_solving(&mut self, on: bool) {
        self.auto_solving = on;
    }

    /// Mark a new auto-solve run as started and return its id
    pub(crate) fn start_auto_run(&mut self) -> u64 {
        self.auto_run += 1;
        self.auto_solving = true;
        self.auto_run
    }

    /// Id of the most recent auto-solve run
    pub(crate) fn auto_run(&self) -> u64 {
        self.auto_run
    }

    /// Get all three stacks, bottom first
    pub fn pegs(&self) -> &[Vec<Disk>; 3] {
        &self.pegs
    }

    /// Get one stack, bottom first
    pub fn peg(&self, peg: Peg) -> &[Disk] {
        &self.pegs[peg.index()]
    }

    /// Smallest disk on a peg, if any
    pub fn top_disk(&self, peg: Peg) -> Option<Disk> {
        self.pegs[peg.index()].last().copied()
    }

    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Optimal number of moves for this tower (2^n - 1)
    pub fn min_moves(&self) -> u64 {
        self.min_moves
    }

    pub fn selected_peg(&self) -> Option<Peg> {
        self.selected_peg
    }

    pub fn is_auto_solving(&self) -> bool {
        self.auto_solving
    }

    /// Check a move against the stacking rules
    pub fn is_valid_move(&self, from: Peg, to: Peg) -> bool {
        self.check_move(from, to).is_ok()
    }

    fn check_move(&self, from: Peg, to: Peg) -> Result<Disk, InvalidMove> {
        let disk = self
            .top_disk(from)
            .ok_or(InvalidMove::EmptySource { from })?;

        match self.top_disk(to) {
            Some(onto) if onto <= disk => Err(InvalidMove::LargerOnSmaller { disk, onto, to }),
            _ => Ok(disk),
        }
    }

    /// Move the top disk of `from` onto `to`.
    ///
    /// On success the move counter goes up by one and the selection is
    /// cleared. On failure nothing changes.
    pub fn apply_move(&mut self, from: Peg, to: Peg) -> Result<MoveOutcome, InvalidMove> {
        let disk = match self.check_move(from, to) {
            Ok(disk) => disk,
            Err(err) => {
                debug!(%from, %to, error = %err, "move rejected");
                return Err(err);
            }
        };

        self.pegs[from.index()].pop();
        self.pegs[to.index()].push(disk);
        self.move_count += 1;
        self.selected_peg = None;

        let won = self.check_win();
        debug!(disk, %from, %to, moves = self.move_count, "disk moved");
        if won {
            info!(
                moves = self.move_count,
                min_moves = self.min_moves,
                auto = self.auto_solving,
                "puzzle solved"
            );
        }

        Ok(MoveOutcome {
            disk,
            from,
            to,
            won,
        })
    }

    /// All disks are on the right peg
    pub fn check_win(&self) -> bool {
        self.pegs[Peg::Right.index()].len() == self.disk_count as usize
    }

    /// Select a peg as the source of the next move.
    ///
    /// Refused (returns false) for an empty peg or while auto-solving.
    pub fn select(&mut self, peg: Peg) -> bool {
        if self.auto_solving || self.pegs[peg.index()].is_empty() {
            return false;
        }
        self.selected_peg = Some(peg);
        true
    }

    /// Clear the selection, returning what was selected
    pub fn deselect(&mut self) -> Option<Peg> {
        self.selected_peg.take()
    }

    /// Manual-play click on a peg.
    ///
    /// With nothing selected this selects the peg (if it has disks). Clicking
    /// the selected peg again deselects it. Clicking any other peg attempts
    /// the move, and the selection is cleared whether or not it succeeds.
    pub fn click(&mut self, peg: Peg) -> ClickOutcome {
        if self.auto_solving {
            return ClickOutcome::Ignored;
        }

        match self.selected_peg {
            None => {
                if self.select(peg) {
                    ClickOutcome::Selected(peg)
                } else {
                    ClickOutcome::Ignored
                }
            }
            Some(selected) if selected == peg => {
                self.selected_peg = None;
                ClickOutcome::Deselected(peg)
            }
            Some(selected) => {
                let outcome = match self.apply_move(selected, peg) {
                    Ok(moved) => ClickOutcome::Moved(moved),
                    Err(err) => ClickOutcome::Rejected(err),
                };
                self.selected_peg = None;
                outcome
            }
        }
    }

    /// Optimal moves as a percentage of moves made, `None` before any move
    pub fn efficiency(&self) -> Option<f64> {
        if self.move_count == 0 {
            None
        } else {
            Some(self.min_moves as f64 / self.move_count as f64 * 100.0)
        }
    }
}
