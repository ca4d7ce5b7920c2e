use crate::peg::{Disk, Peg};
use thiserror::Error;

/// A move that breaks the stacking rules.
///
/// Always recoverable: the state is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("peg {from} has no disk to move")]
    EmptySource { from: Peg },

    #[error("disk {disk} cannot rest on disk {onto} (peg {to})")]
    LargerOnSmaller { disk: Disk, onto: Disk, to: Peg },
}

/// Raw peg index outside 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("peg index {0} is out of range (expected 0, 1 or 2)")]
pub struct PegIndexError(pub usize);
