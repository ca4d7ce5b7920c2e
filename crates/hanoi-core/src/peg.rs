use crate::error::PegIndexError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disk size. Larger value = larger disk.
pub type Disk = u8;

/// One of the three pegs.
///
/// Serialized as its index (0, 1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum Peg {
    Left,
    Middle,
    Right,
}

impl Peg {
    /// All pegs in index order
    pub const ALL: [Peg; 3] = [Peg::Left, Peg::Middle, Peg::Right];

    /// Zero-based index
    pub fn index(self) -> usize {
        match self {
            Peg::Left => 0,
            Peg::Middle => 1,
            Peg::Right => 2,
        }
    }

    /// Convert a raw index, `None` if out of range
    pub fn from_index(index: usize) -> Option<Peg> {
        Self::try_from(index).ok()
    }

    /// The peg that is neither `self` nor `other`.
    ///
    /// When both are the same peg, the next peg to the right (wrapping) is
    /// returned.
    pub fn third(self, other: Peg) -> Peg {
        if self == other {
            return self.next();
        }
        Peg::ALL[3 - self.index() - other.index()]
    }

    /// Next peg to the right, wrapping around
    pub fn next(self) -> Peg {
        Peg::ALL[(self.index() + 1) % 3]
    }

    /// Next peg to the left, wrapping around
    pub fn prev(self) -> Peg {
        Peg::ALL[(self.index() + 2) % 3]
    }
}

impl From<Peg> for usize {
    fn from(peg: Peg) -> usize {
        peg.index()
    }
}

impl TryFrom<usize> for Peg {
    type Error = PegIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Peg::Left),
            1 => Ok(Peg::Middle),
            2 => Ok(Peg::Right),
            other => Err(PegIndexError(other)),
        }
    }
}

/// Displayed 1-based, the way a player counts pegs.
impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// Top disk of `from` goes onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Peg,
    pub to: Peg,
}

impl Move {
    pub fn new(from: Peg, to: Peg) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
