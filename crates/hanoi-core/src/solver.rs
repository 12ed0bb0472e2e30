//! Recursive three-rod Hanoi move generator.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Upper bound on the disc count accepted by the solver. The full
/// `2^n - 1` move list is materialized eagerly.
pub const MAX_SOLVER_DISCS: usize = 24;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("rod index {index} is out of range (expected 0, 1 or 2)")]
    InvalidRod { index: usize },

    #[error("source and destination are both rod {rod}")]
    SameRod { rod: Rod },

    #[error("{discs} discs exceeds the solver limit of {max}")]
    TooManyDiscs { discs: usize, max: usize },

    #[error("motion parameter {name} = {value} would never finish a flight")]
    InvalidMotion { name: &'static str, value: f64 },
}

/// One of the three rods on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rod(u8);

impl Rod {
    pub const LEFT: Rod = Rod(0);
    pub const MIDDLE: Rod = Rod(1);
    pub const RIGHT: Rod = Rod(2);

    pub const ALL: [Rod; 3] = [Rod::LEFT, Rod::MIDDLE, Rod::RIGHT];

    pub fn new(index: usize) -> Result<Self, SolveError> {
        match index {
            0..=2 => Ok(Rod(index as u8)),
            _ => Err(SolveError::InvalidRod { index }),
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The rod that is neither `a` nor `b`, or `None` when they are the
    /// same rod.
    ///
    /// Uses `3 - a - b`, which only holds because the indices are exactly
    /// {0, 1, 2} and sum to 3.
    pub const fn auxiliary(a: Rod, b: Rod) -> Option<Rod> {
        if a.0 == b.0 {
            return None;
        }
        Some(Rod(3 - a.0 - b.0))
    }
}

impl TryFrom<usize> for Rod {
    type Error = SolveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Rod::new(index)
    }
}

impl fmt::Display for Rod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Move the topmost disc of `from` onto `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Rod,
    pub to: Rod,
}

impl Move {
    pub const fn new(from: Rod, to: Rod) -> Self {
        Self { from, to }
    }

    /// Build a move from raw indices, rejecting out-of-range rods.
    pub fn from_indices(from: usize, to: usize) -> Result<Self, SolveError> {
        Ok(Self::new(Rod::new(from)?, Rod::new(to)?))
    }

    /// +1 when the disc travels rightward, -1 leftward, 0 in place.
    pub fn direction(&self) -> i8 {
        match self.to.cmp(&self.from) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From rod {} to rod {}", self.from, self.to)
    }
}

/// Solve `discs` discs from `from` to `to`.
pub fn generate_moves(discs: usize, from: Rod, to: Rod) -> Result<Vec<Move>, SolveError> {
    let mut moves = Vec::new();
    generate_moves_with(discs, from, to, |m| moves.push(m))?;
    Ok(moves)
}

/// Like [`generate_moves`], but hands each move to `observer` in order
/// instead of collecting them.
pub fn generate_moves_with<F>(
    discs: usize,
    from: Rod,
    to: Rod,
    mut observer: F,
) -> Result<(), SolveError>
where
    F: FnMut(Move),
{
    if from == to {
        return Err(SolveError::SameRod { rod: from });
    }
    if discs > MAX_SOLVER_DISCS {
        return Err(SolveError::TooManyDiscs {
            discs,
            max: MAX_SOLVER_DISCS,
        });
    }
    move_stack(discs, from, to, &mut observer);
    Ok(())
}

fn move_stack<F: FnMut(Move)>(n: usize, from: Rod, to: Rod, observer: &mut F) {
    match n {
        0 => {}
        1 => observer(Move::new(from, to)),
        _ => {
            // Every recursive call keeps `from` and `to` distinct.
            let Some(aux) = Rod::auxiliary(from, to) else {
                return;
            };
            move_stack(n - 1, from, aux, observer);
            observer(Move::new(from, to));
            move_stack(n - 1, aux, to, observer);
        }
    }
}
