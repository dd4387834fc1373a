//! Quarter turns of a slice and the solved check.
//!
//! A turn never moves a cubie. It redistributes color snapshots across the
//! slice as if the cubies had swapped places, then spins every cubie's
//! facelets in place to match.

use std::fmt;

use crate::cube::{Axis, CubieId, Direction, FaceletColors};
use crate::grid::{PuzzleGrid, SliceId};

/// A quarter turn of one slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Turn {
    pub slice: SliceId,
    pub direction: Direction,
}

impl Turn {
    pub fn new(slice: SliceId, direction: Direction) -> Self {
        Self { slice, direction }
    }

    pub fn axis(&self) -> Axis {
        self.slice.axis
    }

    /// The turn that undoes this one.
    pub fn inverse(self) -> Self {
        Self {
            slice: self.slice,
            direction: -self.direction,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.slice, self.direction)
    }
}

/// Applies a quarter turn to the grid's color state.
///
/// All colors are read from a snapshot taken before any cubie is written, so
/// no cubie ever reads a color another cubie already received in this turn.
///
/// # Panics
/// If `turn.slice.layer` is not below the grid size.
pub fn apply(grid: &mut PuzzleGrid, turn: Turn) {
    let n = grid.size();
    let axis = turn.axis();
    let (u_axis, v_axis) = axis.slice_plane();
    let members: Vec<CubieId> = grid.slice(turn.slice).members().to_vec();

    let mut snapshot = vec![FaceletColors::home(); n * n];
    for &id in &members {
        let cubie = &grid.cubies()[id.0];
        let (u, v) = (cubie.layer(u_axis), cubie.layer(v_axis));
        snapshot[u * n + v] = cubie.colors();
    }

    for &id in &members {
        let cubie = grid.cubie_mut(id);
        let (u, v) = (cubie.layer(u_axis), cubie.layer(v_axis));
        // cell whose contents land on (u, v) after a quarter turn
        let (source_u, source_v) = match turn.direction {
            Direction::Positive => (n - 1 - v, u),
            Direction::Negative => (v, n - 1 - u),
        };
        cubie.assign_colors(snapshot[source_u * n + source_v]);
        cubie.rotate_in_place(axis, turn.direction);
    }

    log::trace!("applied {turn}");
}

/// Whether every cubie carries exactly the same six-facelet snapshot.
pub fn is_solved(grid: &PuzzleGrid) -> bool {
    let mut cubies = grid.cubies().iter();
    let Some(first) = cubies.next() else {
        return true;
    };
    let reference = first.colors();
    cubies.all(|cubie| cubie.colors() == reference)
}
