//! Errors reported while building a puzzle.
//!
//! Every operation on a built puzzle is total; only construction parameters
//! are validated.

/// Invalid construction parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("puzzle size must be at least 2, got {size}")]
    SizeTooSmall { size: usize },
    #[error("turn animation needs at least one step")]
    ZeroStepCount,
    #[error("scramble turn range {min}..{max} is empty")]
    EmptyScrambleRange { min: usize, max: usize },
}
