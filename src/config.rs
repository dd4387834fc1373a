//! Tunable puzzle parameters.

use std::ops::Range;
use std::time::Duration;

use crate::error::PuzzleError;
use crate::grid::MIN_SIZE;

/// Default edge length of a new puzzle.
const DEFAULT_SIZE: usize = 3;
/// Animation steps per quarter turn.
const DEFAULT_STEP_COUNT: u32 = 8;
/// Delay between animation steps of a turn the user asked for.
const DEFAULT_TURN_INTERVAL: Duration = Duration::from_millis(40);
/// Delay between animation steps of scramble and undo turns.
const DEFAULT_SCRIPT_INTERVAL: Duration = Duration::from_millis(20);

/// Parameters a [`Puzzle`](crate::puzzle::Puzzle) is built with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Cubies along each edge
    pub size: usize,
    /// Animation steps per quarter turn
    pub step_count: u32,
    /// Tick interval for manual turns
    pub turn_interval: Duration,
    /// Tick interval for scripted (scramble/undo) turns
    pub script_interval: Duration,
    /// Range the default scramble length is drawn from
    pub scramble_turns: Range<usize>,
    /// Seed for scramble randomness; drawn from the OS when `None`
    pub seed: Option<u64>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            step_count: DEFAULT_STEP_COUNT,
            turn_interval: DEFAULT_TURN_INTERVAL,
            script_interval: DEFAULT_SCRIPT_INTERVAL,
            scramble_turns: 30..50,
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Default configuration for a puzzle of the given size.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Checks every parameter once, before anything is built.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.size < MIN_SIZE {
            return Err(PuzzleError::SizeTooSmall { size: self.size });
        }
        if self.step_count == 0 {
            return Err(PuzzleError::ZeroStepCount);
        }
        if self.scramble_turns.is_empty() {
            return Err(PuzzleError::EmptyScrambleRange {
                min: self.scramble_turns.start,
                max: self.scramble_turns.end,
            });
        }
        Ok(())
    }
}
