//! Core of an interactive N×N×N cube puzzle.
//!
//! Tracks the color of every facelet, turns slices, turns pointer drags into
//! slice turns, schedules turn animations one at a time and keeps the history
//! needed to undo back to the last solved state. Drawing is left to the host,
//! which plugs in through [`gesture::Picker`], [`scheduler::SliceAnimator`]
//! and [`cube::FaceletView`].

pub mod camera;
pub mod config;
pub mod cube;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod moves;
pub mod puzzle;
pub mod ray_casting;
pub mod scene;
pub mod scheduler;
pub mod tracker;

pub use config::PuzzleConfig;
pub use cube::{Axis, Color, CubieId, Direction, Face, FaceletId};
pub use error::PuzzleError;
pub use grid::{PuzzleGrid, SliceId};
pub use moves::Turn;
pub use puzzle::{Puzzle, PuzzleEvent, ScriptKind};
