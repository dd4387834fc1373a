//! Serializes turns and steps their animation.
//!
//! At most one turn animates at a time. Requests arriving while a turn is in
//! flight are dropped rather than queued; scripted sequences wait for the
//! completion reported by [`TurnScheduler::tick`] before asking again.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use crate::config::PuzzleConfig;
use crate::cube::{Axis, CubieId};
use crate::grid::PuzzleGrid;
use crate::moves::{self, Turn};

/// Visually rotates a temporary group of cubies.
///
/// Purely cosmetic: the color state changes only once the last step has run.
pub trait SliceAnimator {
    /// Gathers the cubies of the turning slice into a temporary group.
    fn begin_group(&mut self, axis: Axis, cubies: &[CubieId]);

    /// Rotates the group by `angle` radians about `axis`.
    fn rotate_group(&mut self, axis: Axis, angle: f32);

    /// Dissolves the group, returning its cubies to their rest pose.
    fn end_group(&mut self);
}

/// Who asked for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnOrigin {
    /// A drag or an explicit request from the host
    Manual,
    /// A random turn from a scramble
    Scramble,
    /// A turn reversing recorded history
    Undo,
}

/// A turn whose animation is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveTurn {
    pub turn: Turn,
    pub origin: TurnOrigin,
    /// Animation steps already shown
    pub steps_done: u32,
    /// Delay the host timer should wait between steps
    pub interval: Duration,
}

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Animating(ActiveTurn),
}

/// A turn that finished animating and was applied to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletedTurn {
    pub turn: Turn,
    pub origin: TurnOrigin,
}

/// Mutual exclusion and step timing for turns.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    state: TurnState,
    step_count: u32,
    turn_interval: Duration,
    script_interval: Duration,
}

impl TurnScheduler {
    pub fn new(config: &PuzzleConfig) -> Self {
        Self {
            state: TurnState::Idle,
            step_count: config.step_count.max(1),
            turn_interval: config.turn_interval,
            script_interval: config.script_interval,
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TurnState::Idle)
    }

    /// Animation steps per quarter turn.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Starts animating `turn` if no other turn is in flight.
    ///
    /// Returns `false` and changes nothing when a turn is already animating.
    pub fn request(&mut self, turn: Turn, origin: TurnOrigin) -> bool {
        if let TurnState::Animating(active) = &self.state {
            log::debug!("dropped {turn} ({origin:?}): {} still turning", active.turn);
            return false;
        }
        let interval = match origin {
            TurnOrigin::Manual => self.turn_interval,
            TurnOrigin::Scramble | TurnOrigin::Undo => self.script_interval,
        };
        log::debug!("turning {turn} ({origin:?})");
        self.state = TurnState::Animating(ActiveTurn {
            turn,
            origin,
            steps_done: 0,
            interval,
        });
        true
    }

    /// Delay before the next [`tick`](Self::tick) is due, if a turn is in flight.
    pub fn tick_interval(&self) -> Option<Duration> {
        match &self.state {
            TurnState::Idle => None,
            TurnState::Animating(active) => Some(active.interval),
        }
    }

    /// Advances the active turn by one animation step.
    ///
    /// On the last step the group is dissolved, the turn is applied to the
    /// grid's colors and the scheduler returns to idle. The completed turn is
    /// returned so the caller can continue whatever sequence it belongs to.
    pub fn tick(
        &mut self,
        grid: &mut PuzzleGrid,
        animator: &mut impl SliceAnimator,
    ) -> Option<CompletedTurn> {
        let TurnState::Animating(active) = &mut self.state else {
            return None;
        };
        let turn = active.turn;
        let axis = turn.axis();

        if active.steps_done == 0 {
            animator.begin_group(axis, grid.slice(turn.slice).members());
        }
        let angle = turn.direction.sign() * FRAC_PI_2 / self.step_count as f32;
        animator.rotate_group(axis, angle);
        active.steps_done += 1;
        log::trace!("{turn} step {}/{}", active.steps_done, self.step_count);
        if active.steps_done < self.step_count {
            return None;
        }

        let origin = active.origin;
        animator.end_group();
        moves::apply(grid, turn);
        self.state = TurnState::Idle;
        Some(CompletedTurn { turn, origin })
    }

    /// Abandons the turn in flight without applying it.
    ///
    /// Only used when the grid it was animating is being thrown away.
    pub fn reset(&mut self) -> Option<ActiveTurn> {
        match std::mem::take(&mut self.state) {
            TurnState::Idle => None,
            TurnState::Animating(active) => Some(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Direction, Face};
    use crate::moves::is_solved;

    #[derive(Default)]
    struct Recorder {
        groups: Vec<(Axis, usize)>,
        angles: Vec<f32>,
        ended: usize,
    }

    impl SliceAnimator for Recorder {
        fn begin_group(&mut self, axis: Axis, cubies: &[CubieId]) {
            self.groups.push((axis, cubies.len()));
        }

        fn rotate_group(&mut self, _axis: Axis, angle: f32) {
            self.angles.push(angle);
        }

        fn end_group(&mut self) {
            self.ended += 1;
        }
    }

    fn right_turn(grid: &PuzzleGrid) -> Turn {
        Turn::new(grid.named_face(Face::Right).id(), Direction::Positive)
    }

    #[test]
    fn animates_then_applies() {
        let config = PuzzleConfig::default();
        let mut grid = PuzzleGrid::new(3).unwrap();
        let mut scheduler = TurnScheduler::new(&config);
        let mut recorder = Recorder::default();
        let turn = right_turn(&grid);

        assert!(scheduler.request(turn, TurnOrigin::Manual));
        assert_eq!(scheduler.tick_interval(), Some(config.turn_interval));
        for _ in 1..config.step_count {
            assert_eq!(scheduler.tick(&mut grid, &mut recorder), None);
            assert!(is_solved(&grid), "colors change only on completion");
        }
        let completed = scheduler.tick(&mut grid, &mut recorder);
        assert_eq!(
            completed,
            Some(CompletedTurn {
                turn,
                origin: TurnOrigin::Manual
            })
        );
        assert!(scheduler.is_idle());
        assert!(!is_solved(&grid));

        assert_eq!(recorder.groups, vec![(Axis::X, 9)]);
        assert_eq!(recorder.ended, 1);
        assert_eq!(recorder.angles.len(), config.step_count as usize);
        let total: f32 = recorder.angles.iter().sum();
        assert!((total - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn drops_requests_while_animating() {
        let mut grid = PuzzleGrid::new(3).unwrap();
        let mut scheduler = TurnScheduler::new(&PuzzleConfig::default());
        let mut recorder = Recorder::default();
        let turn = right_turn(&grid);

        assert!(scheduler.request(turn, TurnOrigin::Manual));
        scheduler.tick(&mut grid, &mut recorder);
        assert!(!scheduler.request(turn.inverse(), TurnOrigin::Manual));
        let TurnState::Animating(active) = scheduler.state() else {
            panic!("turn should still be animating");
        };
        assert_eq!(active.turn, turn);
        assert_eq!(active.steps_done, 1);
    }

    #[test]
    fn scripted_turns_use_script_interval() {
        let config = PuzzleConfig::default();
        let grid = PuzzleGrid::new(2).unwrap();
        let mut scheduler = TurnScheduler::new(&config);
        assert_eq!(scheduler.tick_interval(), None);
        scheduler.request(right_turn(&grid), TurnOrigin::Undo);
        assert_eq!(scheduler.tick_interval(), Some(config.script_interval));
    }

    #[test]
    fn negative_turn_rotates_negatively() {
        let config = PuzzleConfig {
            step_count: 2,
            ..PuzzleConfig::default()
        };
        let mut grid = PuzzleGrid::new(2).unwrap();
        let mut scheduler = TurnScheduler::new(&config);
        let mut recorder = Recorder::default();
        scheduler.request(right_turn(&grid).inverse(), TurnOrigin::Manual);
        while scheduler.tick(&mut grid, &mut recorder).is_none() {}
        assert_eq!(recorder.angles, vec![-FRAC_PI_2 / 2.0; 2]);
    }

    #[test]
    fn reset_abandons_without_applying() {
        let mut grid = PuzzleGrid::new(3).unwrap();
        let mut scheduler = TurnScheduler::new(&PuzzleConfig::default());
        let mut recorder = Recorder::default();
        scheduler.request(right_turn(&grid), TurnOrigin::Manual);
        scheduler.tick(&mut grid, &mut recorder);
        assert!(scheduler.reset().is_some());
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.tick(&mut grid, &mut recorder), None);
        assert!(is_solved(&grid));
    }
}
