//! The interactive puzzle: grid, turn scheduling, drags, scripts and events.
//!
//! [`Puzzle`] is what a host embeds. The host forwards pointer drags, calls
//! [`Puzzle::tick`] from a repeating timer and listens for [`PuzzleEvent`]s to
//! update anything outside the 3D view, such as a "solved" banner.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use nalgebra::Point2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::PuzzleConfig;
use crate::cube::{Axis, Direction, FaceletId, FaceletView};
use crate::error::PuzzleError;
use crate::gesture::{GestureInterpreter, Picker};
use crate::grid::{PuzzleGrid, SliceId};
use crate::moves::{self, Turn};
use crate::scheduler::{CompletedTurn, SliceAnimator, TurnOrigin, TurnScheduler};
use crate::tracker::SolveTracker;

/// Kind of scripted turn sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Scramble,
    Undo,
}

/// Notifications for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// A turn finished animating and was applied
    TurnCompleted(Turn),
    /// The puzzle became solved (`true`) or stopped being solved (`false`)
    SolvedChanged(bool),
    /// A scramble or undo sequence ran to its end
    ScriptFinished(ScriptKind),
}

/// Remaining work of a scripted sequence.
#[derive(Clone, Debug)]
enum Script {
    Scramble {
        remaining: usize,
        previous: Option<Turn>,
    },
    Undo {
        /// Planned from the history once no manual turn is in flight
        turns: Option<VecDeque<Turn>>,
    },
}

impl Script {
    fn kind(&self) -> ScriptKind {
        match self {
            Script::Scramble { .. } => ScriptKind::Scramble,
            Script::Undo { .. } => ScriptKind::Undo,
        }
    }
}

/// An N×N×N cube puzzle with its interaction state.
pub struct Puzzle {
    config: PuzzleConfig,
    grid: PuzzleGrid,
    scheduler: TurnScheduler,
    tracker: SolveTracker,
    gesture: GestureInterpreter,
    /// Scramble or undo in progress; `None` also acts as the cancel state
    script: Option<Script>,
    rng: ChaCha8Rng,
    solved: bool,
    subscribers: Vec<Sender<PuzzleEvent>>,
}

impl Puzzle {
    /// Builds a solved puzzle.
    pub fn new(config: PuzzleConfig) -> Result<Self, PuzzleError> {
        config.validate()?;
        let grid = PuzzleGrid::new(config.size)?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("new {0}x{0}x{0} puzzle (seed {seed})", config.size);

        Ok(Self {
            scheduler: TurnScheduler::new(&config),
            grid,
            tracker: SolveTracker::new(),
            gesture: GestureInterpreter::new(),
            script: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            solved: true,
            subscribers: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn tracker(&self) -> &SolveTracker {
        &self.tracker
    }

    /// Turns made since the puzzle was last solved.
    pub fn history(&self) -> &[Turn] {
        self.tracker.history()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether a turn is animating or a script still has turns to issue.
    pub fn is_busy(&self) -> bool {
        !self.scheduler.is_idle() || self.script.is_some()
    }

    /// The running script, if any.
    pub fn script(&self) -> Option<ScriptKind> {
        self.script.as_ref().map(Script::kind)
    }

    /// Delay before the host should call [`tick`](Self::tick) again, or
    /// `None` when nothing is animating.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.scheduler.tick_interval()
    }

    /// Registers a listener. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<PuzzleEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Shows every surface facelet and paints it with its current color.
    pub fn present(&self, view: &mut impl FaceletView) {
        for facelet in self.grid.surface_facelets() {
            view.show_facelet(facelet);
            self.paint(view, facelet);
        }
    }

    /// Asks for a turn. Dropped (returning `false`) while another turn
    /// animates, or if the slice is outside the grid.
    pub fn request_turn(&mut self, turn: Turn) -> bool {
        self.request(turn, TurnOrigin::Manual)
    }

    /// Pointer pressed at `pointer` (normalized device coordinates).
    pub fn drag_start<P: Picker + ?Sized>(
        &mut self,
        picker: &P,
        pointer: Point2<f32>,
        camera: &P::Camera,
    ) {
        self.gesture.drag_start(&self.grid, picker, pointer, camera);
    }

    /// Pointer moved while pressed.
    pub fn drag_move<P: Picker + ?Sized>(
        &mut self,
        picker: &P,
        pointer: Point2<f32>,
        camera: &P::Camera,
    ) {
        self.gesture.drag_move(&self.grid, picker, pointer, camera);
    }

    /// Pointer released. Requests the turn(s) the drag describes and returns
    /// how many were accepted.
    pub fn drag_end(&mut self) -> usize {
        let turns = self.gesture.drag_end(&self.grid);
        turns
            .into_iter()
            .filter(|&turn| self.request(turn, TurnOrigin::Manual))
            .count()
    }

    /// Starts a scramble of `turn_count` random turns, or a count drawn from
    /// the configured range. Returns `false` if another script is running.
    pub fn scramble(&mut self, turn_count: Option<usize>) -> bool {
        if let Some(running) = self.script() {
            log::debug!("scramble rejected: {running:?} in progress");
            return false;
        }
        let remaining =
            turn_count.unwrap_or_else(|| self.rng.random_range(self.config.scramble_turns.clone()));
        log::info!("scrambling with {remaining} turns");
        self.script = Some(Script::Scramble {
            remaining,
            previous: None,
        });
        self.pump();
        true
    }

    /// Reverses every turn since the puzzle was last solved, including a
    /// manual turn still in flight. Returns `false` if another script is
    /// running.
    pub fn undo_to_previous_solve(&mut self) -> bool {
        if let Some(running) = self.script() {
            log::debug!("undo rejected: {running:?} in progress");
            return false;
        }
        self.script = Some(Script::Undo { turns: None });
        self.pump();
        true
    }

    /// Stops the running script after the turn in flight. Returns whether a
    /// script was running.
    pub fn cancel_script(&mut self) -> bool {
        match self.script.take() {
            Some(script) => {
                log::info!("cancelled {:?}", script.kind());
                true
            }
            None => false,
        }
    }

    /// Advances the animation by one step.
    ///
    /// When a turn completes, history is updated, the turned slice is
    /// repainted, events are sent and the next scripted turn is started.
    pub fn tick<S>(&mut self, scene: &mut S) -> Option<CompletedTurn>
    where
        S: SliceAnimator + FaceletView,
    {
        let completed = self.scheduler.tick(&mut self.grid, scene)?;
        let CompletedTurn { turn, origin } = completed;

        let solved = moves::is_solved(&self.grid);
        match origin {
            TurnOrigin::Undo => self.tracker.retract(turn, solved),
            TurnOrigin::Manual | TurnOrigin::Scramble => self.tracker.record(turn, solved),
        }

        for &cubie in self.grid.slice(turn.slice).members() {
            for face in self.grid.cubies()[cubie.0].visible_faces() {
                self.paint(scene, FaceletId { cubie, face });
            }
        }

        self.emit(PuzzleEvent::TurnCompleted(turn));
        if solved != self.solved {
            self.solved = solved;
            if solved {
                log::info!("puzzle solved");
            }
            self.emit(PuzzleEvent::SolvedChanged(solved));
        }

        self.pump();
        Some(completed)
    }

    /// Ticks until no turn is animating and no script is pending. Returns the
    /// number of turns completed.
    pub fn run_until_idle<S>(&mut self, scene: &mut S) -> usize
    where
        S: SliceAnimator + FaceletView,
    {
        let mut completed = 0;
        while self.is_busy() {
            if self.tick(scene).is_some() {
                completed += 1;
            }
        }
        completed
    }

    /// Rebuilds the puzzle at a new size, discarding history, the running
    /// script and any turn in flight. The view must be presented again.
    pub fn resize(&mut self, size: usize) -> Result<(), PuzzleError> {
        let grid = PuzzleGrid::new(size)?;
        if let Some(active) = self.scheduler.reset() {
            log::debug!("abandoned {} for resize", active.turn);
        }
        self.script = None;
        self.tracker.clear();
        self.gesture = GestureInterpreter::new();
        self.grid = grid;
        self.config.size = size;
        log::info!("resized to {0}x{0}x{0}", size);
        if !self.solved {
            self.solved = true;
            self.emit(PuzzleEvent::SolvedChanged(true));
        }
        Ok(())
    }

    fn request(&mut self, turn: Turn, origin: TurnOrigin) -> bool {
        if turn.slice.layer >= self.grid.size() {
            log::warn!("ignored {turn}: no such layer in a size {} puzzle", self.grid.size());
            return false;
        }
        self.scheduler.request(turn, origin)
    }

    /// Issues the next scripted turn if the scheduler is free, or finishes
    /// the script when it has nothing left.
    fn pump(&mut self) {
        if !self.scheduler.is_idle() {
            return;
        }
        let Some(script) = self.script.as_mut() else {
            return;
        };

        let next = match script {
            Script::Scramble {
                remaining,
                previous,
            } => (*remaining > 0).then(|| {
                *remaining -= 1;
                let avoid = (*previous).or(self.tracker.last());
                let turn = random_turn(&mut self.rng, self.grid.size(), avoid);
                *previous = Some(turn);
                (turn, TurnOrigin::Scramble)
            }),
            Script::Undo { turns } => turns
                .get_or_insert_with(|| {
                    let plan: VecDeque<Turn> = self.tracker.reversal().into();
                    log::info!("undoing {} turns", plan.len());
                    plan
                })
                .pop_front()
                .map(|turn| (turn, TurnOrigin::Undo)),
        };

        match next {
            Some((turn, origin)) => {
                self.request(turn, origin);
            }
            None => {
                let kind = script.kind();
                self.script = None;
                log::info!("{kind:?} finished");
                self.emit(PuzzleEvent::ScriptFinished(kind));
            }
        }
    }

    fn paint(&self, view: &mut impl FaceletView, facelet: FaceletId) {
        if let Some(cubie) = self.grid.cubie(facelet.cubie) {
            view.tint_facelet(facelet, cubie.shown_color(facelet.face));
        }
    }

    fn emit(&mut self, event: PuzzleEvent) {
        self.subscribers.retain(|sender| sender.send(event).is_ok());
    }
}

/// A uniformly random turn that does not undo `previous`.
fn random_turn(rng: &mut impl Rng, size: usize, previous: Option<Turn>) -> Turn {
    loop {
        let axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
        let layer = rng.random_range(0..size);
        let direction = if rng.random_bool(0.5) {
            Direction::Positive
        } else {
            Direction::Negative
        };
        let turn = Turn::new(SliceId::new(axis, layer), direction);
        if previous != Some(turn.inverse()) {
            return turn;
        }
    }
}
