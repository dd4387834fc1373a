//! Headless driver for the cube puzzle.
//!
//! Scrambles a puzzle, prints it, walks it back to solved and prints it again.
//! With `--drag` it also replays a pointer drag across the front face through
//! the ray picker.

use std::process;
use std::sync::mpsc::Receiver;
use std::thread;

use clap::Parser;
use nalgebra::Point2;

use cubeturn::camera::Viewpoint;
use cubeturn::ray_casting::RayPicker;
use cubeturn::scene::HeadlessScene;
use cubeturn::{Puzzle, PuzzleConfig, PuzzleEvent};

/// Scramble an N×N×N cube and undo back to solved
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Cubies along each edge.
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    /// Number of scramble turns; drawn from 30..50 when omitted.
    #[arg(short, long, value_name = "COUNT")]
    turns: Option<usize>,

    /// Seed for reproducible scrambles.
    #[arg(long)]
    seed: Option<u64>,

    /// Animation steps per quarter turn.
    #[arg(long, default_value_t = 8)]
    steps: u32,

    /// Sleep between animation steps as an interactive host would.
    #[arg(short, long)]
    realtime: bool,

    /// Drag across the top row of the front face before undoing.
    #[arg(long)]
    drag: bool,
}

fn main() {
    env_logger::builder().format_timestamp(None).init();
    let args = Args::parse();

    let config = PuzzleConfig {
        step_count: args.steps,
        seed: args.seed,
        ..PuzzleConfig::with_size(args.size)
    };
    let mut puzzle = match Puzzle::new(config) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("Invalid puzzle: {err}");
            process::exit(2);
        }
    };
    let events = puzzle.subscribe();
    let mut scene = HeadlessScene::new();
    puzzle.present(&mut scene);
    log::info!("showing {} facelets", scene.shown_facelets());

    puzzle.scramble(args.turns);
    settle(&mut puzzle, &mut scene, args.realtime);
    println!("Scrambled ({} turns recorded):", puzzle.history().len());
    println!("{}", puzzle.grid());

    if args.drag {
        drag_top_row(&mut puzzle, &mut scene, args.realtime);
    }

    puzzle.undo_to_previous_solve();
    settle(&mut puzzle, &mut scene, args.realtime);
    println!("After undo:");
    println!("{}", puzzle.grid());

    report(&events);
    println!("Solved: {}", puzzle.is_solved());
    if !puzzle.is_solved() {
        process::exit(1);
    }
}

/// Ticks until the puzzle is idle, pacing ticks in realtime mode.
fn settle(puzzle: &mut Puzzle, scene: &mut HeadlessScene, realtime: bool) {
    if !realtime {
        puzzle.run_until_idle(scene);
        return;
    }
    while puzzle.is_busy() {
        puzzle.tick(scene);
        if let Some(interval) = puzzle.tick_interval() {
            thread::sleep(interval);
        }
    }
}

fn drag_top_row(puzzle: &mut Puzzle, scene: &mut HeadlessScene, realtime: bool) {
    let viewpoint = Viewpoint::default();
    let last = puzzle.grid().size() - 1;
    let (Some(from), Some(to)) = (
        front_pointer(puzzle, &viewpoint, [0, last, last]),
        front_pointer(puzzle, &viewpoint, [last, last, last]),
    ) else {
        return;
    };
    puzzle.drag_start(&RayPicker, from, &viewpoint);
    puzzle.drag_move(&RayPicker, to, &viewpoint);
    let accepted = puzzle.drag_end();
    println!("Drag requested {accepted} turn(s)");
    settle(puzzle, scene, realtime);
}

/// Pointer position over the center of a cubie, in normalized device
/// coordinates.
fn front_pointer(
    puzzle: &Puzzle,
    viewpoint: &Viewpoint,
    position: [usize; 3],
) -> Option<Point2<f32>> {
    let grid = puzzle.grid();
    let center = grid.cubie_center(grid.cubie_at(position)?)?;
    let clip = viewpoint.build_view_proj_matrix() * center.to_homogeneous();
    Some(Point2::new(clip.x / clip.w, clip.y / clip.w))
}

fn report(events: &Receiver<PuzzleEvent>) {
    let mut turns = 0;
    for event in events.try_iter() {
        match event {
            PuzzleEvent::TurnCompleted(_) => turns += 1,
            PuzzleEvent::SolvedChanged(solved) => println!("Solved changed: {solved}"),
            PuzzleEvent::ScriptFinished(kind) => println!("{kind:?} finished"),
        }
    }
    println!("{turns} turns completed");
}
