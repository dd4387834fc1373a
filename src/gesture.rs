//! Translation of pointer drags into slice turns.
//!
//! A drag only tells which way the pointer moved across the puzzle. The turn
//! axis is whichever axis is neither the dominant drag axis nor the axis of
//! the grabbed facelet, and the slice is the one through the grabbed cubie
//! along that axis.

use nalgebra::{Point2, Point3, Vector3};

use crate::cube::{Axis, Direction, Face, FaceletId};
use crate::grid::PuzzleGrid;
use crate::moves::Turn;

/// Nearest pointer hit on the puzzle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// Hit position in world space
    pub point: Point3<f32>,
    /// Facelet tile that was hit
    pub facelet: FaceletId,
}

/// Finds what lies under the pointer.
pub trait Picker {
    /// Whatever the picker needs to build a pointer ray.
    type Camera: ?Sized;

    /// Returns the nearest surface facelet under `pointer`, given in
    /// normalized device coordinates.
    fn pick(
        &self,
        grid: &PuzzleGrid,
        pointer: Point2<f32>,
        camera: &Self::Camera,
    ) -> Option<PickHit>;
}

/// Drag state between pointer-down and pointer-up.
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    origin_point: Option<Point3<f32>>,
    picked: Option<FaceletId>,
    current_point: Option<Point3<f32>>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag started on the puzzle and has not ended yet.
    pub fn is_dragging(&self) -> bool {
        self.origin_point.is_some()
    }

    /// Facelet grabbed at the start of the current drag.
    pub fn picked(&self) -> Option<FaceletId> {
        self.picked
    }

    /// Begins a drag. A pointer that misses the puzzle leaves no drag active.
    pub fn drag_start<P: Picker + ?Sized>(
        &mut self,
        grid: &PuzzleGrid,
        picker: &P,
        pointer: Point2<f32>,
        camera: &P::Camera,
    ) {
        if let Some(hit) = picker.pick(grid, pointer, camera) {
            log::debug!("drag started on {:?} {}", hit.facelet.cubie, hit.facelet.face);
            self.origin_point = Some(hit.point);
            self.picked = Some(hit.facelet);
        }
    }

    /// Tracks the pointer. Moving off the puzzle keeps the last known point.
    pub fn drag_move<P: Picker + ?Sized>(
        &mut self,
        grid: &PuzzleGrid,
        picker: &P,
        pointer: Point2<f32>,
        camera: &P::Camera,
    ) {
        if !self.is_dragging() {
            return;
        }
        if let Some(hit) = picker.pick(grid, pointer, camera) {
            self.current_point = Some(hit.point);
        }
    }

    /// Ends the drag and returns the turns it asks for.
    ///
    /// Usually one turn; none if the pointer never moved across the puzzle.
    /// Drag state is reset in every case.
    ///
    /// # Panics
    /// If the grabbed facelet is not a surface facelet of `grid`, meaning the
    /// picker and the grid have gone out of sync.
    pub fn drag_end(&mut self, grid: &PuzzleGrid) -> Vec<Turn> {
        let origin = self.origin_point.take();
        let current = self.current_point.take();
        let picked = self.picked.take();

        let (Some(origin), Some(current), Some(picked)) = (origin, current, picked) else {
            return Vec::new();
        };
        let turns = interpret_drag(grid, picked, origin - current);
        log::debug!("drag on {} resolved to {} turn(s)", picked.face, turns.len());
        turns
    }
}

/// Resolves a drag of `displacement` (start minus end) that grabbed `picked`.
///
/// # Panics
/// If `picked` is not a surface facelet of `grid`.
pub fn interpret_drag(
    grid: &PuzzleGrid,
    picked: FaceletId,
    displacement: Vector3<f32>,
) -> Vec<Turn> {
    assert!(
        grid.is_surface_facelet(picked),
        "picked facelet {:?} {} has no surface cubie; picker and grid are out of sync",
        picked.cubie,
        picked.face,
    );
    let Some(slices) = grid.slices_containing(picked.cubie) else {
        unreachable!("surface facelet always has a cubie");
    };

    let tile_face = picked.face;
    let dominant = dominant_axis(&displacement);
    let Some(mut direction) = Direction::from_sign(displacement[dominant.index()]) else {
        return Vec::new();
    };
    if needs_handedness_flip(dominant, tile_face) {
        direction = -direction;
    }

    slices
        .into_iter()
        .filter(|slice| slice.axis != dominant && slice.axis != tile_face.axis())
        .map(|slice| Turn::new(slice, direction))
        .collect()
}

/// Axis with the largest absolute displacement; ties go to the earlier axis.
fn dominant_axis(displacement: &Vector3<f32>) -> Axis {
    Axis::ALL
        .into_iter()
        .fold(Axis::X, |best, axis| {
            if displacement[axis.index()].abs() > displacement[best.index()].abs() {
                axis
            } else {
                best
            }
        })
}

/// Whether the drag sense must be inverted for this axis and grabbed face.
fn needs_handedness_flip(dominant: Axis, tile_face: Face) -> bool {
    matches!(
        (dominant, tile_face),
        (Axis::X, Face::Front | Face::Bottom)
            | (Axis::Y, Face::Back | Face::Right)
            | (Axis::Z, Face::Top | Face::Left)
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::cube::CubieId;
    use crate::grid::SliceId;

    /// Returns queued hits in order, one per pick.
    #[derive(Default)]
    struct ScriptedPicker {
        hits: RefCell<VecDeque<Option<PickHit>>>,
    }

    impl ScriptedPicker {
        fn new(hits: impl IntoIterator<Item = Option<PickHit>>) -> Self {
            Self {
                hits: RefCell::new(hits.into_iter().collect()),
            }
        }
    }

    impl Picker for ScriptedPicker {
        type Camera = ();

        fn pick(&self, _grid: &PuzzleGrid, _pointer: Point2<f32>, _camera: &()) -> Option<PickHit> {
            self.hits.borrow_mut().pop_front().flatten()
        }
    }

    fn hit(point: [f32; 3], cubie: CubieId, face: Face) -> Option<PickHit> {
        Some(PickHit {
            point: Point3::from(point),
            facelet: FaceletId { cubie, face },
        })
    }

    fn drag(grid: &PuzzleGrid, picker: &ScriptedPicker, moves: usize) -> Vec<Turn> {
        let mut gesture = GestureInterpreter::new();
        gesture.drag_start(grid, picker, Point2::origin(), &());
        for _ in 0..moves {
            gesture.drag_move(grid, picker, Point2::origin(), &());
        }
        let turns = gesture.drag_end(grid);
        assert!(!gesture.is_dragging());
        turns
    }

    #[test]
    fn x_drag_on_front_turns_y_slice_with_flip() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([0, 2, 2]).unwrap();
        // pointer moves toward +x, so displacement.x is negative; grabbing
        // the front face flips that to a positive turn
        let picker = ScriptedPicker::new([
            hit([-1.0, 1.0, 1.575], cubie, Face::Front),
            hit([-0.2, 1.1, 1.575], cubie, Face::Front),
        ]);
        let turns = drag(&grid, &picker, 1);
        assert_eq!(
            turns,
            vec![Turn::new(SliceId::new(Axis::Y, 2), Direction::Positive)]
        );
    }

    #[test]
    fn y_drag_on_front_turns_x_slice_without_flip() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([2, 1, 2]).unwrap();
        let picker = ScriptedPicker::new([
            hit([1.0, 0.0, 1.575], cubie, Face::Front),
            hit([1.1, 1.0, 1.575], cubie, Face::Front),
        ]);
        let turns = drag(&grid, &picker, 1);
        assert_eq!(
            turns,
            vec![Turn::new(SliceId::new(Axis::X, 2), Direction::Negative)]
        );
    }

    #[test]
    fn y_drag_on_right_is_flipped() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([2, 1, 1]).unwrap();
        let picker = ScriptedPicker::new([
            hit([1.575, 0.0, 0.0], cubie, Face::Right),
            hit([1.575, 1.0, 0.1], cubie, Face::Right),
        ]);
        let turns = drag(&grid, &picker, 1);
        assert_eq!(
            turns,
            vec![Turn::new(SliceId::new(Axis::Z, 1), Direction::Positive)]
        );
    }

    #[test]
    fn z_drag_on_top_is_flipped() {
        let grid = PuzzleGrid::new(2).unwrap();
        let cubie = grid.cubie_at([1, 1, 0]).unwrap();
        let picker = ScriptedPicker::new([
            hit([0.5, 1.075, -0.5], cubie, Face::Top),
            hit([0.4, 1.075, 0.5], cubie, Face::Top),
        ]);
        let turns = drag(&grid, &picker, 1);
        assert_eq!(
            turns,
            vec![Turn::new(SliceId::new(Axis::X, 1), Direction::Positive)]
        );
    }

    #[test]
    fn drag_along_tile_axis_yields_two_candidates() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([1, 1, 2]).unwrap();
        let picker = ScriptedPicker::new([
            hit([0.0, 0.0, 1.575], cubie, Face::Front),
            hit([0.1, 0.0, 0.5], cubie, Face::Front),
        ]);
        let turns = drag(&grid, &picker, 1);
        let axes: Vec<_> = turns.iter().map(|turn| turn.axis()).collect();
        assert_eq!(axes, vec![Axis::X, Axis::Y]);
    }

    #[test]
    fn missed_start_is_a_no_op() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([0, 0, 2]).unwrap();
        let picker = ScriptedPicker::new([None, hit([0.0, 0.0, 1.575], cubie, Face::Front)]);
        let mut gesture = GestureInterpreter::new();
        gesture.drag_start(&grid, &picker, Point2::origin(), &());
        assert!(!gesture.is_dragging());
        assert_eq!(gesture.picked(), None);
        gesture.drag_move(&grid, &picker, Point2::origin(), &());
        assert!(gesture.drag_end(&grid).is_empty());
        // the move was ignored, so its hit is still queued
        assert_eq!(picker.hits.borrow().len(), 1);
    }

    #[test]
    fn moving_off_the_puzzle_keeps_last_point() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([0, 2, 2]).unwrap();
        let picker = ScriptedPicker::new([
            hit([-1.0, 1.0, 1.575], cubie, Face::Front),
            hit([0.5, 1.0, 1.575], cubie, Face::Front),
            None,
        ]);
        let turns = drag(&grid, &picker, 2);
        assert_eq!(
            turns,
            vec![Turn::new(SliceId::new(Axis::Y, 2), Direction::Positive)]
        );
    }

    #[test]
    fn click_without_move_is_a_no_op() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([0, 2, 2]).unwrap();
        let picker = ScriptedPicker::new([hit([-1.0, 1.0, 1.575], cubie, Face::Front)]);
        let mut gesture = GestureInterpreter::new();
        gesture.drag_start(&grid, &picker, Point2::origin(), &());
        assert_eq!(
            gesture.picked(),
            Some(FaceletId {
                cubie,
                face: Face::Front,
            })
        );
        assert!(gesture.drag_end(&grid).is_empty());
        assert_eq!(gesture.picked(), None);
    }

    #[test]
    fn zero_displacement_is_a_no_op() {
        let grid = PuzzleGrid::new(3).unwrap();
        let cubie = grid.cubie_at([0, 2, 2]).unwrap();
        let picked = FaceletId {
            cubie,
            face: Face::Front,
        };
        assert!(interpret_drag(&grid, picked, Vector3::zeros()).is_empty());
    }

    #[test]
    fn dominant_axis_prefers_earlier_on_ties() {
        assert_eq!(dominant_axis(&Vector3::new(1.0, -1.0, 0.5)), Axis::X);
        assert_eq!(dominant_axis(&Vector3::new(0.1, -2.0, 2.0)), Axis::Y);
        assert_eq!(dominant_axis(&Vector3::new(0.1, 0.2, -0.3)), Axis::Z);
    }

    #[test]
    #[should_panic(expected = "out of sync")]
    fn interior_facelet_is_a_fault() {
        let grid = PuzzleGrid::new(3).unwrap();
        let core = grid.cubie_at([1, 1, 1]).unwrap();
        let picked = FaceletId {
            cubie: core,
            face: Face::Front,
        };
        interpret_drag(&grid, picked, Vector3::x());
    }
}
