//! Cube vocabulary and the individual cubie.
//!
//! This module defines the palette, the six face names, the three turn axes and
//! the [`Cubie`] itself: a sub-cube with a fixed grid position and six colored
//! facelets whose colors move around while the cubie stays put.

use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use nalgebra::{Unit, Vector3, Vector4};

/// Colors available to a facelet.
///
/// Six real colors, one per face, plus [`Color::Hidden`] for facelets that are
/// never on the outside of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Orange,
    Red,
    Blue,
    Green,
    Yellow,
    White,
    Hidden,
}

impl Color {
    /// All palette entries, real colors first.
    pub const ALL: [Color; 7] = [
        Color::Orange,
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::White,
        Color::Hidden,
    ];

    /// Single-letter code used by the text readout.
    pub fn letter(self) -> char {
        match self {
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::White => 'W',
            Color::Hidden => '.',
        }
    }
}

impl From<Color> for Vector4<f32> {
    /// Converts a palette entry to the RGBA value a view should tint with.
    fn from(color: Color) -> Self {
        match color {
            Color::Orange => Vector4::new(1.0, 0.384, 0.0, 1.0),
            Color::Red => Vector4::new(0.988, 0.059, 0.012, 1.0),
            Color::Blue => Vector4::new(0.039, 0.051, 0.749, 1.0),
            Color::Green => Vector4::new(0.043, 0.639, 0.075, 1.0),
            Color::Yellow => Vector4::new(0.973, 0.988, 0.012, 1.0),
            Color::White => Vector4::new(0.933, 0.933, 0.933, 1.0),
            Color::Hidden => Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// One of the three turn axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `[x, y, z]` arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit vector along the positive end of the axis.
    pub fn unit(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// The two axes spanning a slice turned about `self`, as `(u, v)`.
    ///
    /// The pairing is fixed so that the slice permutation and the facelet
    /// cycles in [`Cubie::rotate_in_place`] describe the same physical spin.
    pub fn slice_plane(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::Y, Axis::X),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Sense of a quarter turn about an axis.
///
/// `Positive` is a counterclockwise turn seen from the positive end of the
/// axis (right-handed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Positive, Direction::Negative];

    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    /// Direction matching the sign of `value`, or `None` for zero (and NaN).
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Positive)
        } else if value < 0.0 {
            Some(Direction::Negative)
        } else {
            None
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "+"),
            Direction::Negative => write!(f, "-"),
        }
    }
}

/// Names of the six sides, used both for the facelets of a cubie and for the
/// six outer slices of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Left,
    Right,
    Bottom,
    Top,
    Back,
    Front,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Bottom,
        Face::Top,
        Face::Back,
        Face::Front,
    ];

    /// Axis this face is perpendicular to.
    pub fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Bottom | Face::Top => Axis::Y,
            Face::Back | Face::Front => Axis::Z,
        }
    }

    /// Whether the face sits on the positive end of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Face::Right | Face::Top | Face::Front)
    }

    /// The face at the given end of an axis.
    pub fn from_axis(axis: Axis, positive: bool) -> Face {
        match (axis, positive) {
            (Axis::X, false) => Face::Left,
            (Axis::X, true) => Face::Right,
            (Axis::Y, false) => Face::Bottom,
            (Axis::Y, true) => Face::Top,
            (Axis::Z, false) => Face::Back,
            (Axis::Z, true) => Face::Front,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vector3<f32> {
        let unit = self.axis().unit().into_inner();
        if self.is_positive() { unit } else { -unit }
    }

    /// Color every facelet of this name carries on a solved puzzle.
    pub fn home_color(self) -> Color {
        match self {
            Face::Left => Color::Orange,
            Face::Right => Color::Red,
            Face::Bottom => Color::Blue,
            Face::Top => Color::Green,
            Face::Back => Color::Yellow,
            Face::Front => Color::White,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Left => write!(f, "left"),
            Face::Right => write!(f, "right"),
            Face::Bottom => write!(f, "bottom"),
            Face::Top => write!(f, "top"),
            Face::Back => write!(f, "back"),
            Face::Front => write!(f, "front"),
        }
    }
}

/// Snapshot of the six facelet colors of one cubie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceletColors([Color; 6]);

impl FaceletColors {
    /// The colors of a solved cubie: every facelet shows its face's home color.
    pub fn home() -> Self {
        Self(Face::ALL.map(Face::home_color))
    }

    /// Iterates `(face, color)` pairs in [`Face::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        Face::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Face> for FaceletColors {
    type Output = Color;

    fn index(&self, face: Face) -> &Color {
        &self.0[face.index()]
    }
}

impl IndexMut<Face> for FaceletColors {
    fn index_mut(&mut self, face: Face) -> &mut Color {
        &mut self.0[face.index()]
    }
}

/// Index of a cubie inside its [`PuzzleGrid`](crate::grid::PuzzleGrid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub usize);

/// Identity of one facelet: the object a picker reports and a view tints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceletId {
    pub cubie: CubieId,
    pub face: Face,
}

/// One sub-cube of the puzzle.
///
/// A cubie never leaves its grid position. Turns are carried out by moving
/// color snapshots between cubies ([`Cubie::assign_colors`]) and spinning each
/// cubie's facelets in place ([`Cubie::rotate_in_place`]).
#[derive(Clone, Debug)]
pub struct Cubie {
    /// Layer index along each axis, `0..size`
    position: [usize; 3],
    /// Current facelet colors, including facelets that are never shown
    colors: FaceletColors,
    /// Facelets on the outer surface of the puzzle
    visible: [bool; 6],
}

impl Cubie {
    /// Creates a solved cubie at `position` inside a puzzle of the given size.
    ///
    /// Exactly the facelets lying on the outer boundary are made visible.
    pub(crate) fn new(position: [usize; 3], size: usize) -> Self {
        let last = size - 1;
        let visible = Face::ALL.map(|face| {
            let layer = position[face.axis().index()];
            if face.is_positive() {
                layer == last
            } else {
                layer == 0
            }
        });
        Self {
            position,
            colors: FaceletColors::home(),
            visible,
        }
    }

    /// Layer index along each of `[x, y, z]`.
    pub fn position(&self) -> [usize; 3] {
        self.position
    }

    /// Layer index along one axis.
    pub fn layer(&self, axis: Axis) -> usize {
        self.position[axis.index()]
    }

    /// Snapshot of all six facelet colors.
    pub fn colors(&self) -> FaceletColors {
        self.colors
    }

    /// Overwrites all six facelet colors from a snapshot.
    pub fn assign_colors(&mut self, colors: FaceletColors) {
        self.colors = colors;
    }

    /// Whether the facelet lies on the puzzle surface.
    pub fn is_visible(&self, face: Face) -> bool {
        self.visible[face.index()]
    }

    /// Facelets on the puzzle surface, in [`Face::ALL`] order.
    pub fn visible_faces(&self) -> impl Iterator<Item = Face> + '_ {
        Face::ALL.into_iter().filter(|&face| self.is_visible(face))
    }

    /// Color a view should paint on the facelet.
    pub fn shown_color(&self, face: Face) -> Color {
        if self.is_visible(face) {
            self.colors[face]
        } else {
            Color::Hidden
        }
    }

    /// Spins the cubie a quarter turn about `axis`, permuting the four side
    /// facelets. The two facelets on `axis` keep their colors.
    pub fn rotate_in_place(&mut self, axis: Axis, direction: Direction) {
        let cycle = match axis {
            Axis::X => [Face::Top, Face::Back, Face::Bottom, Face::Front],
            Axis::Y => [Face::Front, Face::Left, Face::Back, Face::Right],
            Axis::Z => [Face::Top, Face::Right, Face::Bottom, Face::Left],
        };
        match direction {
            Direction::Positive => self.shift_colors(cycle),
            Direction::Negative => {
                let [a, b, c, d] = cycle;
                self.shift_colors([a, d, c, b]);
            }
        }
    }

    /// Each face in `cycle` receives the color of the next one; the last
    /// receives the first's.
    fn shift_colors(&mut self, cycle: [Face; 4]) {
        let first = self.colors[cycle[0]];
        for pair in cycle.windows(2) {
            self.colors[pair[0]] = self.colors[pair[1]];
        }
        self.colors[cycle[3]] = first;
    }
}

/// Receives facelet visibility and colors from the puzzle.
///
/// Implemented by the presentation layer; the core never touches materials or
/// meshes directly.
pub trait FaceletView {
    /// Makes the facelet part of the rendered puzzle.
    fn show_facelet(&mut self, facelet: FaceletId);

    /// Paints the facelet with a palette color.
    fn tint_facelet(&mut self, facelet: FaceletId, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked() -> Cubie {
        let mut cubie = Cubie::new([0, 0, 0], 2);
        let mut colors = FaceletColors::home();
        colors[Face::Left] = Color::Orange;
        colors[Face::Right] = Color::Red;
        colors[Face::Bottom] = Color::Blue;
        colors[Face::Top] = Color::Green;
        colors[Face::Back] = Color::Yellow;
        colors[Face::Front] = Color::White;
        cubie.assign_colors(colors);
        cubie
    }

    #[test]
    fn rotate_x_moves_top_to_front() {
        let mut cubie = marked();
        cubie.rotate_in_place(Axis::X, Direction::Positive);
        let colors = cubie.colors();
        assert_eq!(colors[Face::Front], Color::Green);
        assert_eq!(colors[Face::Top], Color::Yellow);
        assert_eq!(colors[Face::Back], Color::Blue);
        assert_eq!(colors[Face::Bottom], Color::White);
        assert_eq!(colors[Face::Left], Color::Orange);
        assert_eq!(colors[Face::Right], Color::Red);
    }

    #[test]
    fn rotate_y_moves_front_to_right() {
        let mut cubie = marked();
        cubie.rotate_in_place(Axis::Y, Direction::Positive);
        let colors = cubie.colors();
        assert_eq!(colors[Face::Right], Color::White);
        assert_eq!(colors[Face::Front], Color::Orange);
        assert_eq!(colors[Face::Top], Color::Green);
    }

    #[test]
    fn rotate_z_moves_right_to_top() {
        let mut cubie = marked();
        cubie.rotate_in_place(Axis::Z, Direction::Positive);
        let colors = cubie.colors();
        assert_eq!(colors[Face::Top], Color::Red);
        assert_eq!(colors[Face::Left], Color::Green);
        assert_eq!(colors[Face::Front], Color::White);
    }

    #[test]
    fn rotate_then_unrotate_is_identity() {
        for axis in Axis::ALL {
            let mut cubie = marked();
            let before = cubie.colors();
            cubie.rotate_in_place(axis, Direction::Negative);
            assert_ne!(cubie.colors(), before);
            cubie.rotate_in_place(axis, Direction::Positive);
            assert_eq!(cubie.colors(), before);
        }
    }

    #[test]
    fn corner_edge_center_core_visibility() {
        let size = 3;
        let count = |pos| Cubie::new(pos, size).visible_faces().count();
        assert_eq!(count([0, 0, 0]), 3);
        assert_eq!(count([1, 0, 0]), 2);
        assert_eq!(count([1, 1, 0]), 1);
        assert_eq!(count([1, 1, 1]), 0);
    }

    #[test]
    fn hidden_facelets_show_hidden_color() {
        let cubie = Cubie::new([2, 1, 1], 3);
        assert!(cubie.is_visible(Face::Right));
        assert_eq!(cubie.shown_color(Face::Right), Color::Red);
        assert_eq!(cubie.shown_color(Face::Left), Color::Hidden);
        assert_eq!(cubie.colors()[Face::Left], Color::Orange);
    }

    #[test]
    fn face_axis_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_axis(face.axis(), face.is_positive()), face);
            assert_eq!(face.normal().norm(), 1.0);
        }
    }

    #[test]
    fn direction_from_sign() {
        assert_eq!(Direction::from_sign(2.5), Some(Direction::Positive));
        assert_eq!(Direction::from_sign(-0.1), Some(Direction::Negative));
        assert_eq!(Direction::from_sign(0.0), None);
        assert_eq!(-Direction::Positive, Direction::Negative);
        for direction in Direction::ALL {
            assert_eq!(Direction::from_sign(direction.sign()), Some(direction));
            assert_eq!(-(-direction), direction);
        }
    }

    #[test]
    fn every_real_color_belongs_to_one_face() {
        let (real, hidden): (Vec<Color>, Vec<Color>) = Color::ALL
            .into_iter()
            .partition(|&color| color != Color::Hidden);
        assert_eq!(hidden, [Color::Hidden]);
        for color in real {
            let owners = Face::ALL
                .into_iter()
                .filter(|face| face.home_color() == color)
                .count();
            assert_eq!(owners, 1, "{color:?}");
        }
        let letters: std::collections::HashSet<char> =
            Color::ALL.into_iter().map(Color::letter).collect();
        assert_eq!(letters.len(), Color::ALL.len());
    }
}
