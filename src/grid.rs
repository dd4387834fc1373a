//! The N×N×N arrangement of cubies and the slices derived from it.

use std::fmt;

use nalgebra::Point3;

use crate::cube::{Axis, Color, Cubie, CubieId, Face, FaceletId};
use crate::error::PuzzleError;

/// Smallest supported puzzle size.
pub const MIN_SIZE: usize = 2;

/// Identity of a slice: every cubie sharing one layer index along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceId {
    pub axis: Axis,
    pub layer: usize,
}

impl SliceId {
    pub fn new(axis: Axis, layer: usize) -> Self {
        Self { axis, layer }
    }
}

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.layer)
    }
}

/// An axis-aligned layer of cubies.
#[derive(Clone, Debug)]
pub struct Slice {
    id: SliceId,
    /// Named face for the two extreme layers of each axis
    face: Option<Face>,
    members: Vec<CubieId>,
}

impl Slice {
    pub fn id(&self) -> SliceId {
        self.id
    }

    pub fn axis(&self) -> Axis {
        self.id.axis
    }

    pub fn layer(&self) -> usize {
        self.id.layer
    }

    /// The named face this slice is, if it is an outer layer.
    pub fn face(&self) -> Option<Face> {
        self.face
    }

    pub fn members(&self) -> &[CubieId] {
        &self.members
    }
}

/// All cubies of a puzzle together with their slices.
///
/// Built once for a given size. Cubie positions never change; only their
/// colors do.
#[derive(Clone, Debug)]
pub struct PuzzleGrid {
    size: usize,
    cubies: Vec<Cubie>,
    /// `size` slices per axis, indexed by `[axis][layer]`
    slices: [Vec<Slice>; 3],
}

impl PuzzleGrid {
    /// Builds a solved puzzle with `size` cubies along each edge.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if size < MIN_SIZE {
            return Err(PuzzleError::SizeTooSmall { size });
        }

        let mut cubies = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    cubies.push(Cubie::new([x, y, z], size));
                }
            }
        }

        let slices: [Vec<Slice>; 3] = Axis::ALL.map(|axis| {
            (0..size)
                .map(|layer| {
                    let face = if layer == 0 {
                        Some(Face::from_axis(axis, false))
                    } else if layer == size - 1 {
                        Some(Face::from_axis(axis, true))
                    } else {
                        None
                    };
                    let members = cubies
                        .iter()
                        .enumerate()
                        .filter(|(_, cubie)| cubie.layer(axis) == layer)
                        .map(|(index, _)| CubieId(index))
                        .collect();
                    Slice {
                        id: SliceId::new(axis, layer),
                        face,
                        members,
                    }
                })
                .collect()
        });

        log::debug!("built {size}x{size}x{size} grid with {} cubies", cubies.len());
        Ok(Self {
            size,
            cubies,
            slices,
        })
    }

    /// Number of cubies along each edge.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// Iterates every cubie with its id.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> + '_ {
        self.cubies
            .iter()
            .enumerate()
            .map(|(index, cubie)| (CubieId(index), cubie))
    }

    pub fn cubie(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.0)
    }

    pub(crate) fn cubie_mut(&mut self, id: CubieId) -> &mut Cubie {
        &mut self.cubies[id.0]
    }

    /// Id of the cubie at a layer position, if inside the grid.
    pub fn cubie_at(&self, position: [usize; 3]) -> Option<CubieId> {
        let [x, y, z] = position;
        (x < self.size && y < self.size && z < self.size)
            .then(|| CubieId(x + self.size * (y + self.size * z)))
    }

    /// Every slice, axis by axis.
    pub fn slices(&self) -> impl Iterator<Item = &Slice> + '_ {
        self.slices.iter().flatten()
    }

    /// Number of slices, `3 * size`.
    pub fn slice_count(&self) -> usize {
        3 * self.size
    }

    /// Looks up a slice. Panics if `id.layer` is outside the grid.
    pub fn slice(&self, id: SliceId) -> &Slice {
        &self.slices[id.axis.index()][id.layer]
    }

    /// The outer slice carrying a face name.
    pub fn named_face(&self, face: Face) -> &Slice {
        let layer = if face.is_positive() { self.size - 1 } else { 0 };
        &self.slices[face.axis().index()][layer]
    }

    /// The three slices a cubie belongs to, in axis order.
    pub fn slices_containing(&self, id: CubieId) -> Option<[SliceId; 3]> {
        let cubie = self.cubie(id)?;
        Some(Axis::ALL.map(|axis| SliceId::new(axis, cubie.layer(axis))))
    }

    /// Whether the facelet exists and lies on the puzzle surface.
    pub fn is_surface_facelet(&self, facelet: FaceletId) -> bool {
        self.cubie(facelet.cubie)
            .is_some_and(|cubie| cubie.is_visible(facelet.face))
    }

    /// Centered coordinate of a layer; layers are one unit apart and
    /// symmetric about the origin.
    pub fn coordinate(&self, layer: usize) -> f32 {
        layer as f32 - (self.size - 1) as f32 * 0.5
    }

    /// Center of a cubie in world space.
    pub fn cubie_center(&self, id: CubieId) -> Option<Point3<f32>> {
        let [x, y, z] = self.cubie(id)?.position();
        Some(Point3::new(
            self.coordinate(x),
            self.coordinate(y),
            self.coordinate(z),
        ))
    }

    /// Surface facelets, cubie by cubie.
    pub fn surface_facelets(&self) -> impl Iterator<Item = FaceletId> + '_ {
        self.iter().flat_map(|(id, cubie)| {
            cubie
                .visible_faces()
                .map(move |face| FaceletId { cubie: id, face })
        })
    }

    /// Colors on one named face, row by row from the top of the face as seen
    /// from outside, rows ordered left to right.
    pub fn face_colors(&self, face: Face) -> Vec<Vec<Color>> {
        let n = self.size;
        let last = n - 1;
        // (column axis, column reversed, row axis, row reversed) for a viewer
        // looking at the face from outside with "up" as in the net layout
        let (col_axis, col_rev, row_axis, row_rev) = match face {
            Face::Front => (Axis::X, false, Axis::Y, true),
            Face::Back => (Axis::X, true, Axis::Y, true),
            Face::Right => (Axis::Z, true, Axis::Y, true),
            Face::Left => (Axis::Z, false, Axis::Y, true),
            Face::Top => (Axis::X, false, Axis::Z, false),
            Face::Bottom => (Axis::X, false, Axis::Z, true),
        };
        let fixed = if face.is_positive() { last } else { 0 };
        (0..n)
            .map(|row| {
                (0..n)
                    .map(|col| {
                        let mut position = [0; 3];
                        position[face.axis().index()] = fixed;
                        position[row_axis.index()] = if row_rev { last - row } else { row };
                        position[col_axis.index()] = if col_rev { last - col } else { col };
                        self.cubie_at(position)
                            .and_then(|id| self.cubie(id))
                            .map_or(Color::Hidden, |cubie| cubie.shown_color(face))
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for PuzzleGrid {
    /// Prints the six faces as an unfolded net of color letters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size;
        let pad = " ".repeat(n + 1);
        let row_text = |face: Face, row: usize| -> String {
            self.face_colors(face)[row]
                .iter()
                .map(|color| color.letter())
                .collect()
        };

        for row in 0..n {
            writeln!(f, "{pad}{}", row_text(Face::Top, row))?;
        }
        for row in 0..n {
            writeln!(
                f,
                "{} {} {} {}",
                row_text(Face::Left, row),
                row_text(Face::Front, row),
                row_text(Face::Right, row),
                row_text(Face::Back, row),
            )?;
        }
        for row in 0..n {
            writeln!(f, "{pad}{}", row_text(Face::Bottom, row))?;
        }
        Ok(())
    }
}
