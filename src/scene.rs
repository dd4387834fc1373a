//! Headless implementations of the presentation-side traits.
//!
//! [`HeadlessScene`] mirrors what a renderer would hold: the rotation of the
//! temporary turning group and the tint of every shown facelet. It drives the
//! command-line demo and lets tests observe what the core asks a view to do.

use std::collections::HashMap;

use nalgebra::{UnitQuaternion, Vector4};

use crate::cube::{Axis, Color, CubieId, FaceletId, FaceletView};
use crate::scheduler::SliceAnimator;

/// Rotation of the group of cubies currently turning.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupRotation {
    members: Vec<CubieId>,
    rotation: UnitQuaternion<f32>,
}

impl Default for GroupRotation {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            rotation: UnitQuaternion::identity(),
        }
    }
}

impl GroupRotation {
    /// Cubies in the group, empty when no turn is animating.
    pub fn members(&self) -> &[CubieId] {
        &self.members
    }

    /// Accumulated rotation of the group.
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rotation
    }

    /// Rotation a renderer should apply to one cubie.
    pub fn cubie_rotation(&self, cubie: CubieId) -> UnitQuaternion<f32> {
        if self.members.contains(&cubie) {
            self.rotation
        } else {
            UnitQuaternion::identity()
        }
    }
}

impl SliceAnimator for GroupRotation {
    fn begin_group(&mut self, _axis: Axis, cubies: &[CubieId]) {
        self.members = cubies.to_vec();
        self.rotation = UnitQuaternion::identity();
    }

    fn rotate_group(&mut self, axis: Axis, angle: f32) {
        self.rotation = UnitQuaternion::from_axis_angle(&axis.unit(), angle) * self.rotation;
    }

    fn end_group(&mut self) {
        self.members.clear();
        self.rotation = UnitQuaternion::identity();
    }
}

/// In-memory scene: turning group plus facelet tints.
#[derive(Clone, Debug, Default)]
pub struct HeadlessScene {
    group: GroupRotation,
    tints: HashMap<FaceletId, Color>,
    /// Number of completed group animations
    turns_animated: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> &GroupRotation {
        &self.group
    }

    /// Color last painted on a shown facelet.
    pub fn tint(&self, facelet: FaceletId) -> Option<Color> {
        self.tints.get(&facelet).copied()
    }

    /// RGBA a renderer would use for the facelet.
    pub fn rgba(&self, facelet: FaceletId) -> Option<Vector4<f32>> {
        self.tint(facelet).map(Vector4::from)
    }

    pub fn shown_facelets(&self) -> usize {
        self.tints.len()
    }

    pub fn turns_animated(&self) -> usize {
        self.turns_animated
    }
}

impl SliceAnimator for HeadlessScene {
    fn begin_group(&mut self, axis: Axis, cubies: &[CubieId]) {
        self.group.begin_group(axis, cubies);
    }

    fn rotate_group(&mut self, axis: Axis, angle: f32) {
        self.group.rotate_group(axis, angle);
    }

    fn end_group(&mut self) {
        log::trace!("group settled at {:.3} rad", self.group.rotation().angle());
        self.group.end_group();
        self.turns_animated += 1;
    }
}

impl FaceletView for HeadlessScene {
    fn show_facelet(&mut self, facelet: FaceletId) {
        self.tints.entry(facelet).or_insert(Color::Hidden);
    }

    fn tint_facelet(&mut self, facelet: FaceletId, color: Color) {
        if let Some(tint) = self.tints.get_mut(&facelet) {
            *tint = color;
        } else {
            log::warn!(
                "tint for facelet {:?} {} that was never shown",
                facelet.cubie,
                facelet.face
            );
        }
    }
}

/// Scene that ignores everything, for hosts that only need the color state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScene;

impl SliceAnimator for NoopScene {
    fn begin_group(&mut self, _axis: Axis, _cubies: &[CubieId]) {}

    fn rotate_group(&mut self, _axis: Axis, _angle: f32) {}

    fn end_group(&mut self) {}
}

impl FaceletView for NoopScene {
    fn show_facelet(&mut self, _facelet: FaceletId) {}

    fn tint_facelet(&mut self, _facelet: FaceletId, _color: Color) {}
}
