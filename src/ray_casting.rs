//! Ray casting for pointer-based facelet picking.
//!
//! Provides [`RayPicker`], a CPU picker that intersects the pointer ray with
//! the boxes of every surface facelet tile and reports the nearest hit.

use nalgebra::{Point2, Point3, Vector3, Vector4};

use crate::camera::Viewpoint;
use crate::cube::FaceletId;
use crate::gesture::{PickHit, Picker};
use crate::grid::PuzzleGrid;

/// Edge length of a facelet tile box.
pub const TILE_SIZE: f32 = 0.85;
/// Distance from the cubie center to the tile center along the facelet normal.
pub const TILE_OFFSET: f32 = 0.15;

/// 3D ray for intersection testing
#[derive(Debug, Clone)]
pub struct Ray {
    /// Ray origin point in 3D space
    pub origin: Point3<f32>,
    /// Ray direction vector (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct AABB {
    /// Minimum corner of the 3D bounding box
    pub min: Point3<f32>,
    /// Maximum corner of the 3D bounding box
    pub max: Point3<f32>,
}

impl AABB {
    /// Create a 3D AABB centered at a point with given size
    pub fn from_center_size(center: Point3<f32>, size: f32) -> Self {
        let half = Vector3::repeat(size * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Calculate the pointer ray through the scene.
///
/// `pointer` is in normalized device coordinates: both components in
/// `-1.0..=1.0`, `y` pointing up. Returns `None` if the view-projection
/// matrix is degenerate.
pub fn calculate_pointer_ray(pointer: Point2<f32>, viewpoint: &Viewpoint) -> Option<Ray> {
    let inv_view_proj = viewpoint.build_view_proj_matrix().try_inverse()?;

    let near = inv_view_proj * Vector4::new(pointer.x, pointer.y, -1.0, 1.0);
    let far = inv_view_proj * Vector4::new(pointer.x, pointer.y, 1.0, 1.0);
    if near.w == 0.0 || far.w == 0.0 {
        return None;
    }

    // Convert from homogeneous coordinates
    let ray_start = Point3::from(near.xyz() / near.w);
    let ray_end = Point3::from(far.xyz() / far.w);

    Some(Ray {
        origin: ray_start,
        direction: (ray_end - ray_start).normalize(),
    })
}

/// Test ray intersection with a 3D axis-aligned bounding box using the slab
/// method.
///
/// Returns the distance along the ray to the entry point, or to the exit point
/// when the ray starts inside the box.
pub fn ray_aabb_intersection(ray: &Ray, aabb: &AABB) -> Option<f32> {
    let inv_dir = ray.direction.map(|component| 1.0 / component);

    let t1 = (aabb.min - ray.origin).component_mul(&inv_dir);
    let t2 = (aabb.max - ray.origin).component_mul(&inv_dir);

    // tmin = where the ray enters the box, tmax = where it exits
    let tmin = t1.zip_map(&t2, f32::min).max();
    let tmax = t1.zip_map(&t2, f32::max).min();

    if tmax < 0.0 || tmin > tmax {
        None
    } else if tmin >= 0.0 {
        Some(tmin)
    } else {
        Some(tmax)
    }
}

/// Box of one facelet tile in world space, or `None` for unknown cubies.
pub fn facelet_aabb(grid: &PuzzleGrid, facelet: FaceletId) -> Option<AABB> {
    let center = grid.cubie_center(facelet.cubie)? + facelet.face.normal() * TILE_OFFSET;
    Some(AABB::from_center_size(center, TILE_SIZE))
}

/// Picks the nearest surface facelet under the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayPicker;

impl Picker for RayPicker {
    type Camera = Viewpoint;

    fn pick(
        &self,
        grid: &PuzzleGrid,
        pointer: Point2<f32>,
        camera: &Viewpoint,
    ) -> Option<PickHit> {
        let ray = calculate_pointer_ray(pointer, camera)?;

        let mut closest: Option<(f32, FaceletId)> = None;
        for facelet in grid.surface_facelets() {
            let Some(aabb) = facelet_aabb(grid, facelet) else {
                continue;
            };
            if let Some(distance) = ray_aabb_intersection(&ray, &aabb) {
                if closest.is_none_or(|(best, _)| distance < best) {
                    closest = Some((distance, facelet));
                }
            }
        }

        closest.map(|(distance, facelet)| PickHit {
            point: ray.at(distance),
            facelet,
        })
    }
}
