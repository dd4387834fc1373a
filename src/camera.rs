use nalgebra::{Matrix4, Point3, Vector3};

/// Field of view used by [`Projection::default`], in degrees.
const DEFAULT_FOVY_DEGREES: f32 = 60.0;
/// Distance of the default camera from the puzzle center.
const DEFAULT_DISTANCE: f32 = 15.0;

/// Position and orientation of the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    /// Camera orbiting the origin at `distance`, looking at it.
    ///
    /// # Arguments
    /// * `distance` - Distance from the origin
    /// * `yaw` - Rotation about the vertical axis in degrees; `0` looks down -Z
    /// * `pitch` - Elevation in degrees, clamped to avoid the poles
    pub fn orbit(distance: f32, yaw: f32, pitch: f32) -> Self {
        let yaw_rad = yaw.to_radians();
        let pitch_rad = pitch.clamp(-89.0, 89.0).to_radians();

        let x = distance * pitch_rad.cos() * yaw_rad.sin();
        let y = distance * pitch_rad.sin();
        let z = distance * pitch_rad.cos() * yaw_rad.cos();

        Self {
            eye: Point3::new(x, y, z),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }

    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::orbit(DEFAULT_DISTANCE, 0.0, 0.0)
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn build_projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fovy, self.znear, self.zfar)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            fovy: DEFAULT_FOVY_DEGREES.to_radians(),
            znear: 1.0,
            zfar: 100.0,
        }
    }
}

/// Everything a picker needs to turn a pointer position into a ray.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewpoint {
    pub camera: Camera,
    pub projection: Projection,
}

impl Viewpoint {
    pub fn build_view_proj_matrix(&self) -> Matrix4<f32> {
        self.projection.build_projection_matrix() * self.camera.build_view_matrix()
    }
}
