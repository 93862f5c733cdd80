//! Orbit camera aimed at the room center.
//!
//! [`Camera`] only stores a position; the look-at target is always the origin and
//! the view matrix is recomputed whenever the position changes. The
//! [`OrbitController`] turns pointer drags and wheel steps into new positions.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::config::{CameraBounds, ViewerConfig};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const EPSILON: f32 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Point3<f32>,
    up: Vector3<f32>,
    view: Matrix4<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P) -> Self {
        let mut camera = Self {
            position: position.into(),
            up: Vector3::unit_y(),
            view: Matrix4::from_scale(1.0),
        };
        camera.look_at_target();
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Always the room origin.
    pub fn target(&self) -> Point3<f32> {
        Point3::origin()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.look_at_target();
    }

    pub fn distance(&self) -> f32 {
        self.position.to_vec().magnitude()
    }

    /// Unit vector from the camera towards the target.
    pub fn forward(&self) -> Vector3<f32> {
        (self.target() - self.position).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    fn look_at_target(&mut self) {
        let offset = self.position.to_vec();
        if offset.magnitude2() < EPSILON {
            // no direction to look in, keep the previous orientation
            return;
        }
        // straight above or below the origin the world up is parallel to the view direction
        self.up = if offset.x.abs() < EPSILON && offset.z.abs() < EPSILON {
            -Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        self.view = Matrix4::look_at_rh(self.position, self.target(), self.up);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn from_config(width: u32, height: u32, config: &ViewerConfig) -> Self {
        Self::new(
            width,
            height,
            cgmath::Deg(config.fovy),
            config.znear,
            config.zfar,
        )
    }

    /// Follows a new output size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn znear(&self) -> f32 {
        self.znear
    }

    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// State of an active drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDragState {
    pub dragging: bool,
    pub last_x: f32,
    pub last_y: f32,
}

/// Custom orbit and zoom controls.
///
/// * horizontal drag rotates the camera's (x, z) pair around the y axis
/// * vertical drag lifts or lowers the camera
/// * the wheel scales the whole position vector
#[derive(Clone, Debug)]
pub struct OrbitController {
    orbit_speed: f32,
    lift_speed: f32,
    zoom_factor: f32,
    bounds: Option<CameraBounds>,
    drag: PointerDragState,
}

impl OrbitController {
    pub fn new(orbit_speed: f32, lift_speed: f32, zoom_factor: f32) -> Self {
        Self {
            orbit_speed,
            lift_speed,
            zoom_factor,
            bounds: None,
            drag: PointerDragState::default(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            bounds: config.camera_bounds.map(|bounds| bounds.normalized()),
            ..Self::new(config.orbit_speed, config.lift_speed, config.zoom_factor)
        }
    }

    pub fn with_bounds(mut self, bounds: CameraBounds) -> Self {
        self.bounds = Some(bounds.normalized());
        self
    }

    pub fn drag_state(&self) -> &PointerDragState {
        &self.drag
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag = PointerDragState {
            dragging: true,
            last_x: x,
            last_y: y,
        };
    }

    /// Orbits by the distance moved since the last pointer event. Returns whether
    /// the camera moved.
    pub fn pointer_move(&mut self, camera: &mut Camera, x: f32, y: f32) -> bool {
        if !self.drag.dragging {
            return false;
        }
        let (dx, dy) = (x - self.drag.last_x, y - self.drag.last_y);
        self.drag.last_x = x;
        self.drag.last_y = y;
        self.orbit(camera, dx, dy);
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = PointerDragState::default();
    }

    /// Rotates by `dx` and lifts by `dy` pixels.
    pub fn orbit(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let position = camera.position();
        let angle = dx * self.orbit_speed;
        let (sin, cos) = angle.sin_cos();
        let orbited = Vector3::new(
            position.x * cos - position.z * sin,
            position.y + dy * self.lift_speed,
            position.x * sin + position.z * cos,
        );
        camera.set_position(Point3::from_vec(self.clamp(orbited)));
    }

    /// Positive `delta_y` zooms out, negative zooms in by the inverse factor.
    pub fn wheel(&self, camera: &mut Camera, delta_y: f32) -> bool {
        let scale = if delta_y > 0.0 {
            self.zoom_factor
        } else if delta_y < 0.0 {
            1.0 / self.zoom_factor
        } else {
            return false;
        };
        let zoomed = camera.position().to_vec() * scale;
        camera.set_position(Point3::from_vec(self.clamp(zoomed)));
        true
    }

    /// Clamps height first, then rescales the horizontal offset so the distance
    /// to the origin is within bounds. The distance limit wins when the height
    /// range reaches further than it.
    fn clamp(&self, position: Vector3<f32>) -> Vector3<f32> {
        let Some(bounds) = self.bounds else {
            return position;
        };
        let y = position.y.clamp(bounds.min_y, bounds.max_y);
        let horizontal = Vector3::new(position.x, 0.0, position.z);
        let distance = (horizontal.magnitude2() + y * y).sqrt();
        let target = distance.clamp(bounds.min_distance, bounds.max_distance);
        if (target - distance).abs() < EPSILON {
            return Vector3::new(position.x, y, position.z);
        }
        let y = y.clamp(-target, target);
        let radius = (target * target - y * y).max(0.0).sqrt();
        let direction = if horizontal.magnitude2() > EPSILON {
            horizontal.normalize()
        } else {
            Vector3::unit_z()
        };
        Vector3::new(direction.x * radius, y, direction.z * radius)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position().to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
