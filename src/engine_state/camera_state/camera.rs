//! # Camera Implementation
//!
//! This module contains the render-facing camera types:
//! - `Camera3d`: position, look-at target, up vector, and field of view
//! - `Projection`: perspective projection settings
//! - `CameraUniform`: packed camera data for GPU shaders
//!
//! The camera is steered each frame by the first-person controller; the
//! renderer only reads it.

use cgmath::*;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// WGPU uses a coordinate system where:
/// - X is right
/// - Y is up
/// - Z is forward (unlike OpenGL where Z is backward)
/// - NDC (Normalized Device Coordinates) range from -1 to 1 in X and Y, and 0 to 1 in Z
///
/// This matrix performs two main transformations:
/// 1. Scales the Z coordinate from [-1, 1] to [-0.5, 0.5]
/// 2. Translates the Z coordinate from [-0.5, 0.5] to [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// A look-at camera in 3D space.
///
/// Holds the position, look-at target, and up vector the renderer consumes.
/// The first-person controller rewrites `position`, `target`, and the up
/// vector's lean every frame.
#[derive(Debug, Clone, Copy)]
pub struct Camera3d {
    /// The camera's eye position in world space
    pub position: Point3<f32>,
    /// The point the camera is looking at
    pub target: Point3<f32>,
    /// The camera's up vector
    pub up: Vector3<f32>,
    /// Vertical field of view
    pub fovy: Deg<f32>,
}

impl Camera3d {
    /// Creates a new camera at `position` looking at `target`.
    ///
    /// # Arguments
    /// * `position` - Eye position in world space
    /// * `target` - Initial look-at point
    /// * `fovy` - Vertical field of view in degrees
    pub fn new(position: Point3<f32>, target: Point3<f32>, fovy: Deg<f32>) -> Self {
        Camera3d {
            position,
            target,
            up: Vector3::unit_y(),
            fovy,
        }
    }

    /// The normalized direction from the eye through the look-at target.
    ///
    /// This is also the direction of the pick ray cast through the center
    /// of the viewport.
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// Calculates the view matrix for this camera.
    ///
    /// # Returns
    /// A 4x4 view matrix that transforms world coordinates to view space
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
/// It manages the aspect ratio, field of view, and near/far clipping planes.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let aspect = width as f32 / height as f32;
        let fovy: Rad<f32> = fovy.into();
        Self {
            aspect,
            fovy,
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// # Arguments
    /// * `width` - New viewport width in pixels
    /// * `height` - New viewport height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Calculates the projection matrix.
    ///
    /// Combines the perspective projection with the OpenGL to WGPU coordinate system transform.
    ///
    /// # Returns
    /// A 4x4 projection matrix ready for use in shaders
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// This struct is used to pass camera data to the GPU in a format that matches
/// the layout expected by the shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath matrices aren't Pod, so the Matrix4s are converted to 4x4 f32 arrays
    view_proj: [[f32; 4]; 4],
    view_proj_inverse: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with identity matrices and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
            view_proj_inverse: cgmath::Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Updates the view-projection matrix and position based on the current camera state.
    ///
    /// # Arguments
    /// * `camera` - The camera to get view matrix and position from
    /// * `projection` - The projection to use
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera3d, projection: &Projection) {
        let viewproj = projection.calc_matrix() * camera.calc_matrix();
        self.view_proj = viewproj.into();
        self.view_proj_inverse = viewproj.invert().unwrap().into();
        let pos3: [f32; 3] = camera.position.into();

        self.position = [pos3[0], pos3[1], pos3[2], 0.0];
    }
}
