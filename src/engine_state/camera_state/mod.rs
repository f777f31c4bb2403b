//! # Camera State Management
//!
//! This module handles all camera-related functionality:
//! - The render-facing camera handle, projection, and GPU uniform
//! - The first-person controller that steers the camera from input
//!
//! ## Core Components
//! - `Camera3d`: position, look-at target, up vector, field of view
//! - `Projection`: perspective projection settings
//! - `CameraUniform`: GPU representation of camera data for shaders
//! - `FirstPersonController`: pointer/key input to camera pose, once per frame

pub mod camera;
pub mod first_person;

pub use camera::{Camera3d, CameraUniform, Projection};
pub use first_person::{CameraMode, FirstPersonController, MoveDirection, MovementBindings};
