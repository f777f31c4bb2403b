//! UI rendering system for the sandbox.
//!
//! This module contains components for rendering 2D overlay elements on top
//! of the 3D voxel world: the crosshair, the respawn dimmer, and the status
//! badges. It provides simple primitives like rectangles that can be
//! positioned on screen.

mod manager;
mod primitives;
mod renderer;

pub use manager::UiMeshManager;
pub use primitives::{UiElement, UiElementProperties, UiRectangle, UiVertex};
pub use renderer::UiRenderer;
