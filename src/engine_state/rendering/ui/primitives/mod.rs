//! UI primitive elements for the sandbox overlay.
//!
//! This module defines the basic building blocks for UI elements like vertices
//! and common traits that all UI elements must implement.

mod rectangle;

use wgpu::Color;

pub use rectangle::UiRectangle;

/// Properties for updating UI elements.
///
/// This struct provides a flexible way to update UI element properties
/// without having to specify all properties every time.
#[derive(Debug, Clone, Default)]
pub struct UiElementProperties {
    /// Position of the element (optional)
    pub position: Option<(f32, f32)>,
    /// Size of the element (optional)
    pub size: Option<(f32, f32)>,
    /// Color of the element (optional)
    pub color: Option<Color>,
}

impl UiElementProperties {
    /// Creates a new empty properties object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position property.
    pub fn with_position(mut self, position: (f32, f32)) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the size property.
    pub fn with_size(mut self, size: (f32, f32)) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the color property.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Represents a vertex in a UI element.
///
/// UI vertices define overlay geometry directly in normalized device
/// coordinates and carry a flat RGBA color. The struct is `#[repr(C)]` so
/// `bytemuck` can hand it to the GPU without copying.
///
/// # GPU Representation
///
/// In the shader, this corresponds to:
/// ```wgsl
/// struct UiVertex {
///     @location(0) position: vec3<f32>,
///     @location(1) color: vec4<f32>,
/// }
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position of the vertex in normalized device coordinates
    ///
    /// The coordinates are in the range [-1.0, 1.0]; z is used for depth
    /// ordering and is 0.0 for every overlay element.
    pub position: [f32; 3],

    /// Color of the vertex (RGBA), each component in [0.0, 1.0]
    pub color: [f32; 4],
}

/// Common trait for all UI elements.
pub trait UiElement {
    /// Gets the vertices for this UI element.
    fn get_vertices(&self) -> Vec<UiVertex>;

    /// Gets the indices for this UI element.
    ///
    /// # Arguments
    /// * `base_vertex` - The base vertex index to offset indices by
    fn get_indices(&self, base_vertex: u32) -> Vec<u32>;

    /// Gets the number of indices for this UI element.
    fn index_count(&self) -> u32;

    /// Gets the number of vertices for this UI element.
    fn vertex_count(&self) -> u32;

    /// Applies the given properties to this element.
    ///
    /// # Returns
    /// `true` when anything changed and the shared buffers need a rebuild.
    fn update_properties(&mut self, properties: &UiElementProperties) -> bool;
}
