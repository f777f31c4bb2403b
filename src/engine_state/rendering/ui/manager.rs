//! UI manager for handling UI elements and their shared buffers.
//!
//! This module provides a manager for named UI elements that rebuilds the
//! shared vertex and index buffers whenever an element is added, removed, or
//! updated. The element set is tiny (a crosshair and a few status badges),
//! so a full rebuild on change is cheaper than tracking per-element offsets.
//!
//! Elements draw in name order; the sorted map gives a stable z-order
//! between overlapping translucent rectangles.

use std::collections::BTreeMap;
use std::mem::size_of;

use wgpu::{Color, Device, Queue};

use crate::engine_state::buffer_state::BufferState;

use super::primitives::{UiElement, UiElementProperties, UiRectangle, UiVertex};

/// Buffer names used by the UI system
pub mod buffer_names {
    /// Name of the UI vertex buffer in the buffer state
    pub const UI_VERTEX_BUFFER: &str = "ui_vertex_buffer";
    /// Name of the UI index buffer in the buffer state
    pub const UI_INDEX_BUFFER: &str = "ui_index_buffer";
}

/// Manages named UI elements and their shared buffers.
pub struct UiMeshManager {
    /// Named UI elements, drawn in name order
    elements: BTreeMap<String, Box<dyn UiElement>>,
    /// Total number of indices across all elements
    total_indices: u32,
    /// Set when the shared buffers no longer match the element set
    dirty: bool,
}

impl UiMeshManager {
    /// Creates an empty UI manager.
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            total_indices: 0,
            dirty: false,
        }
    }

    /// Adds (or replaces) a rectangle element.
    ///
    /// # Arguments
    /// * `name` - Element name, also its draw-order key
    /// * `position` - Center position in normalized device coordinates
    /// * `size` - Size in normalized device coordinates
    /// * `color` - Fill color
    pub fn add_rectangle(
        &mut self,
        name: &str,
        position: (f32, f32),
        size: (f32, f32),
        color: Color,
    ) {
        self.elements.insert(
            name.to_string(),
            Box::new(UiRectangle::new(position, size, color)),
        );
        self.dirty = true;
    }

    /// Adds (or replaces) a rectangle centered on screen.
    ///
    /// # Arguments
    /// * `name` - Element name
    /// * `relative_size` - Size as a fraction of the screen (0.0 to 1.0)
    /// * `color` - Fill color
    pub fn add_centered_rectangle(
        &mut self,
        name: &str,
        relative_size: (f32, f32),
        color: Color,
    ) {
        self.elements.insert(
            name.to_string(),
            Box::new(UiRectangle::centered(relative_size, color)),
        );
        self.dirty = true;
    }

    /// Removes an element by name. Unknown names are ignored.
    pub fn remove_element(&mut self, name: &str) {
        if self.elements.remove(name).is_some() {
            self.dirty = true;
        }
    }

    /// Whether an element with this name currently exists.
    pub fn has_element(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Applies property updates to a named element.
    ///
    /// # Arguments
    /// * `name` - Element name
    /// * `properties` - The properties to apply
    pub fn update_element(&mut self, name: &str, properties: &UiElementProperties) {
        if let Some(element) = self.elements.get_mut(name) {
            if element.update_properties(properties) {
                self.dirty = true;
            }
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of indices to draw after the last upload.
    pub fn get_index_count(&self) -> u32 {
        self.total_indices
    }

    /// Rebuilds and uploads the shared buffers if anything changed.
    ///
    /// # Arguments
    /// * `device` - The GPU device, used when the buffers must grow
    /// * `queue` - The queue the vertex data is written through
    /// * `buffer_state` - The shared buffer registry
    pub fn upload(&mut self, device: &Device, queue: &Queue, buffer_state: &mut BufferState) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let mut vertices: Vec<UiVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        for element in self.elements.values() {
            indices.extend(element.get_indices(vertices.len() as u32));
            vertices.extend(element.get_vertices());
        }
        self.total_indices = indices.len() as u32;

        if vertices.is_empty() {
            return;
        }

        buffer_state.ensure_capacity(
            device,
            buffer_names::UI_VERTEX_BUFFER,
            (vertices.len() * size_of::<UiVertex>()) as u64,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        );
        buffer_state.ensure_capacity(
            device,
            buffer_names::UI_INDEX_BUFFER,
            (indices.len() * size_of::<u32>()) as u64,
            wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        );

        buffer_state.write_buffer(queue, buffer_names::UI_VERTEX_BUFFER, 0, &vertices);
        buffer_state.write_buffer(queue, buffer_names::UI_INDEX_BUFFER, 0, &indices);
    }
}

impl Default for UiMeshManager {
    fn default() -> Self {
        Self::new()
    }
}
