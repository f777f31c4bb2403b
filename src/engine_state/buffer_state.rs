//! # Buffer State Module
//!
//! This module provides a centralized registry for the GPU buffers used by
//! the renderer. Buffers are referenced by name (static string) so the
//! render passes never hold buffer objects themselves.
//!
//! ## Architecture
//!
//! `BufferState` owns every buffer and exposes create/write/get primitives.
//! Buffers whose contents vary per frame (the voxel and outline instance
//! buffers) are grown on demand through [`BufferState::ensure_capacity`];
//! growth doubles so steady-state frames never reallocate.

use std::collections::HashMap;

use bytemuck::NoUninit;
use wgpu::{util::DeviceExt, Buffer, Device, Queue};

/// Central registry for GPU buffers, keyed by static name.
///
/// # Examples
///
/// ```ignore
/// let mut buffer_state = BufferState::new();
///
/// buffer_state.create_buffer_init(
///     &device,
///     "cube_vertex_buffer",
///     wgpu::util::BufferInitDescriptor {
///         label: Some("cube_vertex_buffer"),
///         contents: bytemuck::cast_slice(&CUBE_VERTICES),
///         usage: wgpu::BufferUsages::VERTEX,
///     },
/// );
///
/// let vertex_buffer = buffer_state.get_buffer("cube_vertex_buffer");
/// ```
pub struct BufferState {
    /// Map of buffer names to buffer objects
    buffers: HashMap<&'static str, Buffer>,
}

impl BufferState {
    /// Creates an empty buffer registry.
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
        }
    }

    /// Creates an empty buffer with the specified descriptor.
    ///
    /// # Arguments
    /// * `device` - The GPU device
    /// * `buffer_name` - Unique name for the buffer
    /// * `buffer_descriptor` - Buffer configuration descriptor
    pub fn create_buffer(
        &mut self,
        device: &Device,
        buffer_name: &'static str,
        buffer_descriptor: wgpu::BufferDescriptor,
    ) {
        let buffer = device.create_buffer(&buffer_descriptor);
        self.buffers.insert(buffer_name, buffer);
    }

    /// Creates a buffer initialized with the given contents.
    ///
    /// # Arguments
    /// * `device` - The GPU device
    /// * `buffer_name` - Unique name for the buffer
    /// * `init_descriptor` - Descriptor carrying the initial contents
    pub fn create_buffer_init(
        &mut self,
        device: &Device,
        buffer_name: &'static str,
        init_descriptor: wgpu::util::BufferInitDescriptor,
    ) {
        let buffer = device.create_buffer_init(&init_descriptor);
        self.buffers.insert(buffer_name, buffer);
    }

    /// Writes `data` into a registered buffer at `offset`.
    ///
    /// # Arguments
    /// * `queue` - The GPU queue to submit the write through
    /// * `buffer_name` - Name of the target buffer
    /// * `offset` - Byte offset into the buffer
    /// * `data` - The values to write
    ///
    /// # Panics
    /// Panics if no buffer with the given name exists.
    pub fn write_buffer<T: NoUninit>(
        &self,
        queue: &Queue,
        buffer_name: &'static str,
        offset: u64,
        data: &[T],
    ) {
        let buffer = self.get_buffer(buffer_name);
        queue.write_buffer(buffer, offset, bytemuck::cast_slice(data));
    }

    /// Ensures a buffer exists with at least `required_size` bytes.
    ///
    /// Recreates the buffer with doubled capacity when it is missing or too
    /// small. Contents are not preserved; callers rewrite the buffer every
    /// frame anyway.
    ///
    /// # Arguments
    /// * `device` - The GPU device
    /// * `buffer_name` - Name of the buffer
    /// * `required_size` - Minimum size in bytes
    /// * `usage` - Usage flags applied when the buffer is (re)created
    pub fn ensure_capacity(
        &mut self,
        device: &Device,
        buffer_name: &'static str,
        required_size: u64,
        usage: wgpu::BufferUsages,
    ) {
        let current_size = self.buffers.get(buffer_name).map(Buffer::size);
        if current_size.is_some_and(|size| size >= required_size) {
            return;
        }

        let new_size = required_size.next_power_of_two().max(1024);
        log::debug!(
            "growing buffer {:?} from {:?} to {} bytes",
            buffer_name,
            current_size,
            new_size
        );
        self.create_buffer(
            device,
            buffer_name,
            wgpu::BufferDescriptor {
                label: Some(buffer_name),
                size: new_size,
                usage,
                mapped_at_creation: false,
            },
        );
    }

    /// Retrieves a buffer by name.
    ///
    /// # Panics
    /// Panics if no buffer with the given name exists.
    pub fn get_buffer(&self, buffer_name: &'static str) -> &Buffer {
        self.buffers
            .get(buffer_name)
            .unwrap_or_else(|| panic!("unknown buffer {buffer_name:?}"))
    }
}

impl Default for BufferState {
    fn default() -> Self {
        Self::new()
    }
}
