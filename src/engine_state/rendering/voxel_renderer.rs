//! Voxel renderer module for the sandbox.
//!
//! This module draws the world as instanced textured cubes and draws the
//! selection and ground-marker outlines as instanced line-list cubes.
//!
//! # Architecture
//!
//! The voxel renderer is responsible for:
//! 1. Creating and managing the cube and outline render pipelines
//! 2. Binding the shared camera and texture-array bind groups
//! 3. Issuing one instanced draw per pipeline from the shared buffers
//!
//! The instance buffers are rebuilt by the engine every frame; this module
//! only consumes them.

use wgpu::{DepthStencilState, Device, RenderPass, RenderPipeline, ShaderModule, TextureFormat};

use crate::engine_state::buffer_state::BufferState;

use super::vertex::{CubeVertex, VoxelInstance, WireVertex, CUBE_INDICES, WIRE_INDICES};

/// Buffer names used by the voxel renderer
pub mod buffer_names {
    /// Shared unit-cube vertex buffer
    pub const CUBE_VERTEX_BUFFER: &str = "cube_vertex_buffer";
    /// Shared unit-cube index buffer
    pub const CUBE_INDEX_BUFFER: &str = "cube_index_buffer";
    /// Per-voxel instance buffer, rebuilt every frame
    pub const VOXEL_INSTANCE_BUFFER: &str = "voxel_instance_buffer";
    /// Outline cube vertex buffer (line list)
    pub const WIRE_VERTEX_BUFFER: &str = "wire_vertex_buffer";
    /// Outline cube index buffer (line list)
    pub const WIRE_INDEX_BUFFER: &str = "wire_index_buffer";
    /// Outline instance buffer, rebuilt every frame
    pub const WIRE_INSTANCE_BUFFER: &str = "wire_instance_buffer";
}

/// Renders the voxel world and the outline cubes.
pub struct VoxelRenderer {
    /// Pipeline for the instanced textured cubes
    cube_pipeline: RenderPipeline,
    /// Pipeline for the instanced wireframe outlines
    wire_pipeline: RenderPipeline,
}

impl VoxelRenderer {
    /// Creates a new `VoxelRenderer` instance.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `shader_string` - The WGSL shader source containing the cube and
    ///   wire entry points
    /// * `texture_format` - The texture format to use for rendering
    /// * `camera_layout` - Bind group layout for the camera uniform
    /// * `texture_layout` - Bind group layout for the voxel texture array
    /// * `depth_stencil` - Depth stencil state shared with the UI pass
    ///
    /// # Returns
    /// A new `VoxelRenderer` with both pipelines initialized
    pub fn new(
        device: &Device,
        shader_string: &str,
        texture_format: TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        depth_stencil: Option<DepthStencilState>,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Voxel Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_string.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Voxel Render Pipeline Layout"),
            bind_group_layouts: &[camera_layout, texture_layout],
            push_constant_ranges: &[],
        });

        let cube_pipeline = Self::create_cube_pipeline(
            device,
            &shader,
            texture_format,
            &pipeline_layout,
            depth_stencil.clone(),
        );

        let wire_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Outline Render Pipeline Layout"),
            bind_group_layouts: &[camera_layout],
            push_constant_ranges: &[],
        });
        let wire_pipeline =
            Self::create_wire_pipeline(device, &shader, texture_format, &wire_layout, depth_stencil);

        Self {
            cube_pipeline,
            wire_pipeline,
        }
    }

    fn create_cube_pipeline(
        device: &Device,
        shader: &ShaderModule,
        texture_format: TextureFormat,
        layout: &wgpu::PipelineLayout,
        depth_stencil: Option<DepthStencilState>,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Voxel Render Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::desc(), VoxelInstance::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_wire_pipeline(
        device: &Device,
        shader: &ShaderModule,
        texture_format: TextureFormat,
        layout: &wgpu::PipelineLayout,
        depth_stencil: Option<DepthStencilState>,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Outline Render Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_wire"),
                compilation_options: Default::default(),
                buffers: &[WireVertex::desc(), VoxelInstance::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_wire"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Draws the voxel instances and the outline instances.
    ///
    /// # Arguments
    /// * `render_pass` - The render pass to draw with
    /// * `buffer_state` - The buffer registry holding all shared buffers
    /// * `camera_bind_group` - The camera uniform bind group
    /// * `texture_bind_group` - The voxel texture-array bind group
    /// * `instance_count` - Number of voxel instances uploaded this frame
    /// * `wire_count` - Number of outline instances uploaded this frame
    pub fn render<'a>(
        &self,
        render_pass: &mut RenderPass<'a>,
        buffer_state: &BufferState,
        camera_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
        instance_count: u32,
        wire_count: u32,
    ) {
        if instance_count > 0 {
            render_pass.set_pipeline(&self.cube_pipeline);
            render_pass.set_bind_group(0, camera_bind_group, &[]);
            render_pass.set_bind_group(1, texture_bind_group, &[]);
            render_pass.set_vertex_buffer(
                0,
                buffer_state
                    .get_buffer(buffer_names::CUBE_VERTEX_BUFFER)
                    .slice(..),
            );
            render_pass.set_vertex_buffer(
                1,
                buffer_state
                    .get_buffer(buffer_names::VOXEL_INSTANCE_BUFFER)
                    .slice(..),
            );
            render_pass.set_index_buffer(
                buffer_state
                    .get_buffer(buffer_names::CUBE_INDEX_BUFFER)
                    .slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..instance_count);
        }

        if wire_count > 0 {
            render_pass.set_pipeline(&self.wire_pipeline);
            render_pass.set_bind_group(0, camera_bind_group, &[]);
            render_pass.set_vertex_buffer(
                0,
                buffer_state
                    .get_buffer(buffer_names::WIRE_VERTEX_BUFFER)
                    .slice(..),
            );
            render_pass.set_vertex_buffer(
                1,
                buffer_state
                    .get_buffer(buffer_names::WIRE_INSTANCE_BUFFER)
                    .slice(..),
            );
            render_pass.set_index_buffer(
                buffer_state
                    .get_buffer(buffer_names::WIRE_INDEX_BUFFER)
                    .slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..WIRE_INDICES.len() as u32, 0, 0..wire_count);
        }
    }
}
