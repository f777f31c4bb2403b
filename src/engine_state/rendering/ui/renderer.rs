//! UI rendering module for the sandbox.
//!
//! This module handles the rendering of overlay elements on top of the 3D
//! scene. The UiRenderer owns the overlay pipeline and draws the shared
//! vertex/index buffers maintained by the UI mesh manager.

use wgpu::{
    DepthStencilState, Device, RenderPass, RenderPipeline, ShaderModule, TextureFormat,
};

use crate::engine_state::buffer_state::BufferState;

use super::manager::buffer_names::{UI_INDEX_BUFFER, UI_VERTEX_BUFFER};
use super::primitives::UiVertex;

/// Draws overlay rectangles on top of the 3D scene.
pub struct UiRenderer {
    /// The WebGPU render pipeline for UI elements
    render_pipeline: RenderPipeline,
}

impl UiRenderer {
    /// Creates a new `UiRenderer` instance.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `format` - Texture format for the surface
    /// * `depth_stencil` - Depth stencil state shared with the scene pass
    /// * `ui_shader_source` - Source code for the UI shader
    ///
    /// # Returns
    /// A new `UiRenderer` instance
    pub fn new(
        device: &Device,
        format: TextureFormat,
        depth_stencil: Option<DepthStencilState>,
        ui_shader_source: &str,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("UI Shader"),
            source: wgpu::ShaderSource::Wgsl(ui_shader_source.into()),
        });

        let render_pipeline = Self::create_render_pipeline(device, &shader, format, depth_stencil);

        Self { render_pipeline }
    }

    /// Creates a render pipeline for UI rendering.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `shader` - The shader module containing vertex and fragment shaders
    /// * `format` - The texture format for the render target
    /// * `depth_stencil` - Optional depth stencil state
    ///
    /// # Returns
    /// A new render pipeline configured for UI rendering
    fn create_render_pipeline(
        device: &Device,
        shader: &ShaderModule,
        format: TextureFormat,
        depth_stencil: Option<DepthStencilState>,
    ) -> RenderPipeline {
        // No bind groups: overlay vertices are already in NDC space.
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("UI Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<UiVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("UI Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
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

    /// Renders the UI elements.
    ///
    /// # Arguments
    /// * `render_pass` - The render pass to draw with
    /// * `buffer_state` - The buffer registry holding the shared UI buffers
    /// * `index_count` - Number of indices uploaded by the UI mesh manager
    pub fn render<'a>(
        &self,
        render_pass: &mut RenderPass<'a>,
        buffer_state: &BufferState,
        index_count: u32,
    ) {
        if index_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, buffer_state.get_buffer(UI_VERTEX_BUFFER).slice(..));
        render_pass.set_index_buffer(
            buffer_state.get_buffer(UI_INDEX_BUFFER).slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}
