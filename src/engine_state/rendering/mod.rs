//! Rendering system for the sandbox.
//!
//! This module contains the core rendering functionality: pipeline setup,
//! shared GPU resources, and the main render loop. It provides a high-level
//! interface for drawing the voxel scene and the overlay using WebGPU.
//!
//! # Architecture
//!
//! `RenderManager` owns the surface, device, queue, and every shared GPU
//! resource (buffer registry, depth texture, bind groups). Each frame the
//! engine hands it the camera and the rebuilt instance lists through
//! [`RenderManager::set_scene`]; `render` then executes a single pass with
//! three stages: instanced cubes, outline cubes, overlay rectangles.

use log::error;
use wgpu::{BindGroup, BindGroupLayout, Device, Queue, Surface, SurfaceConfiguration};

use super::buffer_state::BufferState;
use super::camera_state::{Camera3d, CameraUniform, Projection};

pub mod atlas;
pub mod texture;
pub mod ui;
pub mod vertex;
pub mod voxel_renderer;

pub use vertex::{CubeVertex, VoxelInstance, WireVertex};
use ui::{UiMeshManager, UiRenderer};
use vertex::{CUBE_INDICES, CUBE_VERTICES, WIRE_INDICES, WIRE_VERTICES};
use voxel_renderer::{buffer_names, VoxelRenderer};

/// Name of the GPU buffer used for camera uniform data
pub const CAMERA_BUFFER_NAME: &str = "camera_buffer";

/// Vertical field of view of the scene camera, in degrees.
const CAMERA_FOV_DEGREES: f32 = 60.0;
/// Near clipping plane distance.
const CAMERA_ZNEAR: f32 = 0.1;
/// Far clipping plane distance.
const CAMERA_ZFAR: f32 = 1000.0;

/// Owns the rendering pipeline and all shared GPU resources.
///
/// This struct is the main entry point for all rendering operations.
pub struct RenderManager {
    /// The WebGPU surface being rendered to
    pub surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    pub surface_config: SurfaceConfiguration,
    /// The WebGPU device used for creating GPU resources
    pub device: Device,
    /// The WebGPU queue for submitting command buffers
    pub queue: Queue,
    /// Registry of every shared GPU buffer
    pub buffer_state: BufferState,
    /// Camera projection settings
    pub camera_projection: Projection,
    /// Overlay elements and their shared buffers
    pub ui_mesh_manager: UiMeshManager,
    camera_uniform: CameraUniform,
    camera_bind_group: BindGroup,
    texture_bind_group: BindGroup,
    depth_texture: texture::Texture,
    voxel_renderer: VoxelRenderer,
    ui_renderer: UiRenderer,
    instance_count: u32,
    wire_count: u32,
}

impl RenderManager {
    /// Creates a new `RenderManager` instance.
    ///
    /// This initializes all the necessary WebGPU resources:
    /// - The static cube and outline meshes
    /// - The camera uniform buffer and bind group
    /// - The generated voxel texture array and its bind group
    /// - The depth texture and both scene pipelines plus the overlay pipeline
    ///
    /// # Arguments
    /// * `surface` - The WebGPU surface to render to
    /// * `surface_config` - Configuration for the surface
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue
    /// * `shader_string` - WGSL source for the voxel and outline shaders
    /// * `ui_shader_string` - WGSL source for the overlay shader
    ///
    /// # Returns
    /// A new `RenderManager` with all rendering resources initialized
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_string: String,
        ui_shader_string: String,
    ) -> Self {
        let mut buffer_state = BufferState::new();

        buffer_state.create_buffer_init(
            &device,
            buffer_names::CUBE_VERTEX_BUFFER,
            wgpu::util::BufferInitDescriptor {
                label: Some(buffer_names::CUBE_VERTEX_BUFFER),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        buffer_state.create_buffer_init(
            &device,
            buffer_names::CUBE_INDEX_BUFFER,
            wgpu::util::BufferInitDescriptor {
                label: Some(buffer_names::CUBE_INDEX_BUFFER),
                contents: bytemuck::cast_slice(&CUBE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            },
        );
        buffer_state.create_buffer_init(
            &device,
            buffer_names::WIRE_VERTEX_BUFFER,
            wgpu::util::BufferInitDescriptor {
                label: Some(buffer_names::WIRE_VERTEX_BUFFER),
                contents: bytemuck::cast_slice(&WIRE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        buffer_state.create_buffer_init(
            &device,
            buffer_names::WIRE_INDEX_BUFFER,
            wgpu::util::BufferInitDescriptor {
                label: Some(buffer_names::WIRE_INDEX_BUFFER),
                contents: bytemuck::cast_slice(&WIRE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let camera_projection = Projection::new(
            surface_config.width,
            surface_config.height,
            cgmath::Deg(CAMERA_FOV_DEGREES),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        let camera_uniform = CameraUniform::new();
        buffer_state.create_buffer_init(
            &device,
            CAMERA_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(CAMERA_BUFFER_NAME),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let (camera_bind_group, camera_layout) =
            Self::generate_camera_bindgroups(&device, &buffer_state);

        let voxel_texture =
            texture::Texture::create_voxel_texture_array(&device, &queue, "voxel_texture_array");
        let (texture_bind_group, texture_layout) =
            Self::generate_texture_bindgroups(&device, &voxel_texture);

        let depth_texture =
            texture::Texture::create_depth_texture(&device, &surface_config, "depth_texture");
        let depth_stencil = Some(wgpu::DepthStencilState {
            format: texture::Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let voxel_renderer = VoxelRenderer::new(
            &device,
            &shader_string,
            surface_config.format,
            &camera_layout,
            &texture_layout,
            depth_stencil.clone(),
        );

        let ui_renderer = UiRenderer::new(
            &device,
            surface_config.format,
            depth_stencil,
            &ui_shader_string,
        );

        Self {
            surface,
            surface_config,
            device,
            queue,
            buffer_state,
            camera_projection,
            ui_mesh_manager: UiMeshManager::new(),
            camera_uniform,
            camera_bind_group,
            texture_bind_group,
            depth_texture,
            voxel_renderer,
            ui_renderer,
            instance_count: 0,
            wire_count: 0,
        }
    }

    fn generate_camera_bindgroups(
        device: &Device,
        buffer_state: &BufferState,
    ) -> (BindGroup, BindGroupLayout) {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer_state.get_buffer(CAMERA_BUFFER_NAME).as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        (bind_group, layout)
    }

    fn generate_texture_bindgroups(
        device: &Device,
        voxel_texture: &texture::Texture,
    ) -> (BindGroup, BindGroupLayout) {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("texture_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&voxel_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&voxel_texture.sampler),
                },
            ],
            label: Some("texture_bind_group"),
        });

        (bind_group, layout)
    }

    /// Handles window resize events.
    ///
    /// Updates the surface configuration, camera projection, and depth
    /// texture to match the new window size.
    ///
    /// # Arguments
    /// * `size` - The new window size in physical pixels
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.camera_projection.resize(size.width, size.height);
        self.depth_texture = texture::Texture::create_depth_texture(
            &self.device,
            &self.surface_config,
            "depth_texture",
        );
    }

    /// Uploads this frame's camera state and instance lists.
    ///
    /// # Arguments
    /// * `camera` - The camera to render from
    /// * `instances` - One instance per visible voxel, in scan order
    /// * `outlines` - Wire-cube instances (selection, ground marker)
    pub fn set_scene(
        &mut self,
        camera: &Camera3d,
        instances: &[VoxelInstance],
        outlines: &[VoxelInstance],
    ) {
        self.camera_uniform
            .update_view_proj_and_pos(camera, &self.camera_projection);
        self.buffer_state
            .write_buffer(&self.queue, CAMERA_BUFFER_NAME, 0, &[self.camera_uniform]);

        self.instance_count = instances.len() as u32;
        if !instances.is_empty() {
            self.buffer_state.ensure_capacity(
                &self.device,
                buffer_names::VOXEL_INSTANCE_BUFFER,
                std::mem::size_of_val(instances) as u64,
                wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            );
            self.buffer_state.write_buffer(
                &self.queue,
                buffer_names::VOXEL_INSTANCE_BUFFER,
                0,
                instances,
            );
        }

        self.wire_count = outlines.len() as u32;
        if !outlines.is_empty() {
            self.buffer_state.ensure_capacity(
                &self.device,
                buffer_names::WIRE_INSTANCE_BUFFER,
                std::mem::size_of_val(outlines) as u64,
                wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            );
            self.buffer_state.write_buffer(
                &self.queue,
                buffer_names::WIRE_INSTANCE_BUFFER,
                0,
                outlines,
            );
        }
    }

    /// Renders a new frame.
    ///
    /// This is the main rendering entry point, called once per frame after
    /// [`RenderManager::set_scene`].
    ///
    /// # Arguments
    /// * `ui_visible` - Whether overlay elements should be rendered
    ///
    /// # Panics
    /// Panics if the surface texture cannot be acquired.
    pub fn render(&mut self, ui_visible: bool) {
        self.ui_mesh_manager
            .upload(&self.device, &self.queue, &mut self.buffer_state);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                panic!();
            }
        };

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.voxel_renderer.render(
                &mut rpass,
                &self.buffer_state,
                &self.camera_bind_group,
                &self.texture_bind_group,
                self.instance_count,
                self.wire_count,
            );

            if ui_visible {
                self.ui_renderer.render(
                    &mut rpass,
                    &self.buffer_state,
                    self.ui_mesh_manager.get_index_count(),
                );
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
    }
}
