//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the static cube mesh shared by every voxel, the
//! per-voxel instance format, and the line-list cube used for selection and
//! ground-marker outlines. All structs match the vertex shader's expected
//! input layout.

use crate::engine_state::voxels::Voxel;

/// A vertex of the shared unit-cube mesh.
///
/// The same 24 vertices are reused for every voxel; per-voxel data
/// (translation, tint, texture layers) rides in [`VoxelInstance`].
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture coordinates: [f32; 2] (8 bytes)
/// - Face index: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Offset from the cube center, in [-0.5, 0.5]
    position: [f32; 3],
    /// Outward face normal
    normal: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    uv: [f32; 2],
    /// Which face this vertex belongs to, in the order
    /// [Front, Back, Bottom, Top, Left, Right]
    face_index: u32,
}

impl CubeVertex {
    const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], face_index: u32) -> Self {
        CubeVertex {
            position,
            normal,
            uv,
            face_index,
        }
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: uv (vec2<f32>)
    /// - `location = 3`: face_index (u32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

/// The 24 vertices of the shared unit cube, four per face.
///
/// Face order matches the texture-layer tables:
/// [Front (+Z), Back (-Z), Bottom (-Y), Top (+Y), Left (-X), Right (+X)]
#[rustfmt::skip]
pub const CUBE_VERTICES: [CubeVertex; 24] = [
    // Front (+Z)
    CubeVertex::new([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0], [0.0, 1.0], 0),
    CubeVertex::new([ 0.5, -0.5,  0.5], [0.0, 0.0, 1.0], [1.0, 1.0], 0),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0], [1.0, 0.0], 0),
    CubeVertex::new([-0.5,  0.5,  0.5], [0.0, 0.0, 1.0], [0.0, 0.0], 0),
    // Back (-Z)
    CubeVertex::new([ 0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0], 1),
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0], 1),
    CubeVertex::new([-0.5,  0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0], 1),
    CubeVertex::new([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0], 1),
    // Bottom (-Y)
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0], 2),
    CubeVertex::new([ 0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0], 2),
    CubeVertex::new([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0], [1.0, 0.0], 2),
    CubeVertex::new([-0.5, -0.5,  0.5], [0.0, -1.0, 0.0], [0.0, 0.0], 2),
    // Top (+Y)
    CubeVertex::new([-0.5,  0.5,  0.5], [0.0, 1.0, 0.0], [0.0, 1.0], 3),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0], [1.0, 1.0], 3),
    CubeVertex::new([ 0.5,  0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0], 3),
    CubeVertex::new([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0], 3),
    // Left (-X)
    CubeVertex::new([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0], 4),
    CubeVertex::new([-0.5, -0.5,  0.5], [-1.0, 0.0, 0.0], [1.0, 1.0], 4),
    CubeVertex::new([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0], [1.0, 0.0], 4),
    CubeVertex::new([-0.5,  0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0], 4),
    // Right (+X)
    CubeVertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0, 0.0], [0.0, 1.0], 5),
    CubeVertex::new([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0], 5),
    CubeVertex::new([ 0.5,  0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 0.0], 5),
    CubeVertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0], [0.0, 0.0], 5),
];

/// Triangle-list indices for [`CUBE_VERTICES`], two triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,  0,  2,  3,
     4,  5,  6,  4,  6,  7,
     8,  9, 10,  8, 10, 11,
    12, 13, 14, 12, 14, 15,
    16, 17, 18, 16, 18, 19,
    20, 21, 22, 20, 22, 23,
];

/// Per-voxel data for the instanced cube pass.
///
/// # Memory Layout
/// - Translation: [f32; 3] (12 bytes)
/// - Tint: [f32; 4] (16 bytes)
/// - Face layers: [u32; 8] (32 bytes, six used, padded to two vec4s)
///
/// Total size: 60 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    /// World-space position of the cube center
    translation: [f32; 3],
    /// Color multiplier applied to the sampled texels
    tint: [f32; 4],
    /// Texture-array layer per face, padded to two vec4<u32> attributes
    face_layers: [u32; 8],
}

impl VoxelInstance {
    /// Builds the instance for one voxel.
    ///
    /// # Arguments
    /// * `voxel` - The voxel to draw
    /// * `tint` - RGBA color multiplier (white for unselected voxels)
    pub fn new(voxel: &Voxel, tint: [f32; 4]) -> Self {
        let layers = voxel.texture_layers();
        let mut face_layers = [0u32; 8];
        for (slot, layer) in face_layers.iter_mut().zip(layers) {
            *slot = layer as u32;
        }
        let center = voxel.center();
        VoxelInstance {
            translation: [center.x, center.y, center.z],
            tint,
            face_layers,
        }
    }

    /// Builds an outline-only instance at an arbitrary world position.
    ///
    /// Used for the selection wireframe and the ground marker; the face
    /// layers are ignored by the wire pipeline.
    pub fn outline_at(position: [f32; 3], tint: [f32; 4]) -> Self {
        VoxelInstance {
            translation: position,
            tint,
            face_layers: [0; 8],
        }
    }

    /// Returns the instance buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 4`: translation (vec3<f32>)
    /// - `location = 5`: tint (vec4<f32>)
    /// - `location = 6`: face layers, faces 0-3 (vec4<u32>)
    /// - `location = 7`: face layers, faces 4-5 plus padding (vec4<u32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VoxelInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 7]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Uint32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 11]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Uint32x4,
                },
            ],
        }
    }
}

/// A vertex of the line-list cube used for outlines.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WireVertex {
    /// Offset from the cube center, in [-0.5, 0.5]
    position: [f32; 3],
}

impl WireVertex {
    const fn new(position: [f32; 3]) -> Self {
        WireVertex { position }
    }

    /// Returns the vertex buffer layout for the outline pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<WireVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Outline half-extent, slightly inflated so the lines don't z-fight the
/// cube faces they trace.
const WIRE_HALF: f32 = 0.502;

/// The eight corners of the outline cube.
#[rustfmt::skip]
pub const WIRE_VERTICES: [WireVertex; 8] = [
    WireVertex::new([-WIRE_HALF, -WIRE_HALF, -WIRE_HALF]),
    WireVertex::new([ WIRE_HALF, -WIRE_HALF, -WIRE_HALF]),
    WireVertex::new([ WIRE_HALF, -WIRE_HALF,  WIRE_HALF]),
    WireVertex::new([-WIRE_HALF, -WIRE_HALF,  WIRE_HALF]),
    WireVertex::new([-WIRE_HALF,  WIRE_HALF, -WIRE_HALF]),
    WireVertex::new([ WIRE_HALF,  WIRE_HALF, -WIRE_HALF]),
    WireVertex::new([ WIRE_HALF,  WIRE_HALF,  WIRE_HALF]),
    WireVertex::new([-WIRE_HALF,  WIRE_HALF,  WIRE_HALF]),
];

/// Line-list indices for the twelve cube edges.
#[rustfmt::skip]
pub const WIRE_INDICES: [u32; 24] = [
    0, 1, 1, 2, 2, 3, 3, 0, // bottom square
    4, 5, 5, 6, 6, 7, 7, 4, // top square
    0, 4, 1, 5, 2, 6, 3, 7, // vertical edges
];
