//! # Voxels Module
//!
//! This module provides the core voxel functionality for the sandbox:
//! voxel kind definitions, the voxel data structure, the ordered world
//! collection, and the column terrain generator.

use cgmath::{Point3, Vector3};
use voxel_kind::VoxelKind;

pub mod terrain;
pub mod voxel_kind;
pub mod world;

/// The underlying integer type used to represent voxel kinds in memory.
/// This is used for the compact per-instance form handed to the renderer.
pub type VoxelKindSize = u8;

/// Edge length of a voxel cube in world units. Every voxel is a unit cube.
pub const VOXEL_EXTENT: f32 = 1.0;

/// Maps each voxel kind to its texture-array layer for each face.
///
/// The outer array is indexed by `VoxelKind` as a `usize`.
/// The inner array contains 6 layer indices, one per face in the order:
/// [Front, Back, Bottom, Top, Left, Right]
pub static VOXEL_KIND_TO_TEXTURE_LAYERS: [[usize; 6]; 3] = [
    [0, 0, 0, 0, 0, 0], // Soil (all sides use layer 0)
    [1, 1, 1, 1, 1, 1], // Rock (all sides use layer 1)
    [2, 2, 4, 3, 2, 2], // Turf (sides: 2, bottom: 4, top: 3)
];

/// Represents a single voxel in the world.
///
/// A voxel is an axis-aligned unit cube at an integer-aligned position.
/// Voxels are immutable once created; the only mutation the world supports
/// is removal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Voxel {
    /// Integer-aligned position of the cube center in world space.
    pub position: Point3<i32>,
    /// Size of the cube along each axis. Always `VOXEL_EXTENT` per axis.
    pub extents: Vector3<f32>,
    /// The material of this voxel.
    pub kind: VoxelKind,
}

impl Voxel {
    /// Creates a new voxel of the given kind at the given position.
    ///
    /// # Arguments
    /// * `position` - Integer-aligned world position
    /// * `kind` - The material of the voxel
    pub fn new(position: Point3<i32>, kind: VoxelKind) -> Self {
        Voxel {
            position,
            extents: Vector3::new(VOXEL_EXTENT, VOXEL_EXTENT, VOXEL_EXTENT),
            kind,
        }
    }

    /// Creates the default player-placed voxel (Soil) at the given position.
    pub fn placed_at(position: Point3<i32>) -> Self {
        Self::new(position, VoxelKind::Soil)
    }

    /// The center of this voxel's bounding box in world space.
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        )
    }

    /// The minimum corner of this voxel's axis-aligned bounding box.
    pub fn aabb_min(&self) -> Point3<f32> {
        let c = self.center();
        Point3::new(
            c.x - self.extents.x / 2.0,
            c.y - self.extents.y / 2.0,
            c.z - self.extents.z / 2.0,
        )
    }

    /// The maximum corner of this voxel's axis-aligned bounding box.
    pub fn aabb_max(&self) -> Point3<f32> {
        let c = self.center();
        Point3::new(
            c.x + self.extents.x / 2.0,
            c.y + self.extents.y / 2.0,
            c.z + self.extents.z / 2.0,
        )
    }

    /// Gets the texture layers for all six faces of this voxel.
    ///
    /// # Returns
    /// An array of 6 texture-array layer indices, one per face.
    pub fn texture_layers(&self) -> [usize; 6] {
        VOXEL_KIND_TO_TEXTURE_LAYERS[self.kind as usize]
    }
}
