//! # Voxel Kind Module
//!
//! This module defines the different kinds of voxels in the sandbox world.
//! It provides functionality for kind identification and conversion from the
//! compact integer form used by the renderer.

use num_derive::FromPrimitive;

use super::VoxelKindSize;

/// Enumerates all voxel kinds in the sandbox world.
///
/// Each variant represents a distinct material with its own texture layers
/// and editing rules. The `FromPrimitive` derive allows conversion from the
/// compact integer representation stored per instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelKind {
    /// Common soil, the default material for player-placed voxels.
    Soil,

    /// Bedrock-like material generated at the bottom of every column.
    /// Rock voxels cannot be removed by the player.
    Rock,

    /// Surface material capping every terrain column. The top face is
    /// green, the sides show turf over soil, the bottom is plain soil.
    Turf,
}

impl VoxelKind {
    /// Converts a `VoxelKindSize` to a `VoxelKind`.
    ///
    /// This is used when decoding the compact per-instance form back into
    /// the rich enum type.
    ///
    /// # Arguments
    /// * `kind` - The voxel kind as a `VoxelKindSize`
    ///
    /// # Returns
    /// The corresponding `VoxelKind`
    ///
    /// # Panics
    /// Panics if the input value doesn't correspond to a valid `VoxelKind`.
    pub fn get_kind_from_int(kind: VoxelKindSize) -> Self {
        let kind_option = num::FromPrimitive::from_u8(kind as VoxelKindSize);
        kind_option.unwrap()
    }

    /// Whether the player is allowed to remove a voxel of this kind.
    ///
    /// Rock is protected; everything else can be erased.
    pub fn is_removable(&self) -> bool {
        !matches!(self, VoxelKind::Rock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_compact_form() {
        for kind in [VoxelKind::Soil, VoxelKind::Rock, VoxelKind::Turf] {
            assert_eq!(
                VoxelKind::get_kind_from_int(kind as VoxelKindSize),
                kind
            );
        }
    }

    #[test]
    fn rock_is_protected_from_removal() {
        assert!(!VoxelKind::Rock.is_removable());
        assert!(VoxelKind::Soil.is_removable());
        assert!(VoxelKind::Turf.is_removable());
    }
}
