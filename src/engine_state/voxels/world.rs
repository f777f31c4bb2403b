//! # World Module
//!
//! This module provides the `VoxelWorld` struct which owns the single
//! world-wide collection of voxels.
//!
//! ## Architecture
//!
//! The world is an ordered sequence: insertion order is creation order, and
//! later-appended voxels are scanned later during picking, which breaks ties
//! between equally distant candidates in favor of earlier voxels. Placement
//! appends, removal erases by index.
//!
//! ## Mutation Discipline
//!
//! At most one mutation (one placement or one removal) is applied per frame,
//! and it is applied after the frame's scan pass has finished. The picking
//! module owns the deferred edit; the world only exposes the primitive
//! append/remove operations.

use cgmath::Point3;

use super::Voxel;

/// The ordered collection of every voxel in the world.
///
/// # Examples
///
/// ```ignore
/// let mut world = VoxelWorld::new();
/// world.push(Voxel::placed_at(Point3::new(0, 0, 0)));
///
/// assert_eq!(world.highest_occupied_level(0.2, 0.7, true), Some(0));
/// assert_eq!(world.highest_occupied_level(4.0, 4.0, true), None);
/// ```
pub struct VoxelWorld {
    /// The voxels, in creation order.
    voxels: Vec<Voxel>,
}

impl VoxelWorld {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        VoxelWorld { voxels: Vec::new() }
    }

    /// Appends a voxel to the end of the collection.
    pub fn push(&mut self, voxel: Voxel) {
        self.voxels.push(voxel);
    }

    /// Removes the voxel at `index` and returns it.
    ///
    /// Indices of all later voxels shift down by one; callers must not hold
    /// indices across a removal.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Voxel {
        self.voxels.remove(index)
    }

    /// All voxels in creation order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Number of voxels currently in the world.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the world holds no voxels at all.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Finds the vertical level of a voxel in the column under (x, z).
    ///
    /// The column is identified by integer-truncating the horizontal
    /// coordinates of both the query point and each voxel position. With
    /// `want_tallest` the whole collection is scanned and the highest level
    /// wins; otherwise the scan short-circuits at the first positional
    /// match.
    ///
    /// # Arguments
    /// * `x` - Horizontal query coordinate
    /// * `z` - Horizontal query coordinate
    /// * `want_tallest` - Scan the full column instead of stopping at the
    ///   first match
    ///
    /// # Returns
    /// `Some(level)` of the matching voxel, or `None` when the column holds
    /// no voxel at all. A genuine ground level of 0 is `Some(0)`, distinct
    /// from the no-data case.
    pub fn highest_occupied_level(&self, x: f32, z: f32, want_tallest: bool) -> Option<i32> {
        let px = x.trunc() as i32;
        let pz = z.trunc() as i32;

        let mut found: Option<i32> = None;
        for voxel in &self.voxels {
            let Point3 { x: cx, y: cy, z: cz } = voxel.position;
            if px == cx && pz == cz && found.map_or(true, |level| cy > level) {
                found = Some(cy);
                if !want_tallest {
                    break;
                }
            }
        }
        found
    }
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::voxel_kind::VoxelKind;

    #[test]
    fn empty_world_reports_no_column_data() {
        let world = VoxelWorld::new();
        assert_eq!(world.highest_occupied_level(0.0, 0.0, true), None);
        assert_eq!(world.highest_occupied_level(12.3, -4.5, false), None);
    }

    #[test]
    fn ground_level_zero_is_distinct_from_no_data() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(2, 0, 3), VoxelKind::Turf));

        assert_eq!(world.highest_occupied_level(2.9, 3.1, true), Some(0));
        assert_eq!(world.highest_occupied_level(3.0, 3.0, true), None);
    }

    #[test]
    fn tallest_scan_finds_the_top_of_the_column() {
        let mut world = VoxelWorld::new();
        // Deliberately out of height order so the scan has to keep looking.
        world.push(Voxel::new(Point3::new(1, 4, 1), VoxelKind::Soil));
        world.push(Voxel::new(Point3::new(1, 0, 1), VoxelKind::Rock));
        world.push(Voxel::new(Point3::new(1, 7, 1), VoxelKind::Turf));
        world.push(Voxel::new(Point3::new(0, 9, 1), VoxelKind::Soil));

        assert_eq!(world.highest_occupied_level(1.5, 1.5, true), Some(7));
    }

    #[test]
    fn first_match_scan_short_circuits() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(1, 4, 1), VoxelKind::Soil));
        world.push(Voxel::new(Point3::new(1, 7, 1), VoxelKind::Turf));

        assert_eq!(world.highest_occupied_level(1.0, 1.0, false), Some(4));
    }

    #[test]
    fn removal_shifts_later_indices() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(0, 0, 0), VoxelKind::Rock));
        world.push(Voxel::new(Point3::new(1, 0, 0), VoxelKind::Soil));
        world.push(Voxel::new(Point3::new(2, 0, 0), VoxelKind::Soil));

        let removed = world.remove(1);
        assert_eq!(removed.position, Point3::new(1, 0, 0));
        assert_eq!(world.len(), 2);
        assert_eq!(world.voxels()[1].position, Point3::new(2, 0, 0));
    }
}
