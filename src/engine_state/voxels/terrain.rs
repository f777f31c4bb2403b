//! # Terrain Generation Module
//!
//! This module builds the static terrain: a square height field of voxel
//! columns derived from 2D Perlin noise.
//!
//! Each column gets a Rock base layer, Soil filler, and exactly one Turf
//! voxel capping the surface. Generation is a pure function of the map size
//! and the noise seed, so the same parameters always produce the same world.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::voxel_kind::VoxelKind;
use super::world::VoxelWorld;
use super::Voxel;

/// Side length of the generated map in columns.
pub const MAP_SIZE: i32 = 250;

/// Frequency applied to world coordinates when sampling the noise field.
pub const NOISE_FREQUENCY: f64 = 0.1;

/// Multiplier turning a normalized noise sample into a column height.
pub const HEIGHT_AMPLITUDE: f64 = 10.0;

/// Levels below this threshold are Rock; everything above is Soil.
const ROCK_CEILING: i32 = 1;

/// Generates voxel columns from 2D coherent noise.
///
/// # Examples
///
/// ```ignore
/// let mut world = VoxelWorld::new();
/// TerrainGenerator::new(0).populate(&mut world, MAP_SIZE);
/// ```
pub struct TerrainGenerator {
    perlin: Perlin,
}

impl TerrainGenerator {
    /// Creates a generator for the given noise seed.
    pub fn new(seed: u32) -> Self {
        TerrainGenerator {
            perlin: Perlin::new(seed),
        }
    }

    /// Samples the height field at a column coordinate.
    ///
    /// The raw noise sample is mapped from [-1, 1] to [0, 1] before being
    /// scaled, so heights fall in [0, `HEIGHT_AMPLITUDE`].
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .perlin
            .get([x as f64 * NOISE_FREQUENCY, z as f64 * NOISE_FREQUENCY]);
        let normalized = (sample + 1.0) / 2.0;
        (normalized * HEIGHT_AMPLITUDE) as i32
    }

    /// Fills `world` with one column of voxels per (x, z) cell in
    /// [0, `map_size`).
    ///
    /// For each column: levels `0..height` get Rock (below `ROCK_CEILING`)
    /// or Soil, then a single Turf voxel is placed one level above the
    /// tallest level reached. A column of height zero still receives its
    /// Turf cap at level 1.
    ///
    /// # Arguments
    /// * `world` - The collection to append into
    /// * `map_size` - Side length of the square map in columns
    pub fn populate(&self, world: &mut VoxelWorld, map_size: i32) {
        for x in 0..map_size {
            for z in 0..map_size {
                let mut tallest = 0;
                for level in 0..self.column_height(x, z) {
                    if level > tallest {
                        tallest = level;
                    }
                    let kind = if level < ROCK_CEILING {
                        VoxelKind::Rock
                    } else {
                        VoxelKind::Soil
                    };
                    world.push(Voxel::new(Point3::new(x, level, z), kind));
                }
                world.push(Voxel::new(
                    Point3::new(x, tallest + 1, z),
                    VoxelKind::Turf,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u32, size: i32) -> VoxelWorld {
        let mut world = VoxelWorld::new();
        TerrainGenerator::new(seed).populate(&mut world, size);
        world
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate(7, 16);
        let b = generate(7, 16);
        assert_eq!(a.len(), b.len());
        for (va, vb) in a.voxels().iter().zip(b.voxels()) {
            assert_eq!(va, vb);
        }
    }

    #[test]
    fn every_column_has_exactly_one_turf_cap() {
        let world = generate(3, 12);
        for x in 0..12 {
            for z in 0..12 {
                let caps: Vec<_> = world
                    .voxels()
                    .iter()
                    .filter(|v| {
                        v.position.x == x
                            && v.position.z == z
                            && v.kind == VoxelKind::Turf
                    })
                    .collect();
                assert_eq!(caps.len(), 1, "column ({x}, {z})");

                let tallest = world
                    .highest_occupied_level(x as f32, z as f32, true)
                    .expect("populated column");
                assert_eq!(caps[0].position.y, tallest, "turf caps column ({x}, {z})");
            }
        }
    }

    #[test]
    fn columns_are_rock_below_soil() {
        let world = generate(11, 8);
        for voxel in world.voxels() {
            match voxel.kind {
                VoxelKind::Rock => assert_eq!(voxel.position.y, 0),
                VoxelKind::Soil => assert!(voxel.position.y >= 1),
                VoxelKind::Turf => assert!(voxel.position.y >= 1),
            }
        }
    }
}
