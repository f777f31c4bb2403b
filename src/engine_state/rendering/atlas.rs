//! In-process texture atlas generation.
//!
//! The sandbox ships no image assets; the five voxel tiles are synthesized
//! at startup as speckled flat-color squares. The generator is seeded, so
//! every run produces the same pixels.

use image::{Rgba, RgbaImage};

/// Width and height of a single tile in pixels.
pub const TEXTURE_DIMENSION: u32 = 16;

/// Number of layers in the voxel texture array.
pub const NUM_TEXTURES: u32 = 5;

/// Texture-array layer indices, matching the per-kind face tables.
pub mod layers {
    /// Soil on all faces.
    pub const SOIL: usize = 0;
    /// Rock on all faces.
    pub const ROCK: usize = 1;
    /// Turf side: grass fringe over soil.
    pub const TURF_SIDE: usize = 2;
    /// Turf top: full grass.
    pub const TURF_TOP: usize = 3;
    /// Turf bottom: plain soil.
    pub const TURF_BOTTOM: usize = 4;
}

/// Seed for the speckle noise so tile pixels are stable across runs.
const SPECKLE_SEED: u64 = 0x5eed_7113;

/// Per-pixel brightness jitter, in color steps.
const SPECKLE_RANGE: i16 = 12;

const SOIL_BROWN: [u8; 3] = [134, 96, 67];
const ROCK_GRAY: [u8; 3] = [128, 128, 128];
const TURF_GREEN: [u8; 3] = [98, 160, 62];

/// Rows of the side tile covered by the grass fringe.
const TURF_FRINGE_ROWS: u32 = 4;

/// Builds the raw RGBA bytes for every layer of the voxel texture array.
///
/// Layer order is fixed: soil, rock, turf side, turf top, turf bottom.
///
/// # Returns
/// One `Vec<u8>` of tightly packed RGBA pixels per layer.
pub fn build_atlas_layers() -> Vec<Vec<u8>> {
    let mut rng = fastrand::Rng::with_seed(SPECKLE_SEED);

    let mut tiles = vec![Vec::new(); NUM_TEXTURES as usize];
    tiles[layers::SOIL] = speckled_tile(&mut rng, |_, _| SOIL_BROWN);
    tiles[layers::ROCK] = speckled_tile(&mut rng, |_, _| ROCK_GRAY);
    tiles[layers::TURF_SIDE] = speckled_tile(&mut rng, |_, y| {
        if y < TURF_FRINGE_ROWS {
            TURF_GREEN
        } else {
            SOIL_BROWN
        }
    });
    tiles[layers::TURF_TOP] = speckled_tile(&mut rng, |_, _| TURF_GREEN);
    tiles[layers::TURF_BOTTOM] = speckled_tile(&mut rng, |_, _| SOIL_BROWN);
    tiles
}

/// Renders one tile, jittering each pixel of the base color.
fn speckled_tile(
    rng: &mut fastrand::Rng,
    base_color: impl Fn(u32, u32) -> [u8; 3],
) -> Vec<u8> {
    let mut tile = RgbaImage::new(TEXTURE_DIMENSION, TEXTURE_DIMENSION);
    for y in 0..TEXTURE_DIMENSION {
        for x in 0..TEXTURE_DIMENSION {
            let [r, g, b] = base_color(x, y);
            let jitter = rng.i16(-SPECKLE_RANGE..=SPECKLE_RANGE);
            tile.put_pixel(
                x,
                y,
                Rgba([
                    jittered(r, jitter),
                    jittered(g, jitter),
                    jittered(b, jitter),
                    255,
                ]),
            );
        }
    }
    tile.into_raw()
}

fn jittered(channel: u8, jitter: i16) -> u8 {
    (channel as i16 + jitter).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_has_five_full_layers() {
        let layers = build_atlas_layers();
        assert_eq!(layers.len(), NUM_TEXTURES as usize);
        for layer in &layers {
            assert_eq!(
                layer.len(),
                (TEXTURE_DIMENSION * TEXTURE_DIMENSION * 4) as usize
            );
        }
    }

    #[test]
    fn atlas_is_deterministic() {
        assert_eq!(build_atlas_layers(), build_atlas_layers());
    }

    #[test]
    fn turf_side_fringe_is_greener_than_its_base() {
        let layers = build_atlas_layers();
        let side = &layers[layers::TURF_SIDE];

        // Compare the green channel of the first fringe row to the last row.
        let row = |y: u32| {
            (0..TEXTURE_DIMENSION)
                .map(|x| side[((y * TEXTURE_DIMENSION + x) * 4 + 1) as usize] as u32)
                .sum::<u32>()
        };
        assert!(row(0) > row(TEXTURE_DIMENSION - 1));
    }
}
