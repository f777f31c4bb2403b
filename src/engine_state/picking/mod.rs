//! # Voxel Picking & Mutation
//!
//! This module casts the view-center ray into the world each frame, finds
//! the first intersected voxel within reach, and queues the single add or
//! remove edit the player requested.
//!
//! ## Scan Semantics
//!
//! Voxels are scanned in collection order. The first voxel whose bounding
//! box the ray hits becomes the active selection and no further voxels are
//! tested that frame; this is first-hit-wins, not nearest-hit-wins, so ties
//! and overlaps resolve in favor of earlier-inserted voxels. The scan also
//! produces the visible set for the renderer (distance culling against the
//! runtime draw distance).
//!
//! ## Mutation Discipline
//!
//! Edits are never applied mid-scan. The scan queues at most one edit, and
//! [`VoxelPicker::apply_pending`] applies it after the scan pass, so index
//! based removal can't invalidate the iteration that decided it.

use cgmath::{MetricSpace, Point3, Vector3};

use super::camera_state::Camera3d;
use super::voxels::world::VoxelWorld;
use super::voxels::{Voxel, VOXEL_EXTENT};

/// Maximum distance at which a voxel can be picked for editing.
pub const PICK_RANGE: f32 = 6.0 * VOXEL_EXTENT;

/// A ray cast from the camera through the center of the viewport.
#[derive(Debug, Clone, Copy)]
pub struct PickRay {
    /// Ray origin (the camera eye).
    pub origin: Point3<f32>,
    /// Normalized ray direction.
    pub direction: Vector3<f32>,
}

impl PickRay {
    /// Builds the center-of-view ray for a camera.
    pub fn from_camera(camera: &Camera3d) -> Self {
        PickRay {
            origin: camera.position,
            direction: camera.forward(),
        }
    }

    /// Slab test against an axis-aligned bounding box.
    ///
    /// # Arguments
    /// * `min` - Minimum corner of the box
    /// * `max` - Maximum corner of the box
    ///
    /// # Returns
    /// The distance along the ray to the entry point, or `None` when the
    /// ray misses the box or the box lies entirely behind the origin.
    pub fn intersects_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (slab_min, slab_max) = (min[axis], max[axis]);

            if dir.abs() < 1e-8 {
                if origin < slab_min || origin > slab_max {
                    return None;
                }
                continue;
            }

            let t0 = (slab_min - origin) / dir;
            let t1 = (slab_max - origin) / dir;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 {
            return None;
        }
        Some(t_enter.max(0.0))
    }

    /// Whether the truncated direction components form the axis-aligned
    /// downward pattern required before the ground marker is shown.
    ///
    /// This is a coarse guard against spurious diagonal hits: only a ray
    /// aimed essentially straight down qualifies.
    pub fn is_axis_aligned_downward(&self) -> bool {
        self.direction.x.trunc() == 0.0
            && self.direction.y.trunc() <= -1.0
            && self.direction.z.trunc() == 0.0
    }
}

/// The player's requested edit for this frame, sampled from the mouse.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditIntent {
    /// Left click: remove the selected voxel.
    pub remove: bool,
    /// Right click: place a voxel above the selected one.
    pub place: bool,
}

/// A single world mutation decided during the scan, applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEdit {
    /// Erase the voxel at this collection index.
    Remove(usize),
    /// Append a new default voxel at this position.
    Place(Point3<i32>),
}

/// Summary of one frame's scan over the world.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Indices of voxels within the draw distance, in collection order.
    pub visible: Vec<usize>,
    /// Index of the voxel under the view-center ray, if any.
    pub selection: Option<usize>,
    /// Whether the ground marker should be drawn under the camera.
    pub ground_marker: bool,
}

/// Scans the world against the view ray and owns the deferred edit queue.
#[derive(Debug, Default)]
pub struct VoxelPicker {
    pending: Option<WorldEdit>,
}

impl VoxelPicker {
    /// Creates a picker with no pending edit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans every voxel once: culls against `draw_distance`, finds the
    /// first ray hit within [`PICK_RANGE`], and queues the edit requested
    /// by `intent` against the selection.
    ///
    /// # Arguments
    /// * `world` - The voxel collection, scanned in order
    /// * `camera` - Source of the view-center ray
    /// * `draw_distance` - Culling radius for the visible set
    /// * `intent` - The click edits sampled this frame
    ///
    /// # Returns
    /// The visible set, the selection, and the ground-marker flag.
    pub fn scan(
        &mut self,
        world: &VoxelWorld,
        camera: &Camera3d,
        draw_distance: f32,
        intent: EditIntent,
    ) -> ScanSummary {
        let ray = PickRay::from_camera(camera);
        let mut summary = ScanSummary::default();

        for (index, voxel) in world.voxels().iter().enumerate() {
            let dist = camera.position.distance(voxel.center());
            if dist > draw_distance {
                continue;
            }
            summary.visible.push(index);

            if summary.selection.is_none() && dist < PICK_RANGE {
                if ray
                    .intersects_aabb(voxel.aabb_min(), voxel.aabb_max())
                    .is_some()
                {
                    summary.selection = Some(index);
                    summary.ground_marker = ray.is_axis_aligned_downward();
                    self.queue_edit(voxel, index, intent);
                }
            }
        }

        summary
    }

    /// Applies the single edit queued during the last scan, if any.
    ///
    /// # Returns
    /// The applied edit, or `None` when nothing was queued.
    pub fn apply_pending(&mut self, world: &mut VoxelWorld) -> Option<WorldEdit> {
        let edit = self.pending.take()?;
        match edit {
            WorldEdit::Remove(index) => {
                world.remove(index);
            }
            WorldEdit::Place(position) => {
                world.push(Voxel::placed_at(position));
            }
        }
        Some(edit)
    }

    fn queue_edit(&mut self, selected: &Voxel, index: usize, intent: EditIntent) {
        if intent.remove && selected.kind.is_removable() {
            self.pending = Some(WorldEdit::Remove(index));
        } else if intent.place {
            let above = Point3::new(
                selected.position.x,
                selected.position.y + 1,
                selected.position.z,
            );
            self.pending = Some(WorldEdit::Place(above));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::voxel_kind::VoxelKind;
    use cgmath::Deg;

    fn camera_looking_along_x() -> Camera3d {
        Camera3d::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Deg(60.0),
        )
    }

    #[test]
    fn ray_selects_the_analytically_hit_cube() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(3, 0, 0), VoxelKind::Soil));
        world.push(Voxel::new(Point3::new(3, 5, 0), VoxelKind::Soil));

        let mut picker = VoxelPicker::new();
        let summary = picker.scan(
            &world,
            &camera_looking_along_x(),
            15.0,
            EditIntent::default(),
        );

        assert_eq!(summary.selection, Some(0));
        assert_eq!(summary.visible, vec![0, 1]);
    }

    #[test]
    fn slab_test_reports_entry_distance() {
        let ray = PickRay {
            origin: Point3::new(0.0, 0.0, 0.0),
            direction: Vector3::new(1.0, 0.0, 0.0),
        };
        let hit = ray.intersects_aabb(Point3::new(2.5, -0.5, -0.5), Point3::new(3.5, 0.5, 0.5));
        assert!((hit.unwrap() - 2.5).abs() < 1e-6);

        let miss = ray.intersects_aabb(Point3::new(2.5, 1.5, -0.5), Point3::new(3.5, 2.5, 0.5));
        assert!(miss.is_none());

        let behind = ray.intersects_aabb(Point3::new(-3.5, -0.5, -0.5), Point3::new(-2.5, 0.5, 0.5));
        assert!(behind.is_none());
    }

    #[test]
    fn first_hit_wins_over_a_closer_later_voxel() {
        let mut world = VoxelWorld::new();
        // Both cubes sit on the ray; the farther one was inserted first.
        world.push(Voxel::new(Point3::new(5, 0, 0), VoxelKind::Soil));
        world.push(Voxel::new(Point3::new(3, 0, 0), VoxelKind::Soil));

        let mut picker = VoxelPicker::new();
        let summary = picker.scan(
            &world,
            &camera_looking_along_x(),
            15.0,
            EditIntent::default(),
        );

        assert_eq!(summary.selection, Some(0));
    }

    #[test]
    fn voxels_beyond_pick_range_render_but_do_not_select() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(8, 0, 0), VoxelKind::Soil));

        let mut picker = VoxelPicker::new();
        let summary = picker.scan(
            &world,
            &camera_looking_along_x(),
            15.0,
            EditIntent::default(),
        );

        assert_eq!(summary.selection, None);
        assert_eq!(summary.visible, vec![0]);
    }

    #[test]
    fn removing_the_selection_shrinks_the_world_by_one() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(3, 0, 0), VoxelKind::Soil));
        let camera = camera_looking_along_x();

        let mut picker = VoxelPicker::new();
        picker.scan(
            &world,
            &camera,
            15.0,
            EditIntent {
                remove: true,
                place: false,
            },
        );
        let applied = picker.apply_pending(&mut world);

        assert_eq!(applied, Some(WorldEdit::Remove(0)));
        assert!(world.is_empty());

        // Next frame: nothing left to select.
        let summary = picker.scan(&world, &camera, 15.0, EditIntent::default());
        assert_eq!(summary.selection, None);
        assert!(picker.apply_pending(&mut world).is_none());
    }

    #[test]
    fn rock_resists_removal() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(3, 0, 0), VoxelKind::Rock));

        let mut picker = VoxelPicker::new();
        picker.scan(
            &world,
            &camera_looking_along_x(),
            15.0,
            EditIntent {
                remove: true,
                place: false,
            },
        );

        assert!(picker.apply_pending(&mut world).is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn placement_appends_one_unit_above_the_selection() {
        let mut world = VoxelWorld::new();
        world.push(Voxel::new(Point3::new(3, 0, 0), VoxelKind::Turf));

        let mut picker = VoxelPicker::new();
        picker.scan(
            &world,
            &camera_looking_along_x(),
            15.0,
            EditIntent {
                remove: false,
                place: true,
            },
        );
        let applied = picker.apply_pending(&mut world);

        assert_eq!(applied, Some(WorldEdit::Place(Point3::new(3, 1, 0))));
        assert_eq!(world.len(), 2);
        assert_eq!(world.voxels()[1].kind, VoxelKind::Soil);
        assert_eq!(world.voxels()[1].position, Point3::new(3, 1, 0));
    }
}
