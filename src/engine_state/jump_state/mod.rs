//! # Jump State Machine
//!
//! This module owns the single vertical-motion timer of the player. The
//! machine has two states, Idle and Airborne, and drives the camera's
//! vertical position along a fixed parabolic arc while airborne.
//!
//! The arc is the closed form of a jump with a fixed airtime: it starts at
//! zero, peaks at `JUMP_HEIGHT` at the temporal midpoint, and returns to
//! zero symmetrically. Re-deriving coefficients from the elapsed time each
//! frame would be numerically touchy near launch, so the closed form is
//! evaluated directly.

use super::camera_state::Camera3d;

/// Peak height of a jump above the launch ground, in world units.
pub const JUMP_HEIGHT: f32 = 2.0;

/// Total airtime of an uninterrupted jump, in seconds.
pub const JUMP_AIRTIME: f32 = 2.0;

/// Idle/Airborne state for the player's jump arc.
///
/// `None` in `jumped_at` is the Idle sentinel. While airborne the machine
/// remembers the ground height recorded at launch; landing checks are made
/// against the ground re-sampled under the camera every frame.
#[derive(Debug, Default)]
pub struct JumpState {
    /// Launch timestamp in seconds, or `None` while idle.
    jumped_at: Option<f32>,
    /// Ground height under the player when the jump started.
    launch_ground: f32,
}

impl JumpState {
    /// Creates an idle jump state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a jump arc is currently in progress.
    pub fn is_airborne(&self) -> bool {
        self.jumped_at.is_some()
    }

    /// Starts a jump at `now`, recording the current ground height.
    ///
    /// A no-op while already airborne.
    ///
    /// # Arguments
    /// * `now` - Monotonic clock reading in seconds
    /// * `ground_height` - Ground level under the player at launch
    pub fn start(&mut self, now: f32, ground_height: f32) {
        if self.is_airborne() {
            return;
        }
        self.jumped_at = Some(now);
        self.launch_ground = ground_height;
    }

    /// Height above the launch ground at `elapsed` seconds into the arc.
    ///
    /// Zero at launch and at `JUMP_AIRTIME`, peaking at `JUMP_HEIGHT` at
    /// the midpoint. Negative past the end of the arc.
    pub fn arc_height(elapsed: f32) -> f32 {
        let normalized = elapsed / JUMP_AIRTIME;
        4.0 * JUMP_HEIGHT * normalized * (1.0 - normalized)
    }

    /// Advances the arc and writes the camera's vertical position.
    ///
    /// Lands (resets to Idle) when the arc height returns to zero, or
    /// earlier when the body would sink below the ground currently under
    /// the camera; in both cases the camera is snapped exactly onto the
    /// respective ground plus `eye_offset`.
    ///
    /// # Arguments
    /// * `camera` - The camera whose vertical position is driven
    /// * `eye_offset` - Height of the eyes above the ground
    /// * `now` - Monotonic clock reading in seconds
    /// * `current_ground` - Ground level re-sampled under the camera this
    ///   frame
    pub fn advance(
        &mut self,
        camera: &mut Camera3d,
        eye_offset: f32,
        now: f32,
        current_ground: f32,
    ) {
        let Some(jumped_at) = self.jumped_at else {
            return;
        };

        // The launch frame evaluates at zero elapsed time; the arc only
        // completes once some time has actually passed.
        let elapsed = (now - jumped_at).max(0.0);
        let height = Self::arc_height(elapsed);
        if elapsed > 0.0 && height <= 0.0 {
            camera.position.y = self.launch_ground + eye_offset;
            self.land();
            return;
        }

        camera.position.y = self.launch_ground + eye_offset + height;

        if camera.position.y - eye_offset < current_ground {
            camera.position.y = current_ground + eye_offset;
            self.land();
        }
    }

    fn land(&mut self) {
        self.jumped_at = None;
        self.launch_ground = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Point3};

    fn camera() -> Camera3d {
        Camera3d::new(
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 10.0),
            Deg(60.0),
        )
    }

    #[test]
    fn arc_peaks_at_jump_height_at_the_midpoint() {
        assert_eq!(JumpState::arc_height(0.0), 0.0);
        assert!((JumpState::arc_height(JUMP_AIRTIME / 2.0) - JUMP_HEIGHT).abs() < 1e-6);
        assert!(JumpState::arc_height(JUMP_AIRTIME).abs() < 1e-6);
    }

    #[test]
    fn arc_is_symmetric_around_the_apex() {
        for offset in [0.1, 0.4, 0.8] {
            let rising = JumpState::arc_height(JUMP_AIRTIME / 2.0 - offset);
            let falling = JumpState::arc_height(JUMP_AIRTIME / 2.0 + offset);
            assert!((rising - falling).abs() < 1e-6);
        }
    }

    #[test]
    fn start_while_airborne_is_a_no_op() {
        let mut jump = JumpState::new();
        jump.start(10.0, 3.0);
        assert!(jump.is_airborne());

        jump.start(10.5, 99.0);
        let mut cam = camera();
        jump.advance(&mut cam, 4.0, 10.0 + JUMP_AIRTIME / 2.0, 0.0);

        // Still the original launch: apex above the original ground.
        assert!((cam.position.y - (3.0 + 4.0 + JUMP_HEIGHT)).abs() < 1e-5);
    }

    #[test]
    fn completed_arc_lands_on_the_launch_ground() {
        let mut jump = JumpState::new();
        let mut cam = camera();
        jump.start(0.0, 2.0);
        jump.advance(&mut cam, 4.0, JUMP_AIRTIME + 0.01, 0.0);

        assert!(!jump.is_airborne());
        assert_eq!(cam.position.y, 2.0 + 4.0);
    }

    #[test]
    fn rising_ground_cuts_the_arc_short() {
        let mut jump = JumpState::new();
        let mut cam = camera();
        jump.start(0.0, 0.0);

        // Late in the fall the arc height is small; ground at 5 is above it.
        jump.advance(&mut cam, 4.0, 1.9, 5.0);

        assert!(!jump.is_airborne());
        assert_eq!(cam.position.y, 5.0 + 4.0);
    }

    #[test]
    fn airborne_frames_follow_the_arc() {
        let mut jump = JumpState::new();
        let mut cam = camera();
        jump.start(1.0, 0.0);

        jump.advance(&mut cam, 4.0, 1.0 + JUMP_AIRTIME / 2.0, 0.0);
        assert!(jump.is_airborne());
        assert!((cam.position.y - (4.0 + JUMP_HEIGHT)).abs() < 1e-5);
    }
}
