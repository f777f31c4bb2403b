//! # First-Person Controller
//!
//! This module owns the orientation state of the first-person viewpoint and
//! converts pointer deltas and movement flags into a camera position and
//! look-at target each frame.
//!
//! ## Key Behaviors
//! - Yaw is unbounded; it wraps through trigonometric periodicity
//! - Pitch is clamped to [-89, +89] degrees after every advance
//! - Strafing and forward motion are composited from the yaw angle alone
//! - The look target is placed a fixed fraction of the target distance
//!   along the forward axis derived from (yaw, pitch)
//! - A swing term (currently pinned at zero) stays wired through the
//!   eye-height snap and the up-vector lean so view bobbing can be
//!   reactivated without touching the call sites

use cgmath::Point3;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::camera::Camera3d;

/// Radians applied per pixel of pointer movement.
pub const MOUSE_MOVE_SENSITIVITY: f32 = 0.003;

/// Pitch clamp in degrees, applied symmetrically around the horizon.
pub const PITCH_CLAMP_DEGREES: f32 = 89.0;

/// Divider applied to the target distance when placing the look target.
pub const PANNING_DIVIDER: f32 = 5.1;

/// Trigonometric divider for the view-bobbing swing term.
const SWING_TRIG_DIVIDER: f32 = 8.0;
/// Amplitude divider for the eye-height component of the swing term.
const SWING_STEP_DIVIDER: f32 = 30.0;
/// Amplitude divider for the up-vector lean component of the swing term.
const SWING_WAVE_DIVIDER: f32 = 200.0;

/// Index order of the six movement direction flags.
#[derive(Copy, Clone, Debug)]
pub enum MoveDirection {
    Front = 0,
    Back,
    Right,
    Left,
    Up,
    Down,
}

/// Key and button bindings for steering the viewpoint.
///
/// These are build-time configuration constants; there is no runtime
/// rebinding surface.
#[derive(Debug, Clone)]
pub struct MovementBindings {
    /// Keys for the six movement directions, indexed by `MoveDirection`.
    pub movement: [KeyCode; 6],
    /// Modifier switching to the faster movement sensitivity.
    pub sprint: KeyCode,
    /// Pan button (reserved; unused while in first-person mode).
    pub pan: MouseButton,
}

impl Default for MovementBindings {
    fn default() -> Self {
        MovementBindings {
            movement: [
                KeyCode::KeyW,
                KeyCode::KeyS,
                KeyCode::KeyD,
                KeyCode::KeyA,
                KeyCode::KeyE,
                KeyCode::KeyQ,
            ],
            sprint: KeyCode::ShiftLeft,
            pan: MouseButton::Middle,
        }
    }
}

/// The controller's steady-state mode.
///
/// Pointer capture is a capability of the mode rather than a special-cased
/// comparison, so adding a detached mode cannot silently keep consuming
/// pointer deltas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Pointer-driven look, movement relative to the view angles.
    FirstPerson,
    /// The controller is attached to nothing; pointer deltas are ignored.
    Detached,
}

impl CameraMode {
    /// Whether this mode consumes pointer deltas for orientation.
    pub fn captures_pointer(&self) -> bool {
        matches!(self, CameraMode::FirstPerson)
    }
}

/// Owns the first-person orientation state and integrates input into the
/// camera each frame.
///
/// Constructed once per active camera via [`FirstPersonController::enable`]
/// and threaded through the frame update by mutable reference.
#[derive(Debug)]
pub struct FirstPersonController {
    /// Current controller mode.
    pub mode: CameraMode,
    /// Distance from the eye to the look-at point, captured at enable time.
    pub target_distance: f32,
    /// Vertical offset of the player's eyes above the ground.
    pub eyes_height: f32,
    /// Look angle in the horizontal plane, radians. Unbounded.
    pub yaw: f32,
    /// Look angle above/below the horizon, radians. Clamped.
    pub pitch: f32,
    /// Reserved oscillation input for view bobbing. Pinned at zero.
    swing_counter: f32,
    /// Movement key bindings.
    pub bindings: MovementBindings,
}

impl FirstPersonController {
    /// Enables first-person control, deriving the initial orientation from
    /// the camera's current position and target.
    ///
    /// The surrounding shell is expected to lock and hide the pointer when
    /// it calls this.
    ///
    /// # Arguments
    /// * `camera` - The camera whose pose seeds the controller state
    ///
    /// # Returns
    /// A controller in `FirstPerson` mode aimed along the camera's current
    /// view direction.
    pub fn enable(camera: &Camera3d) -> Self {
        let dx = camera.target.x - camera.position.x;
        let dy = camera.target.y - camera.position.y;
        let dz = camera.target.z - camera.position.z;

        FirstPersonController {
            mode: CameraMode::FirstPerson,
            target_distance: (dx * dx + dy * dy + dz * dz).sqrt(),
            eyes_height: camera.position.y,
            yaw: dx.atan2(dz),
            pitch: dy.atan2((dx * dx + dz * dz).sqrt()),
            swing_counter: 0.0,
            bindings: MovementBindings::default(),
        }
    }

    /// Advances the camera one frame from sampled input.
    ///
    /// Movement is integrated with the angles from before this frame's
    /// rotation, then the look target is recomputed from the updated
    /// angles. Larger `move_sensitivity` values move slower; it divides
    /// the per-frame step.
    ///
    /// # Arguments
    /// * `camera` - The camera to steer
    /// * `directions` - Movement flags indexed by `MoveDirection`; up and
    ///   down are reserved and expected to be false
    /// * `pointer_delta` - Pointer movement since the previous frame, if any
    /// * `force_eye_height_snap` - Clamp the vertical position back to the
    ///   enabled eye height
    /// * `move_sensitivity` - Positive movement divider; zero is a
    ///   precondition violation
    pub fn advance(
        &mut self,
        camera: &mut Camera3d,
        directions: [bool; 6],
        pointer_delta: Option<(f64, f64)>,
        force_eye_height_snap: bool,
        move_sensitivity: f32,
    ) {
        debug_assert!(
            move_sensitivity > 0.0,
            "move_sensitivity must be positive"
        );

        let (delta_x, delta_y) = if self.mode.captures_pointer() {
            pointer_delta.unwrap_or((0.0, 0.0))
        } else {
            (0.0, 0.0)
        };

        let front = directions[MoveDirection::Front as usize] as u8 as f32;
        let back = directions[MoveDirection::Back as usize] as u8 as f32;
        let right = directions[MoveDirection::Right as usize] as u8 as f32;
        let left = directions[MoveDirection::Left as usize] as u8 as f32;
        let up = directions[MoveDirection::Up as usize] as u8 as f32;
        let down = directions[MoveDirection::Down as usize] as u8 as f32;

        // Position integration uses the angles from before this frame's
        // pointer rotation.
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let pitch_sin = self.pitch.sin();

        camera.position.x +=
            (yaw_sin * back - yaw_sin * front - yaw_cos * left + yaw_cos * right)
                / move_sensitivity;
        camera.position.y +=
            (pitch_sin * front - pitch_sin * back + up - down) / move_sensitivity;
        camera.position.z +=
            (yaw_cos * back - yaw_cos * front + yaw_sin * left - yaw_sin * right)
                / move_sensitivity;

        self.yaw += delta_x as f32 * -MOUSE_MOVE_SENSITIVITY;
        self.pitch += delta_y as f32 * -MOUSE_MOVE_SENSITIVITY;

        let pitch_limit = PITCH_CLAMP_DEGREES.to_radians();
        self.pitch = self.pitch.clamp(-pitch_limit, pitch_limit);

        // Place the look target a fixed fraction of the target distance
        // along the forward axis derived from the updated angles.
        let reach = self.target_distance / PANNING_DIVIDER;
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();

        camera.target = Point3::new(
            camera.position.x - reach * yaw_sin * pitch_cos,
            camera.position.y + reach * pitch_sin,
            camera.position.z - reach * yaw_cos * pitch_cos,
        );

        let wave =
            (self.swing_counter / SWING_TRIG_DIVIDER).sin() / SWING_STEP_DIVIDER;
        if force_eye_height_snap {
            camera.position.y = self.eyes_height - wave;
        }

        let lean = (self.swing_counter / (SWING_TRIG_DIVIDER * 2.0)).sin()
            / SWING_WAVE_DIVIDER;
        camera.up.x = lean;
        camera.up.z = -lean;
    }

    /// The per-frame step a single held movement key produces, given the
    /// current yaw and pitch.
    ///
    /// Exposed for the grounded-movement checks in the engine tests.
    pub fn step_vector(&self, direction: MoveDirection, move_sensitivity: f32) -> (f32, f32, f32) {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let pitch_sin = self.pitch.sin();
        let step = match direction {
            MoveDirection::Front => (-yaw_sin, pitch_sin, -yaw_cos),
            MoveDirection::Back => (yaw_sin, -pitch_sin, yaw_cos),
            MoveDirection::Right => (yaw_cos, 0.0, -yaw_sin),
            MoveDirection::Left => (-yaw_cos, 0.0, yaw_sin),
            MoveDirection::Up => (0.0, 1.0, 0.0),
            MoveDirection::Down => (0.0, -1.0, 0.0),
        };
        (
            step.0 / move_sensitivity,
            step.1 / move_sensitivity,
            step.2 / move_sensitivity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Point3};

    fn camera_at(position: Point3<f32>, target: Point3<f32>) -> Camera3d {
        Camera3d::new(position, target, Deg(60.0))
    }

    const NO_MOVEMENT: [bool; 6] = [false; 6];

    #[test]
    fn enable_derives_distance_and_angles() {
        let camera = camera_at(Point3::new(0.0, 4.0, 0.0), Point3::new(3.0, 4.0, 4.0));
        let controller = FirstPersonController::enable(&camera);

        assert!((controller.target_distance - 5.0).abs() < 1e-6);
        assert!((controller.yaw - 3.0f32.atan2(4.0)).abs() < 1e-6);
        assert!(controller.pitch.abs() < 1e-6);
        assert_eq!(controller.eyes_height, 4.0);
        assert!(controller.mode.captures_pointer());
    }

    #[test]
    fn pitch_stays_clamped_for_pathological_deltas() {
        let mut camera = camera_at(Point3::new(0.0, 4.0, 0.0), Point3::new(0.0, 4.0, 10.0));
        let mut controller = FirstPersonController::enable(&camera);
        let limit = PITCH_CLAMP_DEGREES.to_radians();

        for delta in [(0.0, 10_000.0), (0.0, -10_000.0), (10_000.0, 10_000.0)] {
            controller.advance(&mut camera, NO_MOVEMENT, Some(delta), false, 5.0);
            assert!(
                controller.pitch >= -limit && controller.pitch <= limit,
                "pitch {} escaped the clamp",
                controller.pitch
            );
        }
    }

    #[test]
    fn look_target_tracks_the_angles() {
        let mut camera = camera_at(Point3::new(1.0, 4.0, 1.0), Point3::new(1.0, 4.0, 11.0));
        let mut controller = FirstPersonController::enable(&camera);

        controller.advance(&mut camera, NO_MOVEMENT, Some((120.0, -45.0)), false, 5.0);

        let reach = controller.target_distance / PANNING_DIVIDER;
        let expected = Point3::new(
            camera.position.x - reach * controller.yaw.sin() * controller.pitch.cos(),
            camera.position.y + reach * controller.pitch.sin(),
            camera.position.z - reach * controller.yaw.cos() * controller.pitch.cos(),
        );
        assert!((camera.target.x - expected.x).abs() < 1e-5);
        assert!((camera.target.y - expected.y).abs() < 1e-5);
        assert!((camera.target.z - expected.z).abs() < 1e-5);
    }

    #[test]
    fn detached_mode_ignores_pointer_deltas() {
        let mut camera = camera_at(Point3::new(0.0, 4.0, 0.0), Point3::new(0.0, 4.0, 10.0));
        let mut controller = FirstPersonController::enable(&camera);
        controller.mode = CameraMode::Detached;

        let yaw_before = controller.yaw;
        controller.advance(&mut camera, NO_MOVEMENT, Some((500.0, 500.0)), false, 5.0);
        assert_eq!(controller.yaw, yaw_before);
    }

    #[test]
    fn forward_key_moves_along_the_look_angle() {
        let mut camera = camera_at(Point3::new(5.0, 4.0, 5.0), Point3::new(0.0, 0.0, 0.0));
        let mut controller = FirstPersonController::enable(&camera);
        let start = camera.position;
        let sensitivity = 5.0;

        let mut directions = NO_MOVEMENT;
        directions[MoveDirection::Front as usize] = true;
        controller.advance(&mut camera, directions, None, false, sensitivity);

        let (ex, ey, ez) = controller.step_vector(MoveDirection::Front, sensitivity);
        let moved = camera.position - start;
        assert!((moved.x - ex).abs() < 1e-6);
        assert!((moved.y - ey).abs() < 1e-6);
        assert!((moved.z - ez).abs() < 1e-6);
    }

    #[test]
    fn eye_height_snap_restores_the_enabled_height() {
        let mut camera = camera_at(Point3::new(0.0, 4.0, 0.0), Point3::new(0.0, 4.0, 10.0));
        let mut controller = FirstPersonController::enable(&camera);

        camera.position.y = 17.0;
        controller.advance(&mut camera, NO_MOVEMENT, None, true, 5.0);

        // The swing counter is pinned at zero, so the snap is exact.
        assert_eq!(camera.position.y, 4.0);
        assert_eq!(camera.up.x, 0.0);
        assert_eq!(camera.up.z, 0.0);
    }
}
