//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the
//! voxel sandbox.
//!
//! ## Key Components
//!
//! * `SandboxState` - The simulation: world, camera, jump arc, picking
//! * `EngineState` - The simulation plus the renderer and overlay handling
//! * `buffer_state` - Registry of shared GPU buffers
//! * `camera_state` - Camera handle and first-person controller
//! * `jump_state` - The Idle/Airborne vertical-motion state machine
//! * `picking` - View-ray voxel selection and the deferred edit queue
//! * `rendering` - Instanced cube, outline, and overlay passes
//! * `voxels` - Voxel data, the ordered world collection, terrain generation
//!
//! ## Frame Flow
//!
//! Each frame runs strictly in this order: sampled input is translated into
//! a `PlayerAction`, the jump arc advances, the camera integrates movement
//! and orientation, the picking scan walks the world (culling, selection,
//! at most one queued edit), the queued edit is applied, and finally the
//! renderer receives the camera and the rebuilt instance lists. Everything
//! is single threaded; state is passed by mutable reference, never shared.

use cgmath::{Deg, Point3};
use web_time::Instant;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::application_state::input_state::ProcessedInputState;

use camera_state::{Camera3d, FirstPersonController, MoveDirection};
use jump_state::JumpState;
use picking::{EditIntent, VoxelPicker, WorldEdit};
use rendering::ui::UiElementProperties;
use rendering::{RenderManager, VoxelInstance};
use voxels::terrain::{TerrainGenerator, MAP_SIZE};
use voxels::world::VoxelWorld;
use voxels::VOXEL_EXTENT;

pub mod buffer_state;
pub mod camera_state;
pub mod jump_state;
pub mod picking;
pub mod rendering;
pub mod voxels;

/// Vertical offset of the player's eyes above the ground they stand on.
pub const EYE_HEIGHT: f32 = 4.0 * VOXEL_EXTENT;

/// Noise seed used for the generated world.
pub const WORLD_SEED: u32 = 0;

/// Culling radius for rendering and picking, adjustable at runtime.
const DEFAULT_DRAW_DISTANCE: i32 = 15;
/// Lower bound for the runtime draw-distance adjustment.
const MIN_DRAW_DISTANCE: i32 = 4;

/// Movement divider while walking (larger divides the step more).
const WALK_SENSITIVITY: f32 = 5.0;
/// Movement divider while the sprint modifier is held.
const SPRINT_SENSITIVITY: f32 = 3.0;

/// How long the respawn dimmer stays on screen, in seconds.
const RESPAWN_OVERLAY_SECONDS: f32 = 3.0;

/// Tint of an unselected voxel.
const TINT_NEUTRAL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Tint of the voxel under the crosshair, and of the outline cubes.
const TINT_SELECTED: [f32; 4] = [0.78, 0.78, 0.78, 1.0];

/// Overlay element names. Elements draw in name order.
const UI_CROSSHAIR: &str = "crosshair";
const UI_JUMP_BADGE: &str = "jump_badge";
const UI_OBSERVER_BADGE: &str = "observer_badge";
const UI_RESPAWN_OVERLAY: &str = "respawn_overlay";

/// Crosshair size in normalized device coordinates.
const CROSSHAIR_SMALL: (f32, f32) = (0.010, 0.013);
/// Crosshair size while the remove button is held.
const CROSSHAIR_LARGE: (f32, f32) = (0.025, 0.033);

/// Represents player actions derived from input.
///
/// This struct contains flags for the actions a frame can trigger: movement,
/// camera rotation, the jump, world edits, and the toggles.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerAction {
    /// Movement flag, true while the bound key is down
    pub move_front: bool,
    /// Movement flag, true while the bound key is down
    pub move_back: bool,
    /// Movement flag, true while the bound key is down
    pub move_left: bool,
    /// Movement flag, true while the bound key is down
    pub move_right: bool,

    /// Jump requested this frame (press, not hold)
    pub jump: bool,
    /// Sprint modifier held
    pub sprint: bool,

    /// Teleport back to the map center (press, not hold)
    pub respawn: bool,
    /// Toggle free-observer mode (press, not hold)
    pub toggle_free_observe: bool,
    /// Raise the culling radius by one (press, not hold)
    pub increase_draw_distance: bool,
    /// Lower the culling radius by one (press, not hold)
    pub decrease_draw_distance: bool,
    /// Log camera and world statistics (press, not hold)
    pub log_stats: bool,

    /// Remove the selected voxel (press, not hold)
    pub remove_voxel: bool,
    /// Place a voxel above the selection (press, not hold)
    pub place_voxel: bool,
    /// Remove button held: the crosshair grows while aiming an erase
    pub crosshair_enlarged: bool,

    /// Pointer movement since the previous frame
    pub rotate_view: Option<(f64, f64)>,
}

/// The complete simulation state, independent of any GPU resources.
///
/// Owns the world, the camera and its controller, the jump state machine,
/// and the picker. [`SandboxState::advance`] runs one frame of the fixed
/// update order and returns what the renderer needs.
pub struct SandboxState {
    /// The ordered voxel collection
    pub world: VoxelWorld,
    /// The render-facing camera handle
    pub camera: Camera3d,
    /// First-person orientation state
    pub controller: FirstPersonController,
    /// Vertical-motion state machine
    pub jump: JumpState,
    /// Selection scan and deferred edit queue
    pub picker: VoxelPicker,
    /// When set, ground snapping and auto-respawn are suspended
    pub free_observe: bool,
    /// Culling radius in world units
    pub draw_distance: i32,
    /// Timestamp of the last respawn, used to time the overlay
    pub respawned_at: Option<f32>,
}

/// Per-frame output of the simulation, consumed by the renderer.
#[derive(Debug, Default)]
pub struct FrameOutput {
    /// One instance per visible voxel, in scan order
    pub instances: Vec<VoxelInstance>,
    /// Wire-cube instances: selection outline and ground marker
    pub outlines: Vec<VoxelInstance>,
    /// The single world edit applied this frame, if any
    pub applied_edit: Option<WorldEdit>,
    /// Whether the player was teleported back to the map center
    pub respawned: bool,
}

impl SandboxState {
    /// Generates the world and spawns the player on the center column.
    ///
    /// # Arguments
    /// * `seed` - Noise seed for the terrain generator
    pub fn new(seed: u32) -> Self {
        let mut world = VoxelWorld::new();
        TerrainGenerator::new(seed).populate(&mut world, MAP_SIZE);

        let center = MAP_SIZE as f32 / 2.0;
        let mut camera = Camera3d::new(
            Point3::new(center, EYE_HEIGHT, center),
            Point3::new(0.0, 0.0, 0.0),
            Deg(60.0),
        );
        let controller = FirstPersonController::enable(&camera);

        let surface = world
            .highest_occupied_level(center, center, true)
            .unwrap_or(0) as f32;
        camera.position.y = surface + EYE_HEIGHT;

        SandboxState {
            world,
            camera,
            controller,
            jump: JumpState::new(),
            picker: VoxelPicker::new(),
            free_observe: false,
            draw_distance: DEFAULT_DRAW_DISTANCE,
            respawned_at: None,
        }
    }

    /// Runs one frame of the simulation.
    ///
    /// # Arguments
    /// * `actions` - The player actions sampled for this frame
    /// * `now` - Monotonic clock reading in seconds
    ///
    /// # Returns
    /// The rebuilt instance lists and the frame's side effects.
    pub fn advance(&mut self, actions: &PlayerAction, now: f32) -> FrameOutput {
        if actions.increase_draw_distance {
            self.draw_distance += 1;
        }
        if actions.decrease_draw_distance && self.draw_distance > MIN_DRAW_DISTANCE {
            self.draw_distance -= 1;
        }

        if actions.toggle_free_observe {
            self.free_observe = !self.free_observe;
            log::info!("free observer mode: {}", self.free_observe);
        }

        let mut ground = self.world.highest_occupied_level(
            self.camera.position.x,
            self.camera.position.z,
            true,
        );

        // Walking off the map leaves no column under the player; that, or
        // the respawn key, teleports back to the center column. A genuine
        // ground level of 0 does not qualify.
        let mut respawned = false;
        if (!self.free_observe && ground.is_none()) || actions.respawn {
            let center = MAP_SIZE as f32 / 2.0;
            self.camera.position.x = center;
            self.camera.position.z = center;
            ground = self.world.highest_occupied_level(center, center, true);
            self.camera.position.y = ground.unwrap_or(0) as f32 + EYE_HEIGHT;
            self.respawned_at = Some(now);
            respawned = true;
            log::info!("respawned at map center");
        }

        let ground_height = ground.unwrap_or(0) as f32;

        if actions.jump {
            self.jump.start(now, ground_height);
        }
        self.jump.advance(&mut self.camera, EYE_HEIGHT, now, ground_height);

        // Keep the player on the highest ground while not airborne.
        if !self.free_observe && !self.jump.is_airborne() {
            self.camera.position.y = ground_height + EYE_HEIGHT;
        }

        let move_sensitivity = if actions.sprint {
            SPRINT_SENSITIVITY
        } else {
            WALK_SENSITIVITY
        };
        let mut directions = [false; 6];
        directions[MoveDirection::Front as usize] = actions.move_front;
        directions[MoveDirection::Back as usize] = actions.move_back;
        directions[MoveDirection::Right as usize] = actions.move_right;
        directions[MoveDirection::Left as usize] = actions.move_left;
        self.controller.advance(
            &mut self.camera,
            directions,
            actions.rotate_view,
            false,
            move_sensitivity,
        );

        let intent = EditIntent {
            remove: actions.remove_voxel,
            place: actions.place_voxel,
        };
        let summary =
            self.picker
                .scan(&self.world, &self.camera, self.draw_distance as f32, intent);

        let mut instances = Vec::with_capacity(summary.visible.len());
        for &index in &summary.visible {
            let tint = if summary.selection == Some(index) {
                TINT_SELECTED
            } else {
                TINT_NEUTRAL
            };
            instances.push(VoxelInstance::new(&self.world.voxels()[index], tint));
        }

        let mut outlines = Vec::new();
        if let Some(index) = summary.selection {
            let center = self.world.voxels()[index].center();
            outlines.push(VoxelInstance::outline_at(
                [center.x, center.y, center.z],
                TINT_SELECTED,
            ));
        }
        if summary.ground_marker && ground.is_some() {
            outlines.push(VoxelInstance::outline_at(
                [self.camera.position.x, ground_height, self.camera.position.z],
                TINT_SELECTED,
            ));
        }

        // The scan only queued the edit; the world mutates here, after the
        // draw lists are built, so this frame still shows the old state.
        let applied_edit = self.picker.apply_pending(&mut self.world);
        if let Some(edit) = &applied_edit {
            log::debug!("applied edit {:?}", edit);
        }

        FrameOutput {
            instances,
            outlines,
            applied_edit,
            respawned,
        }
    }
}

/// The main state container for the sandbox engine.
///
/// Couples the simulation with the renderer and the overlay elements.
pub struct EngineState {
    /// The simulation state
    pub sandbox: SandboxState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// The renderer and all GPU resources
    pub render_manager: RenderManager,
    /// Process start, the origin of the monotonic clock
    started_at: Instant,
    /// Whether the airborne badge is currently shown
    jump_badge_visible: bool,
}

impl EngineState {
    /// Creates a new engine state with the world generated and all GPU
    /// resources initialized.
    ///
    /// # Arguments
    /// * `surface` - The rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    /// * `shader_string` - WGSL source for the voxel and outline shaders
    /// * `ui_shader_string` - WGSL source for the overlay shader
    pub fn new(
        surface: wgpu::Surface<'static>,
        surface_config: wgpu::SurfaceConfiguration,
        device: wgpu::Device,
        queue: wgpu::Queue,
        shader_string: String,
        ui_shader_string: String,
    ) -> Self {
        let sandbox = SandboxState::new(WORLD_SEED);
        log::info!("world generated: {} voxels", sandbox.world.len());

        let mut render_manager = RenderManager::new(
            surface,
            surface_config,
            device,
            queue,
            shader_string,
            ui_shader_string,
        );
        render_manager.ui_mesh_manager.add_rectangle(
            UI_CROSSHAIR,
            (0.0, 0.0),
            CROSSHAIR_SMALL,
            wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.3,
            },
        );

        Self {
            sandbox,
            player_actions: PlayerAction::default(),
            render_manager,
            started_at: Instant::now(),
            jump_badge_visible: false,
        }
    }

    /// Resizes the rendering surface when the window size changes.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(size);
    }

    /// Renders the current frame.
    pub fn render(&mut self) {
        self.render_manager.render(true);
    }

    /// Advances the simulation one frame and hands the results to the
    /// renderer. Called once per frame before [`EngineState::render`].
    pub fn advance_frame(&mut self) {
        let now = self.started_at.elapsed().as_secs_f32();
        let actions = self.player_actions;

        let output = self.sandbox.advance(&actions, now);

        self.update_overlay(&actions, now);

        if actions.log_stats {
            log::info!(
                "camera {:?} -> {:?}, voxels {} ({} drawn), draw distance {}",
                self.sandbox.camera.position,
                self.sandbox.camera.target,
                self.sandbox.world.len(),
                output.instances.len(),
                self.sandbox.draw_distance
            );
        }

        self.render_manager
            .set_scene(&self.sandbox.camera, &output.instances, &output.outlines);
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate into actions
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = self.translate_processed_input(input);
    }

    /// Translates the processed input state into player actions.
    fn translate_processed_input(&self, input: ProcessedInputState) -> PlayerAction {
        let bindings = &self.sandbox.controller.bindings;
        let movement_key = |direction: MoveDirection| bindings.movement[direction as usize];

        PlayerAction {
            move_front: input
                .get_key_state(movement_key(MoveDirection::Front))
                .is_active(),
            move_back: input
                .get_key_state(movement_key(MoveDirection::Back))
                .is_active(),
            move_left: input
                .get_key_state(movement_key(MoveDirection::Left))
                .is_active(),
            move_right: input
                .get_key_state(movement_key(MoveDirection::Right))
                .is_active(),

            jump: input.get_key_state(KeyCode::Space).is_just_pressed(),
            sprint: input.get_key_state(bindings.sprint).is_active(),

            respawn: input.get_key_state(KeyCode::KeyR).is_just_pressed(),
            toggle_free_observe: input.get_key_state(KeyCode::KeyF).is_just_pressed(),
            increase_draw_distance: input.get_key_state(KeyCode::NumpadAdd).is_just_pressed(),
            decrease_draw_distance: input
                .get_key_state(KeyCode::NumpadSubtract)
                .is_just_pressed(),
            log_stats: input.get_key_state(KeyCode::KeyI).is_just_pressed(),

            remove_voxel: input
                .get_mouse_button_state(MouseButton::Left)
                .is_just_pressed(),
            place_voxel: input
                .get_mouse_button_state(MouseButton::Right)
                .is_just_pressed(),
            crosshair_enlarged: input.get_mouse_button_state(MouseButton::Left).is_active(),

            rotate_view: input.get_mouse_delta(),
        }
    }

    /// Updates the overlay elements from the post-frame simulation state.
    fn update_overlay(&mut self, actions: &PlayerAction, now: f32) {
        let ui = &mut self.render_manager.ui_mesh_manager;

        let crosshair_size = if actions.crosshair_enlarged {
            CROSSHAIR_LARGE
        } else {
            CROSSHAIR_SMALL
        };
        ui.update_element(
            UI_CROSSHAIR,
            &UiElementProperties::new().with_size(crosshair_size),
        );

        let airborne = self.sandbox.jump.is_airborne();
        if airborne != self.jump_badge_visible {
            if airborne {
                ui.add_rectangle(
                    UI_JUMP_BADGE,
                    (0.9, -0.9),
                    (0.06, 0.08),
                    wgpu::Color {
                        r: 0.9,
                        g: 0.1,
                        b: 0.1,
                        a: 0.8,
                    },
                );
            } else {
                ui.remove_element(UI_JUMP_BADGE);
            }
            self.jump_badge_visible = airborne;
        }

        if self.sandbox.free_observe {
            if !ui.has_element(UI_OBSERVER_BADGE) {
                ui.add_rectangle(
                    UI_OBSERVER_BADGE,
                    (-0.9, 0.9),
                    (0.06, 0.08),
                    wgpu::Color {
                        r: 0.9,
                        g: 0.1,
                        b: 0.1,
                        a: 0.8,
                    },
                );
            }
        } else {
            ui.remove_element(UI_OBSERVER_BADGE);
        }

        match self.sandbox.respawned_at {
            Some(respawned_at) if now - respawned_at < RESPAWN_OVERLAY_SECONDS => {
                if !ui.has_element(UI_RESPAWN_OVERLAY) {
                    ui.add_centered_rectangle(
                        UI_RESPAWN_OVERLAY,
                        (1.0, 1.0),
                        wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 0.3,
                        },
                    );
                }
            }
            Some(_) => {
                ui.remove_element(UI_RESPAWN_OVERLAY);
                self.sandbox.respawned_at = None;
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxels::voxel_kind::VoxelKind;
    use voxels::Voxel;

    /// A 3x3 map with a flat surface: Rock at level 0, Turf at level 1.
    fn flat_sandbox() -> SandboxState {
        let mut world = VoxelWorld::new();
        for x in 0..3 {
            for z in 0..3 {
                world.push(Voxel::new(Point3::new(x, 0, z), VoxelKind::Rock));
                world.push(Voxel::new(Point3::new(x, 1, z), VoxelKind::Turf));
            }
        }

        let mut camera = Camera3d::new(
            Point3::new(1.5, EYE_HEIGHT, 1.5),
            Point3::new(0.0, 0.0, 0.0),
            Deg(60.0),
        );
        let controller = FirstPersonController::enable(&camera);
        let surface = world.highest_occupied_level(1.5, 1.5, true).unwrap() as f32;
        camera.position.y = surface + EYE_HEIGHT;

        SandboxState {
            world,
            camera,
            controller,
            jump: JumpState::new(),
            picker: VoxelPicker::new(),
            free_observe: false,
            draw_distance: DEFAULT_DRAW_DISTANCE,
            respawned_at: None,
        }
    }

    #[test]
    fn one_forward_frame_moves_by_the_expected_vector() {
        let mut sandbox = flat_sandbox();
        let start = sandbox.camera.position;
        let (ex, ey, ez) = sandbox
            .controller
            .step_vector(MoveDirection::Front, WALK_SENSITIVITY);

        let actions = PlayerAction {
            move_front: true,
            ..Default::default()
        };
        sandbox.advance(&actions, 0.016);

        // Grounded: the frame snaps to surface + eye height before the
        // controller adds its pitch-scaled vertical term.
        let snapped_y = 1.0 + EYE_HEIGHT;
        assert!((sandbox.camera.position.x - (start.x + ex)).abs() < 1e-5);
        assert!((sandbox.camera.position.y - (snapped_y + ey)).abs() < 1e-5);
        assert!((sandbox.camera.position.z - (start.z + ez)).abs() < 1e-5);
    }

    #[test]
    fn grounded_frames_snap_to_the_surface() {
        let mut sandbox = flat_sandbox();
        sandbox.camera.position.y = 30.0;

        sandbox.advance(&PlayerAction::default(), 0.016);

        assert_eq!(sandbox.camera.position.y, 1.0 + EYE_HEIGHT);
    }

    #[test]
    fn free_observe_suspends_the_ground_snap() {
        let mut sandbox = flat_sandbox();
        let actions = PlayerAction {
            toggle_free_observe: true,
            ..Default::default()
        };
        sandbox.advance(&actions, 0.016);
        assert!(sandbox.free_observe);

        sandbox.camera.position.y = 30.0;
        sandbox.advance(&PlayerAction::default(), 0.032);
        assert_eq!(sandbox.camera.position.y, 30.0);
    }

    #[test]
    fn jump_lifts_the_camera_above_the_surface() {
        let mut sandbox = flat_sandbox();
        let actions = PlayerAction {
            jump: true,
            ..Default::default()
        };
        sandbox.advance(&actions, 10.0);
        assert!(sandbox.jump.is_airborne());

        // Mid-arc: eye height plus the apex above the surface.
        sandbox.advance(&PlayerAction::default(), 11.0);
        let apex = 1.0 + EYE_HEIGHT + jump_state::JUMP_HEIGHT;
        assert!((sandbox.camera.position.y - apex).abs() < 1e-4);

        // Past the arc: landed and snapped back.
        sandbox.advance(&PlayerAction::default(), 12.5);
        assert!(!sandbox.jump.is_airborne());
        assert_eq!(sandbox.camera.position.y, 1.0 + EYE_HEIGHT);
    }

    #[test]
    fn walking_off_the_map_respawns_at_the_center() {
        let mut sandbox = flat_sandbox();
        sandbox.camera.position.x = -40.0;
        sandbox.camera.position.z = -40.0;

        let output = sandbox.advance(&PlayerAction::default(), 5.0);

        assert!(output.respawned);
        assert_eq!(sandbox.respawned_at, Some(5.0));
        assert_eq!(sandbox.camera.position.x, MAP_SIZE as f32 / 2.0);
        assert_eq!(sandbox.camera.position.z, MAP_SIZE as f32 / 2.0);
    }

    #[test]
    fn free_observe_never_auto_respawns() {
        let mut sandbox = flat_sandbox();
        sandbox.free_observe = true;
        sandbox.camera.position.x = -40.0;
        sandbox.camera.position.z = -40.0;

        let output = sandbox.advance(&PlayerAction::default(), 5.0);

        assert!(!output.respawned);
        assert_eq!(sandbox.camera.position.x, -40.0);
    }

    #[test]
    fn draw_distance_adjusts_within_its_lower_bound() {
        let mut sandbox = flat_sandbox();
        sandbox.draw_distance = MIN_DRAW_DISTANCE;

        let decrease = PlayerAction {
            decrease_draw_distance: true,
            ..Default::default()
        };
        sandbox.advance(&decrease, 0.016);
        assert_eq!(sandbox.draw_distance, MIN_DRAW_DISTANCE);

        let increase = PlayerAction {
            increase_draw_distance: true,
            ..Default::default()
        };
        sandbox.advance(&increase, 0.032);
        assert_eq!(sandbox.draw_distance, MIN_DRAW_DISTANCE + 1);
    }

    #[test]
    fn frame_output_draws_the_pre_edit_world() {
        let mut sandbox = flat_sandbox();
        // Aim straight down into the column under the player. The scan
        // order selects the column's first-inserted voxel, the rock.
        sandbox.camera.target = Point3::new(
            sandbox.camera.position.x,
            sandbox.camera.position.y - 10.0,
            sandbox.camera.position.z,
        );
        let voxels_before = sandbox.world.len();

        let actions = PlayerAction {
            place_voxel: true,
            ..Default::default()
        };
        let output = sandbox.advance(&actions, 0.016);

        assert!(matches!(output.applied_edit, Some(WorldEdit::Place(_))));
        // The placed voxel was not drawn this frame.
        assert_eq!(output.instances.len(), voxels_before);
        assert_eq!(sandbox.world.len(), voxels_before + 1);
        // A straight-down ray qualifies for the ground marker, so both the
        // selection outline and the marker were emitted.
        assert_eq!(output.outlines.len(), 2);
    }
}
