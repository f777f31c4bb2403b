#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! An interactive voxel sandbox viewer built with Rust and WGPU: noise
//! generated column terrain, a first-person camera, a parabolic jump, and
//! crosshair-driven voxel placement and removal.
//!
//! ## Key Modules
//!
//! * `application_state` - Window, graphics initialization, input handling
//! * `engine_state` - The simulation (world, camera, jump, picking) and the
//!   renderer
//!
//! ## Architecture
//!
//! A single-threaded, synchronous frame loop: input sampling, state
//! advancement, picking, and drawing all happen sequentially within one
//! frame. All simulation state lives in explicit structs threaded through
//! the update call by mutable reference.
//!
//! ## Usage
//!
//! ```rust,no_run
//! voxel_sandbox::run();
//! ```
//!
//! ## Controls
//!
//! WASD moves, the mouse looks, Space jumps, left click removes the voxel
//! under the crosshair, right click stacks a new one on top of it. R
//! respawns, F toggles the free observer, left shift sprints, numpad +/-
//! adjust the draw distance, I logs frame statistics.

use application_state::{
    graphics_resources_builder::{GraphicsBuilder, MaybeGraphics},
    ApplicationState,
};

use winit::event_loop::EventLoop;

use log::info;

mod application_state;
mod engine_state;

/// Initializes logging and runs the sandbox until the window closes.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let event_loop = EventLoop::with_user_event().build().unwrap();

    let mut state: ApplicationState = ApplicationState {
        graphics: MaybeGraphics::Builder(GraphicsBuilder::new(event_loop.create_proxy())),
        state: None,
    };

    let _ = event_loop.run_app(&mut state);
}
