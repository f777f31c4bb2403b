//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse input state tracking
//! - Input event processing
//! - Input state management

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

/// Every key the sandbox reacts to: movement, jump, sprint, respawn,
/// free-observer toggle, stats logging, and the draw-distance pair.
const KEY_CODES: [KeyCode; 13] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyE,
    KeyCode::KeyQ,
    KeyCode::KeyR,
    KeyCode::KeyF,
    KeyCode::KeyI,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::NumpadAdd,
    KeyCode::NumpadSubtract,
];

/// Manages the state of all input devices and processes input events.
///
/// This struct maintains the current state of keyboard and mouse inputs
/// and provides methods to process input events from the windowing system.
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl InputManager {
    /// Creates a new InputManager with default state.
    ///
    /// Initializes all tracked keyboard keys to 'released' state and sets up
    /// empty mouse input state.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        let mouse_buttons = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

        let mut mouse_button_inputs_old = HashMap::new();
        let mut mouse_button_inputs_new = HashMap::new();

        for button in mouse_buttons {
            mouse_button_inputs_old.insert(button, false);
            mouse_button_inputs_new.insert(button, false);
        }

        let mouse_inputs = MouseInput {
            mouse_button_inputs_old,
            mouse_button_inputs_new,
            mouse_scroll_delta: None,
            mouse_delta: None,
        };

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    ///
    /// This should be called at the end of each frame to ensure that the "old" state
    /// is properly updated for the next frame's comparisons.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// Handles keyboard and mouse button events, updating the internal state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if let Some(key_state) = self.keyboard_inputs_new.get_mut(key) {
                    *key_state = *state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_inputs.mouse_scroll_delta = Some(*delta);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button_state) =
                    self.mouse_inputs.mouse_button_inputs_new.get_mut(button)
                {
                    *button_state = *state == ElementState::Pressed;
                }
            }
            _ => {}
        }
    }

    /// Accumulates a mouse movement delta.
    ///
    /// Device events can fire several times between frames; the deltas sum
    /// so fast pointer motion isn't dropped.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (acc_x, acc_y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((acc_x + delta.0, acc_y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// This translates the raw boolean states into `RawInputState` enum values
    /// that represent the state transitions (pressed, held, released, not pressed).
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let mut keyboard_states = HashMap::new();
        let mut mouse_button_states = HashMap::new();

        for (key, &new_state) in self.keyboard_inputs_new.iter() {
            let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
            keyboard_states.insert(*key, RawInputState::from_raw_states(old_state, new_state));
        }

        for (button, &new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            let old_state = self
                .mouse_inputs
                .mouse_button_inputs_old
                .get(button)
                .copied()
                .unwrap_or(false);
            mouse_button_states
                .insert(*button, RawInputState::from_raw_states(old_state, new_state));
        }

        let mouse_delta = self.mouse_inputs.mouse_delta;

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta,
        }
    }

    /// Returns the processed input state and resets internal state.
    ///
    /// This method should be called once per frame to get the processed
    /// input state and reset the per-frame accumulators.
    pub fn get_and_reset_processed_input(&mut self) -> Option<ProcessedInputState> {
        let processed_input = Some(self.create_processed_input_state());
        self.reset_inputs();
        processed_input
    }

    /// Resets all per-frame input state.
    ///
    /// This is also called when the window loses focus to prevent stuck
    /// keys or buttons.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();

        self.mouse_inputs.mouse_scroll_delta = None;
        self.mouse_inputs.mouse_delta = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_motion_accumulates_between_frames() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -1.0));
        manager.intake_mouse_motion((2.0, 4.0));

        let processed = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(processed.get_mouse_delta(), Some((5.0, 3.0)));

        // Reset: the next frame starts with no delta.
        let processed = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(processed.get_mouse_delta(), None);
    }
}
