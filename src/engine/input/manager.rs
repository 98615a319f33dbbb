// Input manager - turns keyboard and focus events into action state

use super::action::{Action, InputSource};
use super::config::KeyBindings;
use super::control::ControlState;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Tracks held keys and resolves them to actions.
///
/// Events write into the manager at any time; the simulation reads a
/// [`ControlState`] copy once per tick through [`InputManager::snapshot`].
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: KeyBindings,

    /// Physical sources currently held down
    held: HashSet<InputSource>,

    /// Actions that went down since the last `end_frame`
    just_pressed: HashSet<Action>,
}

impl InputManager {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Process a key transition.
    /// Auto-repeat presses are ignored; only a release clears a key.
    pub fn process_key(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.bindings.get_action(source) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if repeat {
                    return;
                }
                let was_pressed = self.is_pressed(action);
                self.held.insert(source);
                if !was_pressed {
                    self.just_pressed.insert(action);
                }
            }
            ElementState::Released => {
                self.held.remove(&source);
            }
        }
    }

    /// Window focus changed; losing focus releases every key
    pub fn process_focus(&mut self, focused: bool) {
        if !focused {
            if !self.held.is_empty() {
                log::debug!("Focus lost, releasing {} held keys", self.held.len());
            }
            self.reset();
        }
    }

    /// Check if an action is held through any of its bound keys
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|source| self.bindings.get_action(*source) == Some(action))
    }

    /// Check if an action went down this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Copy of the driving controls for this tick
    pub fn snapshot(&self) -> ControlState {
        ControlState::from_fn(|action| self.is_pressed(action))
    }

    /// Free-look direction as (horizontal, vertical) in -1.0..=1.0
    pub fn look_axis(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::LookLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::LookRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::LookDown) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::LookUp) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }

    /// Clear edge-triggered state; call once per rendered frame
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::config::{BindingOverrides, KeyRemap};
    use winit::keyboard::KeyCode;

    fn press(manager: &mut InputManager, key: KeyCode) {
        manager.process_key(InputSource::key(key), ElementState::Pressed, false);
    }

    fn repeat(manager: &mut InputManager, key: KeyCode) {
        manager.process_key(InputSource::key(key), ElementState::Pressed, true);
    }

    fn release(manager: &mut InputManager, key: KeyCode) {
        manager.process_key(InputSource::key(key), ElementState::Released, false);
    }

    #[test]
    fn test_key_down_sets_flag() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyW);

        let controls = manager.snapshot();
        assert!(controls.forward);
        assert!(!controls.backward);
    }

    #[test]
    fn test_key_up_clears_flag() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::Space);
        release(&mut manager, KeyCode::Space);

        assert!(!manager.snapshot().handbrake);
    }

    #[test]
    fn test_key_repeat_does_not_toggle() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyD);
        manager.end_frame();
        for _ in 0..10 {
            repeat(&mut manager, KeyCode::KeyD);
        }

        assert!(manager.snapshot().right);
        assert!(!manager.just_pressed(Action::Right));
    }

    #[test]
    fn test_repeat_without_press_is_ignored() {
        let mut manager = InputManager::default();
        repeat(&mut manager, KeyCode::KeyA);

        assert!(!manager.snapshot().left);
    }

    #[test]
    fn test_alternate_keys_share_action() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyZ);
        press(&mut manager, KeyCode::ArrowUp);
        release(&mut manager, KeyCode::KeyZ);

        // ArrowUp is still down
        assert!(manager.snapshot().forward);

        release(&mut manager, KeyCode::ArrowUp);
        assert!(!manager.snapshot().forward);
    }

    #[test]
    fn test_focus_loss_clears_everything() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::ShiftLeft);
        press(&mut manager, KeyCode::KeyQ);

        manager.process_focus(false);

        assert_eq!(manager.snapshot(), ControlState::default());
    }

    #[test]
    fn test_focus_gain_keeps_state() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyW);
        manager.process_focus(true);

        assert!(manager.snapshot().forward);
    }

    #[test]
    fn test_just_pressed_cleared_on_end_frame() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyC);
        assert!(manager.just_pressed(Action::CameraCycle));

        manager.end_frame();
        assert!(!manager.just_pressed(Action::CameraCycle));
        assert!(manager.is_pressed(Action::CameraCycle));
    }

    #[test]
    fn test_second_key_for_held_action_is_not_an_edge() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::ShiftLeft);
        manager.end_frame();
        press(&mut manager, KeyCode::ShiftRight);

        assert!(!manager.just_pressed(Action::Drift));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::F5);

        assert_eq!(manager.snapshot(), ControlState::default());
    }

    #[test]
    fn test_look_axis() {
        let mut manager = InputManager::default();
        assert_eq!(manager.look_axis(), (0.0, 0.0));

        press(&mut manager, KeyCode::KeyL);
        press(&mut manager, KeyCode::KeyI);
        assert_eq!(manager.look_axis(), (1.0, 1.0));

        press(&mut manager, KeyCode::KeyJ);
        assert_eq!(manager.look_axis(), (0.0, 1.0));
    }

    #[test]
    fn test_remapped_key() {
        let overrides = BindingOverrides {
            unbind: vec![KeyCode::Space],
            bind: vec![KeyRemap {
                key: KeyCode::KeyE,
                action: Action::Handbrake,
            }],
            ..Default::default()
        };
        let mut manager = InputManager::new(KeyBindings::with_overrides(&overrides));

        press(&mut manager, KeyCode::Space);
        assert!(!manager.snapshot().handbrake);

        press(&mut manager, KeyCode::KeyE);
        assert!(manager.snapshot().handbrake);
    }

    #[test]
    fn test_restart_key_is_an_edge() {
        let mut manager = InputManager::default();
        press(&mut manager, KeyCode::KeyR);
        assert!(manager.just_pressed(Action::Restart));
        assert_eq!(manager.snapshot(), ControlState::default());
    }
}
