// Control state snapshot read by the simulation once per tick

use super::action::Action;

/// Boolean record of the currently held driving inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub drift: bool,
    pub handbrake: bool,
}

impl ControlState {
    /// Build a snapshot from a predicate over driving actions
    pub fn from_fn(mut is_pressed: impl FnMut(Action) -> bool) -> Self {
        Self {
            forward: is_pressed(Action::Forward),
            backward: is_pressed(Action::Backward),
            left: is_pressed(Action::Left),
            right: is_pressed(Action::Right),
            drift: is_pressed(Action::Drift),
            handbrake: is_pressed(Action::Handbrake),
        }
    }

    /// Steering input: +1 for left, -1 for right, 0 when neither or both are held
    pub fn steer(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
