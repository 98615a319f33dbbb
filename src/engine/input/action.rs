// Driving action definitions and default key bindings

use serde::Deserialize;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Driving
    Forward,
    Backward,
    Left,
    Right,
    Drift,
    Handbrake,

    // Free-roam camera offset
    LookLeft,
    LookRight,
    LookUp,
    LookDown,

    // Meta actions
    Pause,
    CameraCycle,
    Restart,
}

/// Represents an input source (keyboard key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for the driver.
///
/// Covers both AZERTY (ZQSD) and QWERTY (WASD) layouts plus the arrow keys.
pub fn default_driving_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyZ), Action::Forward),
        (InputSource::key(KeyCode::KeyW), Action::Forward),
        (InputSource::key(KeyCode::ArrowUp), Action::Forward),
        (InputSource::key(KeyCode::KeyS), Action::Backward),
        (InputSource::key(KeyCode::ArrowDown), Action::Backward),
        (InputSource::key(KeyCode::KeyQ), Action::Left),
        (InputSource::key(KeyCode::KeyA), Action::Left),
        (InputSource::key(KeyCode::ArrowLeft), Action::Left),
        (InputSource::key(KeyCode::KeyD), Action::Right),
        (InputSource::key(KeyCode::ArrowRight), Action::Right),
        (InputSource::key(KeyCode::ShiftLeft), Action::Drift),
        (InputSource::key(KeyCode::ShiftRight), Action::Drift),
        (InputSource::key(KeyCode::Space), Action::Handbrake),
        (InputSource::key(KeyCode::KeyJ), Action::LookLeft),
        (InputSource::key(KeyCode::KeyL), Action::LookRight),
        (InputSource::key(KeyCode::KeyI), Action::LookUp),
        (InputSource::key(KeyCode::KeyK), Action::LookDown),
    ]
}

/// Global bindings (not tied to driving)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Pause),
        (InputSource::key(KeyCode::KeyC), Action::CameraCycle),
        (InputSource::key(KeyCode::KeyR), Action::Restart),
    ]
}
