// HUD text
//
// Readouts joined into a single line that fits a window title.

use super::camera::CameraMode;
use super::state::GameState;

pub const CONTROLS_HINT: &str =
    "W/Z/Up accelerate | S/Down brake | A/Q/Left D/Right steer | Shift drift | Space handbrake | C camera | R restart | Esc pause";

/// `m:ss` with whole seconds
pub fn format_race_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// One-line HUD
pub fn hud_line(state: &GameState, camera: CameraMode) -> String {
    let mut line = format!(
        "SPEED {} KM/H | LAP {} | {} | POS {} | CAM {}",
        state.speed,
        state.lap,
        format_race_time(state.time),
        state.position,
        camera.label(),
    );
    if !state.is_playing {
        line.push_str(" | PAUSED");
    }
    line
}
