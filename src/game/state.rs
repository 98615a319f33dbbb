// Session state shown on the HUD

use log::info;

/// Scalar race fields, owned by the session and passed by reference
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Speed in km/h
    pub speed: u32,
    /// Elapsed race time in seconds
    pub time: f32,
    pub lap: u32,
    pub position: u32,
    pub is_playing: bool,
    // Nothing scores points yet; the field stays so the HUD state is complete
    #[allow(dead_code)]
    pub score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            speed: 0,
            time: 0.0,
            lap: 1,
            position: 1,
            is_playing: false,
            score: 0,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_speed(&mut self, speed: u32) {
        self.speed = speed;
    }

    pub fn update_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn start(&mut self) {
        if !self.is_playing {
            info!("Race started");
        }
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        if self.is_playing {
            info!("Race paused at {:.1}s", self.time);
        }
        self.is_playing = false;
    }

    /// Back to the starting grid
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
