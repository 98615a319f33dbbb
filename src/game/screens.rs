// Routes and the static data behind the non-driving screens

use serde::Deserialize;
use std::fmt;

use super::hud::CONTROLS_HINT;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScreenError {
    #[error("unknown route: {0} (expected /, /game, /settings or /leaderboard)")]
    UnknownRoute(String),
}

/// Top-level screens, addressed by route path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    Menu,
    #[default]
    Game,
    Settings,
    Leaderboard,
}

impl Screen {
    pub fn from_path(path: &str) -> Result<Self, ScreenError> {
        match path.trim_end_matches('/') {
            "" => Ok(Self::Menu),
            "/game" => Ok(Self::Game),
            "/settings" => Ok(Self::Settings),
            "/leaderboard" => Ok(Self::Leaderboard),
            _ => Err(ScreenError::UnknownRoute(path.to_string())),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Menu => "/",
            Self::Game => "/game",
            Self::Settings => "/settings",
            Self::Leaderboard => "/leaderboard",
        }
    }

    /// Text lines shown for screens that have no 3D view
    pub fn lines(&self, settings: &Settings) -> Vec<String> {
        match self {
            Self::Menu => vec![
                "NEON RACER".to_string(),
                "Enter the neon grid".to_string(),
                format!("Routes: {} {} {}", Self::Game, Self::Settings, Self::Leaderboard),
                CONTROLS_HINT.to_string(),
            ],
            Self::Game => Vec::new(),
            Self::Settings => settings.lines(),
            Self::Leaderboard => leaderboard().iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsQuality {
    Low,
    Medium,
    #[default]
    High,
}

impl GraphicsQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Settings shown on the settings screen, read from the `[settings]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub graphics: GraphicsQuality,
    /// Keyboard is the only input device
    #[serde(skip)]
    pub controls: &'static str,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            graphics: GraphicsQuality::default(),
            controls: "keyboard",
        }
    }
}

impl Settings {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Sound: {}", if self.sound_enabled { "on" } else { "off" }),
            format!("Graphics: {}", self.graphics.as_str()),
            format!("Controls: {}", self.controls),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub time: &'static str,
    pub score: u32,
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>2}. {:<14} {:>8} {:>6}",
            self.rank, self.name, self.time, self.score
        )
    }
}

const LEADERBOARD: [LeaderboardEntry; 8] = [
    LeaderboardEntry { rank: 1, name: "SpeedDemon", time: "1:23.45", score: 9850 },
    LeaderboardEntry { rank: 2, name: "NeonRacer", time: "1:25.12", score: 9720 },
    LeaderboardEntry { rank: 3, name: "CyberDriver", time: "1:27.89", score: 9500 },
    LeaderboardEntry { rank: 4, name: "QuantumSpeed", time: "1:29.34", score: 9200 },
    LeaderboardEntry { rank: 5, name: "ElectroRush", time: "1:31.67", score: 8900 },
    LeaderboardEntry { rank: 6, name: "PhotonBlast", time: "1:33.21", score: 8650 },
    LeaderboardEntry { rank: 7, name: "VoidRacer", time: "1:35.78", score: 8400 },
    LeaderboardEntry { rank: 8, name: "PlasmaSpeed", time: "1:38.45", score: 8100 },
];

/// Hard-coded best times, best first
pub fn leaderboard() -> &'static [LeaderboardEntry] {
    &LEADERBOARD
}
