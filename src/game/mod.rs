// Game layer: tuning, the vehicle force model, camera, race state and screens

pub mod camera;
pub mod config;
pub mod hud;
pub mod screens;
pub mod session;
pub mod state;
pub mod track;
pub mod tuning;
pub mod vehicle;

pub use config::GameConfig;
pub use screens::Screen;
pub use session::RaceSession;
