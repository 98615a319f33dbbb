// Input handling system
//
// Keyboard and focus events from winit are resolved through remappable key
// bindings into held actions. The simulation never reads events directly: it
// takes a `ControlState` snapshot once per tick.
//
// - `action`: driving and meta actions, default key bindings
// - `config`: binding layers and remapping
// - `control`: the per-tick control snapshot
// - `manager`: held-key tracking and edge detection

pub mod action;
pub mod config;
pub mod control;
pub mod manager;

pub use action::Action;
pub use config::{BindingOverrides, KeyBindings};

// Re-export for remapping callers and tests
#[allow(unused_imports)]
pub use action::InputSource;
pub use control::ControlState;
pub use manager::InputManager;
