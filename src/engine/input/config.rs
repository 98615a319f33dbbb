// Key binding configuration and remapping

use super::action::{self, Action, InputSource};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Which default binding table a layer resets to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingLayer {
    Driving,
    Global,
}

impl BindingLayer {
    /// Layer that owns an action's keys
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Pause | Action::CameraCycle | Action::Restart => Self::Global,
            _ => Self::Driving,
        }
    }

    fn defaults(self) -> Vec<(InputSource, Action)> {
        match self {
            Self::Driving => action::default_driving_bindings(),
            Self::Global => action::global_bindings(),
        }
    }
}

/// One layer of key bindings.
/// Maps input sources to actions, with a reverse index for rebinding menus.
#[derive(Debug, Clone)]
pub struct InputConfig {
    layer: BindingLayer,
    bindings: HashMap<InputSource, Action>,
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty layer
    pub fn empty(layer: BindingLayer) -> Self {
        Self {
            layer,
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    /// Create a layer populated with its default bindings
    pub fn with_defaults(layer: BindingLayer) -> Self {
        let mut config = Self::empty(layer);
        config.reset_to_defaults();
        config
    }

    /// Bind an input source to an action, replacing whatever it was bound to
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);
        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        let Some(action) = self.bindings.remove(&source) else {
            return;
        };
        if let Some(sources) = self.action_to_sources.get_mut(&action) {
            sources.retain(|s| *s != source);
            if sources.is_empty() {
                self.action_to_sources.remove(&action);
            }
        }
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    /// Reset to the default table for this layer
    pub fn reset_to_defaults(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
        for (source, action) in self.layer.defaults() {
            self.bind(source, action);
        }
    }
}

/// One key to action assignment from the config file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KeyRemap {
    pub key: KeyCode,
    pub action: Action,
}

/// Key remaps applied over the default bindings, in field order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BindingOverrides {
    /// Actions whose default keys are dropped
    pub clear: Vec<Action>,
    /// Keys freed from whatever they were bound to
    pub unbind: Vec<KeyCode>,
    pub bind: Vec<KeyRemap>,
}

impl BindingOverrides {
    pub fn is_empty(&self) -> bool {
        self.clear.is_empty() && self.unbind.is_empty() && self.bind.is_empty()
    }
}

/// Driving bindings layered over global bindings
#[derive(Debug, Clone)]
pub struct KeyBindings {
    driving: InputConfig,
    global: InputConfig,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            driving: InputConfig::with_defaults(BindingLayer::Driving),
            global: InputConfig::with_defaults(BindingLayer::Global),
        }
    }

    /// Defaults with the config file's remaps applied
    pub fn with_overrides(overrides: &BindingOverrides) -> Self {
        let mut bindings = Self::new();
        bindings.apply(overrides);
        bindings
    }

    fn layer_mut(&mut self, layer: BindingLayer) -> &mut InputConfig {
        match layer {
            BindingLayer::Driving => &mut self.driving,
            BindingLayer::Global => &mut self.global,
        }
    }

    /// Resolve a source, checking driving bindings before global ones
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.driving
            .get_action(source)
            .or_else(|| self.global.get_action(source))
    }

    /// Apply remaps. A key moved to a new action leaves its old one, even
    /// across layers.
    pub fn apply(&mut self, overrides: &BindingOverrides) {
        if overrides.is_empty() {
            return;
        }

        for &action in &overrides.clear {
            self.layer_mut(BindingLayer::for_action(action))
                .unbind_action(action);
        }

        for &key in &overrides.unbind {
            let source = InputSource::key(key);
            self.driving.unbind_source(source);
            self.global.unbind_source(source);
        }

        for remap in &overrides.bind {
            let source = InputSource::key(remap.key);
            self.driving.unbind_source(source);
            self.global.unbind_source(source);
            self.layer_mut(BindingLayer::for_action(remap.action))
                .bind(source, remap.action);
        }

        debug!(
            "Key remaps applied: {} cleared, {} unbound, {} bound",
            overrides.clear.len(),
            overrides.unbind.len(),
            overrides.bind.len()
        );

        for action in [Action::Forward, Action::Backward, Action::Left, Action::Right] {
            if !self.driving.has_binding(action) {
                warn!("No key is bound to {action:?}");
            }
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::empty(BindingLayer::Driving);
        let source = InputSource::key(KeyCode::KeyW);
        config.bind(source, Action::Forward);

        assert_eq!(config.get_action(source), Some(Action::Forward));
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::with_defaults(BindingLayer::Driving);
        let source = InputSource::key(KeyCode::KeyW);
        config.unbind_source(source);

        assert_eq!(config.get_action(source), None);
        // Other forward keys still work
        assert!(config.has_binding(Action::Forward));
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::with_defaults(BindingLayer::Driving);
        config.unbind_action(Action::Left);

        assert!(!config.has_binding(Action::Left));
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyQ)), None);
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyA)), None);
        assert_eq!(config.get_action(InputSource::key(KeyCode::ArrowLeft)), None);
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::empty(BindingLayer::Driving);
        let source = InputSource::key(KeyCode::KeyX);

        config.bind(source, Action::Drift);
        config.bind(source, Action::Handbrake);

        assert_eq!(config.get_action(source), Some(Action::Handbrake));
        assert!(!config.has_binding(Action::Drift));
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::with_defaults(BindingLayer::Driving);
        config.unbind_action(Action::Forward);
        config.bind(InputSource::key(KeyCode::KeyS), Action::Forward);
        config.reset_to_defaults();

        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyS)),
            Some(Action::Backward)
        );
        assert!(config.has_binding(Action::Forward));
    }

    #[test]
    fn test_key_bindings_resolve_global() {
        let bindings = KeyBindings::new();

        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Pause)
        );
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyC)),
            Some(Action::CameraCycle)
        );
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyR)),
            Some(Action::Restart)
        );
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Handbrake)
        );
    }

    #[test]
    fn test_action_layers() {
        assert_eq!(BindingLayer::for_action(Action::Drift), BindingLayer::Driving);
        assert_eq!(BindingLayer::for_action(Action::LookUp), BindingLayer::Driving);
        assert_eq!(BindingLayer::for_action(Action::Pause), BindingLayer::Global);
        assert_eq!(BindingLayer::for_action(Action::Restart), BindingLayer::Global);
    }

    #[test]
    fn test_overrides_bind_new_key() {
        let overrides = BindingOverrides {
            bind: vec![KeyRemap {
                key: KeyCode::KeyE,
                action: Action::Handbrake,
            }],
            ..Default::default()
        };
        let bindings = KeyBindings::with_overrides(&overrides);

        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyE)),
            Some(Action::Handbrake)
        );
        // Defaults stay in place
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Handbrake)
        );
    }

    #[test]
    fn test_overrides_move_key_across_layers() {
        let overrides = BindingOverrides {
            bind: vec![KeyRemap {
                key: KeyCode::Space,
                action: Action::Pause,
            }],
            ..Default::default()
        };
        let bindings = KeyBindings::with_overrides(&overrides);

        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Pause)
        );
    }

    #[test]
    fn test_overrides_clear_then_bind() {
        let overrides = BindingOverrides {
            clear: vec![Action::Drift],
            unbind: vec![KeyCode::KeyQ],
            bind: vec![KeyRemap {
                key: KeyCode::KeyX,
                action: Action::Drift,
            }],
        };
        let bindings = KeyBindings::with_overrides(&overrides);

        assert_eq!(bindings.get_action(InputSource::key(KeyCode::ShiftLeft)), None);
        assert_eq!(bindings.get_action(InputSource::key(KeyCode::KeyQ)), None);
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyX)),
            Some(Action::Drift)
        );
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyA)),
            Some(Action::Left)
        );
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let bindings = KeyBindings::with_overrides(&BindingOverrides::default());
        assert_eq!(
            bindings.get_action(InputSource::key(KeyCode::KeyW)),
            Some(Action::Forward)
        );
    }
}
