// Vehicle and camera tuning constants
//
// One canonical set of constants, overridable from the config file and
// validated once at startup.

use glam::Vec3;
use serde::Deserialize;

use crate::engine::physics::presets::ChassisSpec;

/// A tuning value that failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be in (0, 1], got {value}")]
    NotAFactor { name: &'static str, value: f32 },
}

fn finite(name: &'static str, value: f32) -> Result<f32, TuningError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TuningError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if finite(name, value)? > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), TuningError> {
    if finite(name, value)? >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { name, value })
    }
}

fn factor(name: &'static str, value: f32) -> Result<(), TuningError> {
    let value = finite(name, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TuningError::NotAFactor { name, value })
    }
}

/// Chassis and force model constants.
/// Speeds are in m/s, forces in N, torques in N·m.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    // Chassis
    pub mass: f32,
    /// Full extents of the box chassis (width, height, length)
    pub size: [f32; 3],
    /// Chassis contact friction. The box slides where wheels would roll,
    /// so this stays low and rolling resistance comes from the force model.
    pub friction: f32,
    pub restitution: f32,

    // Drive
    pub engine_force: f32,
    /// No engine force at or above this speed
    pub max_speed: f32,
    pub brake_force: f32,
    /// Forward speed above which backward brakes instead of reversing
    pub brake_min_speed: f32,
    pub reverse_force: f32,

    // Steering
    pub steer_torque: f32,
    /// No steering torque at or below this speed
    pub steer_min_speed: f32,
    /// Speed at which steering reaches full authority
    pub steer_full_speed: f32,

    // Drift
    pub drift_force: f32,
    pub drift_min_speed: f32,

    // Handbrake
    pub handbrake_force: f32,
    pub spin_torque: f32,
    pub spin_min_speed: f32,
    pub handbrake_drag_multiplier: f32,

    // Resistance
    pub air_drag: f32,
    pub rolling_resistance: f32,
    pub resistance_min_speed: f32,

    // Anti-tip
    pub stabilize_threshold: f32,
    pub stabilize_torque: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            mass: 500.0,
            size: [2.2, 0.8, 4.5],
            friction: 0.05,
            restitution: 0.1,

            engine_force: 2000.0,
            max_speed: 50.0,
            brake_force: 3000.0,
            brake_min_speed: 0.5,
            reverse_force: 1200.0,

            steer_torque: 3000.0,
            steer_min_speed: 0.5,
            steer_full_speed: 15.0,

            drift_force: 1500.0,
            drift_min_speed: 3.0,

            handbrake_force: 4000.0,
            spin_torque: 2500.0,
            spin_min_speed: 5.0,
            handbrake_drag_multiplier: 3.0,

            air_drag: 0.02,
            rolling_resistance: 50.0,
            resistance_min_speed: 0.1,

            stabilize_threshold: 0.1,
            stabilize_torque: 2000.0,
        }
    }
}

impl VehicleTuning {
    /// Physical body description for the physics world
    pub fn chassis(&self) -> ChassisSpec {
        ChassisSpec {
            mass: self.mass,
            size: Vec3::from_array(self.size),
            friction: self.friction,
            restitution: self.restitution,
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("vehicle.mass", self.mass)?;
        for extent in self.size {
            positive("vehicle.size", extent)?;
        }
        non_negative("vehicle.friction", self.friction)?;
        non_negative("vehicle.restitution", self.restitution)?;

        non_negative("vehicle.engine_force", self.engine_force)?;
        positive("vehicle.max_speed", self.max_speed)?;
        non_negative("vehicle.brake_force", self.brake_force)?;
        non_negative("vehicle.brake_min_speed", self.brake_min_speed)?;
        non_negative("vehicle.reverse_force", self.reverse_force)?;

        non_negative("vehicle.steer_torque", self.steer_torque)?;
        non_negative("vehicle.steer_min_speed", self.steer_min_speed)?;
        positive("vehicle.steer_full_speed", self.steer_full_speed)?;

        non_negative("vehicle.drift_force", self.drift_force)?;
        non_negative("vehicle.drift_min_speed", self.drift_min_speed)?;

        non_negative("vehicle.handbrake_force", self.handbrake_force)?;
        non_negative("vehicle.spin_torque", self.spin_torque)?;
        non_negative("vehicle.spin_min_speed", self.spin_min_speed)?;
        positive(
            "vehicle.handbrake_drag_multiplier",
            self.handbrake_drag_multiplier,
        )?;

        non_negative("vehicle.air_drag", self.air_drag)?;
        non_negative("vehicle.rolling_resistance", self.rolling_resistance)?;
        non_negative("vehicle.resistance_min_speed", self.resistance_min_speed)?;

        non_negative("vehicle.stabilize_threshold", self.stabilize_threshold)?;
        non_negative("vehicle.stabilize_torque", self.stabilize_torque)?;
        Ok(())
    }
}

/// Chase camera and shake constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Speed at which the chase camera reaches its high-speed framing
    pub speed_reference: f32,

    pub distance: f32,
    pub distance_at_speed: f32,
    pub height: f32,
    pub height_at_speed: f32,

    pub look_ahead: f32,
    pub look_ahead_per_speed: f32,
    pub look_height: f32,

    /// Per-frame lerp factor at rest
    pub smoothing: f32,
    /// Added to the lerp factor at full speed
    pub smoothing_boost: f32,

    pub shake_min_speed: f32,
    pub shake_intensity: f32,

    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Radians per second
    pub orbit_speed: f32,

    /// Radians per second while a free-look key is held
    pub free_look_rate: f32,
    /// Metres per second while a free-look key is held
    pub free_height_rate: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            speed_reference: 40.0,

            distance: 12.0,
            distance_at_speed: 8.0,
            height: 6.0,
            height_at_speed: 4.0,

            look_ahead: 2.0,
            look_ahead_per_speed: 0.2,
            look_height: 1.0,

            smoothing: 0.05,
            smoothing_boost: 0.05,

            shake_min_speed: 30.0,
            shake_intensity: 0.15,

            orbit_radius: 15.0,
            orbit_height: 5.0,
            orbit_speed: 0.3,

            free_look_rate: 1.5,
            free_height_rate: 4.0,
        }
    }
}

impl CameraTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("camera.speed_reference", self.speed_reference)?;
        positive("camera.distance", self.distance)?;
        positive("camera.distance_at_speed", self.distance_at_speed)?;
        finite("camera.height", self.height)?;
        finite("camera.height_at_speed", self.height_at_speed)?;
        finite("camera.look_ahead", self.look_ahead)?;
        non_negative("camera.look_ahead_per_speed", self.look_ahead_per_speed)?;
        finite("camera.look_height", self.look_height)?;
        factor("camera.smoothing", self.smoothing)?;
        non_negative("camera.smoothing_boost", self.smoothing_boost)?;
        non_negative("camera.shake_min_speed", self.shake_min_speed)?;
        non_negative("camera.shake_intensity", self.shake_intensity)?;
        positive("camera.orbit_radius", self.orbit_radius)?;
        finite("camera.orbit_height", self.orbit_height)?;
        finite("camera.orbit_speed", self.orbit_speed)?;
        non_negative("camera.free_look_rate", self.free_look_rate)?;
        non_negative("camera.free_height_rate", self.free_height_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(VehicleTuning::default().validate(), Ok(()));
        assert_eq!(CameraTuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let tuning = VehicleTuning {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                name: "vehicle.mass",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_negative_force() {
        let tuning = VehicleTuning {
            engine_force: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative { name: "vehicle.engine_force", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = VehicleTuning {
            air_drag: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite { name: "vehicle.air_drag", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_chassis_extent() {
        let tuning = VehicleTuning {
            size: [2.2, -0.8, 4.5],
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_smoothing_must_be_a_factor() {
        for smoothing in [0.0, 1.5, -0.2] {
            let tuning = CameraTuning {
                smoothing,
                ..Default::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::NotAFactor { .. })
            ));
        }

        let snap = CameraTuning {
            smoothing: 1.0,
            ..Default::default()
        };
        assert_eq!(snap.validate(), Ok(()));
    }

    #[test]
    fn test_error_display() {
        let err = TuningError::NotPositive {
            name: "vehicle.mass",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "vehicle.mass must be greater than zero, got -1"
        );
    }
}
