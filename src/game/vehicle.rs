// Vehicle force model
//
// Turns the control snapshot and the car's current kinematics into forces and
// torques every tick. The rules are arcade heuristics, not a tyre model.

use glam::Vec3;
use log::{trace, warn};

use crate::core::math;
use crate::core::rng::RandomSource;
use crate::engine::input::ControlState;
use crate::engine::physics::{ForceSink, Kinematics};

use super::tuning::VehicleTuning;

/// What one tick of the force model produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveReport {
    /// Horizontal speed in m/s
    pub speed: f32,
    /// Speed for the HUD in km/h
    pub display_speed: u32,
    pub drifting: bool,
    pub spinning_out: bool,
}

/// Applies driving forces to one car body
#[derive(Debug, Clone)]
pub struct VehicleController {
    tuning: VehicleTuning,
}

impl VehicleController {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self { tuning }
    }

    /// Yaw torque magnitude for the current speed.
    ///
    /// Grows linearly up to `steer_full_speed`, then stays constant, so a
    /// stationary car cannot spin on the spot.
    pub fn steering_torque(&self, speed: f32) -> f32 {
        if speed <= self.tuning.steer_min_speed {
            return 0.0;
        }
        let authority = (speed / self.tuning.steer_full_speed).min(1.0);
        self.tuning.steer_torque * authority
    }

    /// Magnitude of the resistance force opposing motion
    pub fn resistance(&self, speed: f32, handbrake: bool) -> f32 {
        let drag = if handbrake {
            self.tuning.air_drag * self.tuning.handbrake_drag_multiplier
        } else {
            self.tuning.air_drag
        };
        drag * speed * speed + self.tuning.rolling_resistance * speed
    }

    /// Whether the drift side force applies
    pub fn drift_active(&self, controls: &ControlState, speed: f32) -> bool {
        controls.drift && controls.steer() != 0.0 && speed > self.tuning.drift_min_speed
    }

    /// Run the force model for one tick
    pub fn update(
        &self,
        controls: &ControlState,
        kinematics: &Kinematics,
        forces: &mut impl ForceSink,
        rng: &mut impl RandomSource,
    ) -> DriveReport {
        if !kinematics.is_finite() {
            warn!("Skipping vehicle update, non-finite kinematics: {kinematics:?}");
            return DriveReport::default();
        }

        let tuning = &self.tuning;
        let velocity = math::horizontal(kinematics.velocity);
        let speed = math::horizontal_speed(kinematics.velocity);
        let euler = kinematics.euler();
        let forward = math::forward_from_yaw(euler.y);
        let right = math::right_from_yaw(euler.y);
        let steer = controls.steer();

        let mut report = DriveReport {
            speed,
            display_speed: math::display_speed_kmh(speed),
            ..Default::default()
        };

        if controls.forward && speed < tuning.max_speed {
            forces.apply_force(forward * tuning.engine_force);
        }

        if controls.backward {
            if velocity.dot(forward) > tuning.brake_min_speed {
                forces.apply_force(-forward * tuning.brake_force);
            } else {
                forces.apply_force(-forward * tuning.reverse_force);
            }
        }

        if steer != 0.0 {
            let torque = self.steering_torque(speed);
            if torque > 0.0 {
                forces.apply_torque(Vec3::Y * steer * torque);
            }
        }

        if self.drift_active(controls, speed) {
            // Tail slides away from the turn
            forces.apply_force(right * steer * tuning.drift_force);
            report.drifting = true;
        }

        let against_motion = -velocity.normalize_or_zero();

        if controls.handbrake && speed > 0.0 {
            forces.apply_force(against_motion * tuning.handbrake_force);
            if speed > tuning.spin_min_speed {
                let spin = rng.signed_unit() * tuning.spin_torque;
                forces.apply_torque(Vec3::new(0.0, spin, 0.0));
                report.spinning_out = true;
            }
        }

        if speed > tuning.resistance_min_speed {
            let magnitude = self.resistance(speed, controls.handbrake);
            forces.apply_force(against_motion * magnitude);
        }

        // Anti-tip: push pitch and roll back towards level
        if euler.x.abs() > tuning.stabilize_threshold || euler.z.abs() > tuning.stabilize_threshold
        {
            forces.apply_torque(Vec3::new(
                -euler.x * tuning.stabilize_torque,
                0.0,
                -euler.z * tuning.stabilize_torque,
            ));
        }

        trace!(
            "speed={:.2} m/s ({} km/h) steer={} drift={} spin={}",
            report.speed,
            report.display_speed,
            steer,
            report.drifting,
            report.spinning_out
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::FixedRandom;
    use approx::assert_relative_eq;
    use glam::Quat;

    /// Records every submission in order
    #[derive(Debug, Default)]
    struct RecordedForces {
        pub forces: Vec<Vec3>,
        pub torques: Vec<Vec3>,
    }

    impl ForceSink for RecordedForces {
        fn apply_force(&mut self, force: Vec3) {
            self.forces.push(force);
        }

        fn apply_torque(&mut self, torque: Vec3) {
            self.torques.push(torque);
        }
    }

    impl RecordedForces {
        fn total_torque(&self) -> Vec3 {
            self.torques.iter().copied().sum()
        }
    }

    fn moving(velocity: Vec3) -> Kinematics {
        Kinematics {
            position: Vec3::new(0.0, 1.0, 0.0),
            velocity,
            rotation: Quat::IDENTITY,
        }
    }

    fn run(controls: ControlState, kinematics: Kinematics) -> (RecordedForces, DriveReport) {
        let controller = VehicleController::new(VehicleTuning::default());
        let mut forces = RecordedForces::default();
        let report = controller.update(&controls, &kinematics, &mut forces, &mut FixedRandom(0.5));
        (forces, report)
    }

    #[test]
    fn test_forward_from_rest() {
        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let (forces, report) = run(controls, moving(Vec3::ZERO));
        let tuning = VehicleTuning::default();

        assert_eq!(forces.forces.len(), 1);
        assert_relative_eq!(forces.forces[0], Vec3::NEG_Z * tuning.engine_force);
        assert!(forces.torques.is_empty());
        assert_eq!(report.display_speed, 0);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let yaw = 0.8;
        let kinematics = Kinematics::at_rest(Vec3::ZERO, yaw);
        let (forces, _) = run(controls, kinematics);

        let expected = Quat::from_rotation_y(yaw) * Vec3::NEG_Z * VehicleTuning::default().engine_force;
        assert_relative_eq!(forces.forces[0], expected, epsilon = 1e-2);
    }

    #[test]
    fn test_no_engine_force_at_max_speed() {
        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let max = VehicleTuning::default().max_speed;
        let (forces, _) = run(controls, moving(Vec3::new(0.0, 0.0, -max)));

        // Only resistance remains, and it points backwards
        assert_eq!(forces.forces.len(), 1);
        assert!(forces.forces[0].z > 0.0);
    }

    #[test]
    fn test_idle_at_rest_submits_nothing() {
        let (forces, report) = run(ControlState::default(), moving(Vec3::ZERO));

        assert!(forces.forces.is_empty());
        assert!(forces.torques.is_empty());
        assert_eq!(report, DriveReport::default());
    }

    #[test]
    fn test_reported_speed() {
        let (_, report) = run(ControlState::default(), moving(Vec3::new(3.0, -20.0, 4.0)));

        assert_relative_eq!(report.speed, 5.0);
        assert_eq!(report.display_speed, 18);
    }

    #[test]
    fn test_backward_brakes_when_moving_forward() {
        let controls = ControlState {
            backward: true,
            ..Default::default()
        };
        let (forces, _) = run(controls, moving(Vec3::new(0.0, 0.0, -10.0)));
        let tuning = VehicleTuning::default();

        assert_relative_eq!(forces.forces[0], Vec3::Z * tuning.brake_force);
    }

    #[test]
    fn test_backward_reverses_when_slow() {
        let controls = ControlState {
            backward: true,
            ..Default::default()
        };
        let (forces, _) = run(controls, moving(Vec3::ZERO));
        let tuning = VehicleTuning::default();

        assert_eq!(forces.forces.len(), 1);
        assert_relative_eq!(forces.forces[0], Vec3::Z * tuning.reverse_force);
    }

    #[test]
    fn test_backward_keeps_reversing_when_already_reversing() {
        let controls = ControlState {
            backward: true,
            ..Default::default()
        };
        let (forces, _) = run(controls, moving(Vec3::new(0.0, 0.0, 8.0)));

        assert_relative_eq!(
            forces.forces[0],
            Vec3::Z * VehicleTuning::default().reverse_force
        );
    }

    #[test]
    fn test_no_steering_at_standstill() {
        let controls = ControlState {
            left: true,
            ..Default::default()
        };
        let (forces, _) = run(controls, moving(Vec3::ZERO));

        assert!(forces.torques.is_empty());
    }

    #[test]
    fn test_steering_direction() {
        let velocity = Vec3::new(0.0, 0.0, -10.0);
        let left = ControlState {
            left: true,
            ..Default::default()
        };
        let right = ControlState {
            right: true,
            ..Default::default()
        };

        let (left_forces, _) = run(left, moving(velocity));
        let (right_forces, _) = run(right, moving(velocity));

        assert!(left_forces.total_torque().y > 0.0);
        assert!(right_forces.total_torque().y < 0.0);
        assert_relative_eq!(left_forces.total_torque().y, -right_forces.total_torque().y);
    }

    #[test]
    fn test_both_steering_keys_cancel() {
        let controls = ControlState {
            left: true,
            right: true,
            drift: true,
            ..Default::default()
        };
        let (forces, report) = run(controls, moving(Vec3::new(0.0, 0.0, -10.0)));

        assert!(forces.torques.is_empty());
        assert!(!report.drifting);
    }

    #[test]
    fn test_steering_torque_monotone_and_saturating() {
        let controller = VehicleController::new(VehicleTuning::default());
        let tuning = VehicleTuning::default();

        let mut previous = 0.0;
        for i in 0..=400 {
            let speed = i as f32 * 0.1;
            let torque = controller.steering_torque(speed);
            assert!(torque >= previous, "torque dropped at {speed} m/s");
            assert!(torque <= tuning.steer_torque);
            previous = torque;
        }

        assert_relative_eq!(controller.steering_torque(tuning.steer_full_speed), tuning.steer_torque);
        assert_relative_eq!(controller.steering_torque(tuning.steer_full_speed * 2.0), tuning.steer_torque);
        assert_eq!(controller.steering_torque(tuning.steer_min_speed), 0.0);
    }

    #[test]
    fn test_drift_requires_all_conditions() {
        let controller = VehicleController::new(VehicleTuning::default());
        let threshold = VehicleTuning::default().drift_min_speed;
        let drift_left = ControlState {
            drift: true,
            left: true,
            ..Default::default()
        };
        let drift_only = ControlState {
            drift: true,
            ..Default::default()
        };
        let steer_only = ControlState {
            right: true,
            ..Default::default()
        };

        assert!(controller.drift_active(&drift_left, threshold + 0.01));
        assert!(!controller.drift_active(&drift_left, threshold));
        assert!(!controller.drift_active(&drift_left, threshold - 1.0));
        assert!(!controller.drift_active(&drift_only, threshold + 10.0));
        assert!(!controller.drift_active(&steer_only, threshold + 10.0));
    }

    #[test]
    fn test_drift_pushes_sideways() {
        let controls = ControlState {
            drift: true,
            left: true,
            ..Default::default()
        };
        let (forces, report) = run(controls, moving(Vec3::new(0.0, 0.0, -10.0)));
        let tuning = VehicleTuning::default();

        assert!(report.drifting);
        assert!(forces
            .forces
            .iter()
            .any(|f| (*f - Vec3::X * tuning.drift_force).length() < 1e-3));
    }

    #[test]
    fn test_handbrake_opposes_velocity() {
        let controls = ControlState {
            handbrake: true,
            ..Default::default()
        };
        let velocity = Vec3::new(10.0, 0.0, 5.0);
        let (forces, report) = run(controls, moving(velocity));
        let tuning = VehicleTuning::default();

        assert!(!forces.forces.is_empty());
        for force in &forces.forces {
            // Antiparallel: zero cross product, negative dot product
            assert!(force.cross(velocity).length() < 1e-2);
            assert!(force.dot(velocity) < 0.0);
        }
        assert_relative_eq!(forces.forces[0].length(), tuning.handbrake_force, epsilon = 1e-2);

        assert!(report.spinning_out);
        assert_eq!(forces.torques.len(), 1);
        assert_relative_eq!(forces.torques[0].y, 0.5 * tuning.spin_torque);
    }

    #[test]
    fn test_handbrake_no_spin_when_slow() {
        let controls = ControlState {
            handbrake: true,
            ..Default::default()
        };
        let (forces, report) = run(controls, moving(Vec3::new(1.0, 0.0, 0.0)));

        assert!(!report.spinning_out);
        assert!(forces.torques.is_empty());
    }

    #[test]
    fn test_handbrake_increases_drag() {
        let controller = VehicleController::new(VehicleTuning::default());

        assert!(controller.resistance(20.0, true) > controller.resistance(20.0, false));
        assert_eq!(controller.resistance(0.0, true), 0.0);
    }

    #[test]
    fn test_resistance_opposes_velocity() {
        let controller = VehicleController::new(VehicleTuning::default());
        let velocities = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-3.0, 2.0, 7.0),
            Vec3::new(0.2, -5.0, -0.1),
            Vec3::new(-25.0, 0.0, -25.0),
        ];

        for velocity in velocities {
            let mut forces = RecordedForces::default();
            controller.update(
                &ControlState::default(),
                &moving(velocity),
                &mut forces,
                &mut FixedRandom(0.0),
            );

            assert_eq!(forces.forces.len(), 1);
            assert!(forces.forces[0].dot(velocity) <= 0.0);
        }
    }

    #[test]
    fn test_stabilizer_counters_roll() {
        let kinematics = Kinematics {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Quat::from_rotation_z(0.4),
        };
        let (forces, _) = run(ControlState::default(), kinematics);

        assert_eq!(forces.torques.len(), 1);
        assert!(forces.torques[0].z < 0.0);
        assert_relative_eq!(forces.torques[0].y, 0.0);
    }

    #[test]
    fn test_stabilizer_ignores_small_tilt() {
        let kinematics = Kinematics {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Quat::from_rotation_x(0.05),
        };
        let (forces, _) = run(ControlState::default(), kinematics);

        assert!(forces.torques.is_empty());
    }

    #[test]
    fn test_non_finite_kinematics_skipped() {
        let controls = ControlState {
            forward: true,
            handbrake: true,
            ..Default::default()
        };
        let (forces, report) = run(controls, moving(Vec3::new(f32::NAN, 0.0, 1.0)));

        assert!(forces.forces.is_empty());
        assert!(forces.torques.is_empty());
        assert_eq!(report.display_speed, 0);
    }
}
