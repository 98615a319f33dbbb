// Camera follower
//
// Computes a target pose from the car each frame and eases the current pose
// towards it with a per-frame lerp.

use glam::Vec3;
use log::info;

use crate::core::math;
use crate::core::rng::RandomSource;
use crate::engine::renderer::{CameraUniform, Projection};

use super::tuning::CameraTuning;

const COCKPIT_EYE_HEIGHT: f32 = 0.6;
const COCKPIT_LOOK_DISTANCE: f32 = 20.0;
const COCKPIT_SMOOTHING: f32 = 0.5;

/// Lowest the free-roam camera may drop relative to the car
const FREE_MIN_HEIGHT: f32 = 1.0;
const FREE_MAX_HEIGHT: f32 = 30.0;

/// Camera behaviour, cycled with the camera key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Chase,
    Cinematic,
    Cockpit,
    FreeRoam,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            Self::Chase => Self::Cinematic,
            Self::Cinematic => Self::Cockpit,
            Self::Cockpit => Self::FreeRoam,
            Self::FreeRoam => Self::Chase,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Chase => "chase",
            Self::Cinematic => "cinematic",
            Self::Cockpit => "cockpit",
            Self::FreeRoam => "free",
        }
    }
}

/// What the camera follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTarget {
    pub position: Vec3,
    pub yaw: f32,
    /// Horizontal speed in m/s
    pub speed: f32,
}

/// Eye position and look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Blend both points towards `target` by `factor`
    pub fn lerp(&self, target: &CameraPose, factor: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(target.position, factor),
            look_at: self.look_at.lerp(target.look_at, factor),
        }
    }

    pub fn uniform(&self, projection: &Projection) -> CameraUniform {
        CameraUniform::look_at(self.position, self.look_at, projection)
    }
}

/// Smoothed chase camera with alternate modes
#[derive(Debug, Clone)]
pub struct CameraFollower {
    tuning: CameraTuning,
    mode: CameraMode,
    current: CameraPose,
    target: CameraPose,
    orbit_angle: f32,
    free_yaw: f32,
    free_height: f32,
}

impl CameraFollower {
    pub fn new(tuning: CameraTuning, initial: CameraPose) -> Self {
        let free_height = tuning.height;
        Self {
            tuning,
            mode: CameraMode::default(),
            current: initial,
            target: initial,
            orbit_angle: 0.0,
            free_yaw: 0.0,
            free_height,
        }
    }

    /// Start already settled behind the car
    pub fn behind(tuning: CameraTuning, car: &FollowTarget) -> Self {
        let mut follower = Self::new(tuning, CameraPose::new(Vec3::ZERO, Vec3::ZERO));
        let pose = follower.chase_target(car);
        follower.current = pose;
        follower.target = pose;
        follower
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            info!("Camera mode: {}", mode.label());
            self.mode = mode;
        }
    }

    /// Advance to the next mode
    pub fn cycle(&mut self) -> CameraMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    pub fn current(&self) -> &CameraPose {
        &self.current
    }

    #[cfg(test)]
    pub fn target(&self) -> &CameraPose {
        &self.target
    }

    /// Fraction of full-speed framing in [0, 1]
    fn speed_ratio(&self, speed: f32) -> f32 {
        (speed / self.tuning.speed_reference).clamp(0.0, 1.0)
    }

    /// Lerp factor for the chase and free modes, snappier at speed
    pub fn smoothing_factor(&self, speed: f32) -> f32 {
        (self.tuning.smoothing + self.speed_ratio(speed) * self.tuning.smoothing_boost)
            .clamp(0.0, 1.0)
    }

    /// Chase pose: behind and above the car, closer and lower at speed
    pub fn chase_target(&self, car: &FollowTarget) -> CameraPose {
        let t = &self.tuning;
        let ratio = self.speed_ratio(car.speed);
        let forward = math::forward_from_yaw(car.yaw);

        let distance = math::lerp(t.distance, t.distance_at_speed, ratio);
        let height = math::lerp(t.height, t.height_at_speed, ratio);
        let look_ahead = t.look_ahead + car.speed.max(0.0) * t.look_ahead_per_speed;

        CameraPose {
            position: car.position - forward * distance + Vec3::Y * height,
            look_at: car.position + forward * look_ahead + Vec3::Y * t.look_height,
        }
    }

    fn cinematic_target(&self, car: &FollowTarget) -> CameraPose {
        let t = &self.tuning;
        let offset = Vec3::new(
            self.orbit_angle.cos() * t.orbit_radius,
            t.orbit_height,
            self.orbit_angle.sin() * t.orbit_radius,
        );
        CameraPose {
            position: car.position + offset,
            look_at: car.position + Vec3::Y * t.look_height,
        }
    }

    fn cockpit_target(&self, car: &FollowTarget) -> CameraPose {
        let forward = math::forward_from_yaw(car.yaw);
        let eye = car.position + Vec3::Y * COCKPIT_EYE_HEIGHT;
        CameraPose {
            position: eye,
            look_at: eye + forward * COCKPIT_LOOK_DISTANCE,
        }
    }

    fn free_target(&self, car: &FollowTarget) -> CameraPose {
        let t = &self.tuning;
        let forward = math::forward_from_yaw(car.yaw + self.free_yaw);
        CameraPose {
            position: car.position - forward * t.distance + Vec3::Y * self.free_height,
            look_at: car.position + Vec3::Y * t.look_height,
        }
    }

    /// Steer the free-roam offset; axes in -1.0..=1.0
    pub fn free_look(&mut self, horizontal: f32, vertical: f32, dt: f32) {
        self.free_yaw += horizontal * self.tuning.free_look_rate * dt;
        self.free_height = (self.free_height + vertical * self.tuning.free_height_rate * dt)
            .clamp(FREE_MIN_HEIGHT, FREE_MAX_HEIGHT);
    }

    /// Random offset applied to the target eye above the shake speed
    fn shake_offset(&self, speed: f32, rng: &mut impl RandomSource) -> Vec3 {
        let t = &self.tuning;
        if speed <= t.shake_min_speed || t.shake_intensity == 0.0 {
            return Vec3::ZERO;
        }
        let excess = if t.shake_min_speed > 0.0 {
            ((speed - t.shake_min_speed) / t.shake_min_speed).min(1.0)
        } else {
            1.0
        };
        let jitter = Vec3::new(rng.signed_unit(), rng.signed_unit(), rng.signed_unit());
        jitter * t.shake_intensity * excess
    }

    /// Compute this frame's target and ease the current pose towards it
    pub fn update(
        &mut self,
        car: &FollowTarget,
        dt: f32,
        rng: &mut impl RandomSource,
    ) -> CameraPose {
        let (mut target, factor) = match self.mode {
            CameraMode::Chase => (self.chase_target(car), self.smoothing_factor(car.speed)),
            CameraMode::Cinematic => {
                self.orbit_angle += self.tuning.orbit_speed * dt;
                (self.cinematic_target(car), self.tuning.smoothing)
            }
            CameraMode::Cockpit => (self.cockpit_target(car), COCKPIT_SMOOTHING),
            CameraMode::FreeRoam => (self.free_target(car), self.smoothing_factor(car.speed)),
        };

        // The cockpit eye is fixed to the car body
        if self.mode != CameraMode::Cockpit {
            target.position += self.shake_offset(car.speed, rng);
        }

        self.target = target;
        self.current = self.current.lerp(&target, factor);
        self.current
    }
}
