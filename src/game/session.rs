// One race: the physics world, the car, the camera and the HUD state

use glam::Vec3;
use log::{debug, info, warn};

use crate::core::math;
use crate::core::rng::SeededRandom;
use crate::engine::input::{Action, ControlState, InputManager};
use crate::engine::physics::{presets, Kinematics, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::{InstanceRaw, Projection, RenderFrame};

use super::camera::{CameraFollower, CameraMode, FollowTarget};
use super::config::GameConfig;
use super::state::GameState;
use super::track::{Track, TrackLayout};
use super::vehicle::{DriveReport, VehicleController};

const CAR_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Owns everything that lives for the length of a race
pub struct RaceSession {
    world: PhysicsWorld,
    track: Track,
    car: Option<RigidBodyHandle>,
    car_size: Vec3,
    vehicle: VehicleController,
    camera: CameraFollower,
    projection: Projection,
    state: GameState,
    rng: SeededRandom,
    kinematics: Kinematics,
    last_drive: DriveReport,
    elapsed: f32,
}

impl RaceSession {
    pub fn new(config: &GameConfig, timestep: f32) -> Self {
        Self::with_layout(config, TrackLayout::default(), timestep)
    }

    pub fn with_layout(config: &GameConfig, layout: TrackLayout, timestep: f32) -> Self {
        let mut world = PhysicsWorld::with_settings(config.physics.gravity, timestep);
        let track = Track::build(&mut world, layout);
        let (spawn, yaw) = track.spawn();

        let chassis = config.vehicle.chassis();
        let car = world.add_rigid_body(presets::car_body(spawn, yaw));
        world.add_collider(presets::car_collider(&chassis), car);

        let kinematics = world
            .kinematics(car)
            .unwrap_or_else(|| Kinematics::at_rest(spawn, yaw));
        let camera = CameraFollower::behind(
            config.camera.clone(),
            &FollowTarget {
                position: spawn,
                yaw,
                speed: 0.0,
            },
        );

        let rng = match config.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };

        info!("Race session ready, car at {spawn}");

        Self {
            world,
            track,
            car: Some(car),
            car_size: chassis.size,
            vehicle: VehicleController::new(config.vehicle.clone()),
            camera,
            projection: Projection::default(),
            state: GameState::new(),
            rng,
            kinematics,
            last_drive: DriveReport::default(),
            elapsed: 0.0,
        }
    }

    /// One fixed step: force model, physics, kinematics pull
    pub fn tick(&mut self, controls: &ControlState) {
        let Some(car) = self.car else {
            return;
        };

        if let Some(mut forces) = self.world.body_forces(car) {
            self.last_drive =
                self.vehicle
                    .update(controls, &self.kinematics, &mut forces, &mut self.rng);
        }

        self.world.step();

        match self.world.kinematics(car) {
            Some(kinematics) if kinematics.is_finite() => self.kinematics = kinematics,
            Some(kinematics) => warn!("Ignoring non-finite car state: {kinematics:?}"),
            None => warn!("Car body missing from the physics world"),
        }

        self.elapsed += self.world.timestep();
        self.state.update_speed(self.last_drive.display_speed);
        self.state.update_time(self.elapsed);
    }

    /// Once per rendered frame: meta keys and the camera.
    /// The camera holds its pose while the race is paused.
    pub fn frame(&mut self, input: &InputManager, dt: f32) {
        if input.just_pressed(Action::Restart) {
            self.restart();
        }

        if !self.state.is_playing {
            return;
        }

        if input.just_pressed(Action::CameraCycle) {
            self.camera.cycle();
        }

        if self.camera.mode() == CameraMode::FreeRoam {
            let (horizontal, vertical) = input.look_axis();
            self.camera.free_look(horizontal, vertical, dt);
        }

        let target = self.follow_target();
        self.camera.update(&target, dt, &mut self.rng);
    }

    fn follow_target(&self) -> FollowTarget {
        FollowTarget {
            position: self.kinematics.position,
            yaw: self.kinematics.yaw(),
            speed: math::horizontal_speed(self.kinematics.velocity),
        }
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    /// Follow the game loop's pause flag
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.state.pause();
        } else {
            self.state.start();
        }
    }

    /// Put the car back on the start line and clear the HUD.
    /// A running race keeps running.
    pub fn restart(&mut self) {
        let was_playing = self.state.is_playing;
        let (spawn, yaw) = self.track.spawn();
        if let Some(car) = self.car {
            self.world.reset_body(car, spawn, yaw);
        }
        self.kinematics = Kinematics::at_rest(spawn, yaw);
        self.last_drive = DriveReport::default();
        self.elapsed = 0.0;
        self.state.reset();
        if was_playing {
            self.state.start();
        }
        debug!("Race restarted");
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Camera uniform plus every box in the scene
    pub fn render_frame(&self) -> RenderFrame {
        let mut instances = self.track.scenery().to_vec();
        if self.car.is_some() {
            instances.push(InstanceRaw::cuboid(
                self.kinematics.position,
                self.kinematics.rotation,
                self.car_size,
                CAR_COLOR,
            ));
        }

        RenderFrame {
            camera: self.camera.current().uniform(&self.projection),
            instances,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn camera(&self) -> &CameraFollower {
        &self.camera
    }

    #[cfg(test)]
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    #[cfg(test)]
    pub fn last_drive(&self) -> &DriveReport {
        &self.last_drive
    }

    #[cfg(test)]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    #[cfg(test)]
    pub fn car(&self) -> Option<RigidBodyHandle> {
        self.car
    }

    /// Remove the car from the world; safe to call more than once
    pub fn teardown(&mut self) {
        if let Some(car) = self.car.take() {
            self.world.remove_rigid_body(car);
            debug!("Car removed from the physics world");
        }
    }
}

impl Drop for RaceSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
