use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::core::math;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier3d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier3d::prelude::ColliderHandle;

/// Kinematic state of a body, pulled after each physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
}

impl Kinematics {
    /// A body at rest at the given pose
    pub fn at_rest(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Euler angles: x = pitch, y = yaw, z = roll
    pub fn euler(&self) -> Vec3 {
        math::euler_angles(self.rotation)
    }

    pub fn yaw(&self) -> f32 {
        self.euler().y
    }

    /// Check that the physics engine returned usable numbers
    pub fn is_finite(&self) -> bool {
        math::is_finite(self.position)
            && math::is_finite(self.velocity)
            && self.rotation.is_finite()
    }
}

/// Destination for the forces and torques a controller emits each tick.
/// Forces are world-space and act through the centre of mass.
pub trait ForceSink {
    fn apply_force(&mut self, force: Vec3);
    fn apply_torque(&mut self, torque: Vec3);
}

/// Force sink writing into a rapier rigid body
pub struct BodyForces<'a> {
    body: &'a mut RigidBody,
}

impl ForceSink for BodyForces<'_> {
    fn apply_force(&mut self, force: Vec3) {
        self.body.add_force(vector![force.x, force.y, force.z], true);
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.body.add_torque(vector![torque.x, torque.y, torque.z], true);
    }
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline kept in sync by each step
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world with custom vertical gravity and timestep
    pub fn with_settings(gravity_y: Real, dt: Real) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        Self {
            gravity: vector![0.0, gravity_y, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Pull the kinematic state of a body
    pub fn kinematics(&self, handle: RigidBodyHandle) -> Option<Kinematics> {
        let body = self.rigid_body_set.get(handle)?;
        let position = body.translation();
        let velocity = body.linvel();
        let rotation = body.rotation().coords;

        Some(Kinematics {
            position: Vec3::new(position.x, position.y, position.z),
            velocity: Vec3::new(velocity.x, velocity.y, velocity.z),
            rotation: Quat::from_xyzw(rotation.x, rotation.y, rotation.z, rotation.w),
        })
    }

    /// Force sink for a body with last tick's forces and torques cleared.
    ///
    /// Rapier keeps user forces until reset, so every tick starts from zero.
    pub fn body_forces(&mut self, handle: RigidBodyHandle) -> Option<BodyForces<'_>> {
        let body = self.rigid_body_set.get_mut(handle)?;
        body.reset_forces(true);
        body.reset_torques(true);
        Some(BodyForces { body })
    }

    /// Teleport a body and zero its velocities
    pub fn reset_body(&mut self, handle: RigidBodyHandle, position: Vec3, yaw: Real) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let pose = Isometry::new(
                vector![position.x, position.y, position.z],
                vector![0.0, yaw, 0.0],
            );
            body.set_position(pose, true);
            body.set_linvel(Vector::zeros(), true);
            body.set_angvel(Vector::zeros(), true);
            body.reset_forces(true);
            body.reset_torques(true);
        }
    }

    /// Number of rigid bodies in the world
    #[cfg(test)]
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Number of colliders in the world
    #[cfg(test)]
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}
