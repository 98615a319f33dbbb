use super::collision::CollisionGroups;
use glam::Vec3;
use rapier3d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    translation: Vector<Real>,
    yaw: Real,
    linear_damping: Real,
    angular_damping: Real,
    can_sleep: bool,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            translation: Vector::zeros(),
            yaw: 0.0,
            linear_damping: 0.01,
            angular_damping: 0.01,
            can_sleep: true,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            translation: Vector::zeros(),
            yaw: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: false,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, position: Vec3) -> Self {
        self.translation = vector![position.x, position.y, position.z];
        self
    }

    /// Set the initial heading (rotation about +Y, radians)
    pub fn yaw(mut self, yaw: Real) -> Self {
        self.yaw = yaw;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .translation(self.translation)
            .rotation(vector![0.0, self.yaw, 0.0])
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .can_sleep(self.can_sleep)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    friction_combine: CoefficientCombineRule,
    restitution: Real,
    density: Option<Real>,
    mass: Option<Real>,
}

impl ColliderBuilder3D {
    /// Create a box-shaped collider from full extents
    pub fn box_shape(size: Vec3) -> Self {
        Self {
            shape: SharedShape::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            collision_groups: CollisionGroups::Barrier,
            friction: 0.5,
            friction_combine: CoefficientCombineRule::Average,
            restitution: 0.0,
            density: Some(1.0),
            mass: None,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set how this collider's friction mixes with the other contact's
    pub fn friction_combine_rule(mut self, rule: CoefficientCombineRule) -> Self {
        self.friction_combine = rule;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set mass directly (overrides density)
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self.density = None;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut builder = ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .friction_combine_rule(self.friction_combine)
            .restitution(self.restitution);

        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        } else if let Some(density) = self.density {
            builder = builder.density(density);
        }

        builder.build()
    }
}

/// Common rigid body configurations for the circuit
pub mod presets {
    use super::*;

    /// Physical description of a car chassis
    #[derive(Debug, Clone, Copy)]
    pub struct ChassisSpec {
        pub mass: Real,
        pub size: Vec3,
        pub friction: Real,
        pub restitution: Real,
    }

    /// Create a car body (dynamic, never sleeps)
    pub fn car_body(position: Vec3, yaw: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .yaw(yaw)
            .can_sleep(false)
            .build()
    }

    /// Create a car collider (box chassis).
    /// The chassis friction wins over the ground's so the force model, not
    /// contact friction, decides how the car rolls.
    pub fn car_collider(chassis: &ChassisSpec) -> Collider {
        ColliderBuilder3D::box_shape(chassis.size)
            .collision_groups(CollisionGroups::Car)
            .mass(chassis.mass)
            .friction(chassis.friction)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(chassis.restitution)
            .build()
    }

    /// Create the ground body, its top face at y = 0
    pub fn ground_body(thickness: Real) -> RigidBody {
        BodyBuilder::new_fixed()
            .position(Vec3::new(0.0, -thickness / 2.0, 0.0))
            .build()
    }

    /// Create the ground collider
    pub fn ground_collider(size: Real, thickness: Real) -> Collider {
        ColliderBuilder3D::box_shape(Vec3::new(size, thickness, size))
            .collision_groups(CollisionGroups::Ground)
            .friction(0.8)
            .restitution(0.2)
            .build()
    }

    /// Create a barrier body (fixed)
    pub fn barrier_body(position: Vec3, yaw: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(position).yaw(yaw).build()
    }

    /// Create a barrier collider
    pub fn barrier_collider(size: Vec3) -> Collider {
        ColliderBuilder3D::box_shape(size)
            .collision_groups(CollisionGroups::Barrier)
            .friction(0.3)
            .restitution(0.2)
            .build()
    }
}
