// Physics system using rapier3d

pub mod body;
mod collision;
mod world;

pub use body::presets;
pub use world::{ForceSink, Kinematics, PhysicsWorld, RigidBodyHandle};

// Re-export for internal use and future expansion
#[allow(unused_imports)]
pub use body::{BodyBuilder, ColliderBuilder3D};
#[allow(unused_imports)]
pub use collision::CollisionGroups;
#[allow(unused_imports)]
pub use world::{BodyForces, ColliderHandle};
