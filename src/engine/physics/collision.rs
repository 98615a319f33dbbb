use rapier3d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Player-driven cars
    Car = 0b0000_0001,

    /// Track surface
    Ground = 0b0000_0010,

    /// Static barriers lining the circuit
    Barrier = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier3d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Cars hit the ground, barriers and each other
            CollisionGroups::Car => Group::from_bits_truncate(
                CollisionGroups::Car as u32
                    | CollisionGroups::Ground as u32
                    | CollisionGroups::Barrier as u32,
            ),

            // Static geometry only needs to stop cars
            CollisionGroups::Ground | CollisionGroups::Barrier => {
                Group::from_bits_truncate(CollisionGroups::Car as u32)
            }
        };

        InteractionGroups::new(memberships, filter)
    }
}
