// Circular circuit
//
// A flat ground slab ringed by barriers. Grandstands and the start line are
// scenery only and never enter the physics world.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};
use log::debug;

use crate::engine::physics::{presets, PhysicsWorld};
use crate::engine::renderer::InstanceRaw;

const GROUND_COLOR: [f32; 4] = [0.0, 0.0, 0.07, 1.0];
const BARRIER_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const GRANDSTAND_COLOR: [f32; 4] = [0.12, 0.25, 0.69, 1.0];
const START_LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Dimensions of the circuit
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    /// Side length of the square ground slab
    pub ground_size: f32,
    pub ground_thickness: f32,
    pub barrier_count: usize,
    pub barrier_radius: f32,
    /// Full extents of one barrier block
    pub barrier_size: Vec3,
    /// Height of the barrier centres
    pub barrier_height: f32,
    pub grandstand_count: usize,
    pub grandstand_radius: f32,
    pub grandstand_size: Vec3,
    pub start_line: Vec3,
    pub spawn_position: Vec3,
    pub spawn_yaw: f32,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            ground_thickness: 1.0,
            barrier_count: 40,
            barrier_radius: 35.0,
            barrier_size: Vec3::new(0.5, 2.0, 6.0),
            barrier_height: 1.0,
            grandstand_count: 8,
            grandstand_radius: 60.0,
            grandstand_size: Vec3::new(20.0, 8.0, 6.0),
            start_line: Vec3::new(30.0, 0.02, 0.0),
            spawn_position: Vec3::new(30.0, 1.0, 0.0),
            spawn_yaw: 0.0,
        }
    }
}

/// Position and heading of a piece placed on a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub position: Vec3,
    pub yaw: f32,
}

/// Evenly spaced slots around a circle, starting on +X
fn ring(count: usize, radius: f32, height: f32, yaw_offset: f32) -> Vec<RingSlot> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            RingSlot {
                position: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
                yaw: angle + yaw_offset,
            }
        })
        .collect()
}

impl TrackLayout {
    pub fn barrier_slots(&self) -> Vec<RingSlot> {
        ring(
            self.barrier_count,
            self.barrier_radius,
            self.barrier_height,
            PI / 2.0,
        )
    }

    pub fn grandstand_slots(&self) -> Vec<RingSlot> {
        ring(
            self.grandstand_count,
            self.grandstand_radius,
            self.grandstand_size.y / 2.0 + 1.0,
            PI,
        )
    }

    /// Static instances: ground, barriers, grandstands and the start line
    pub fn scenery(&self) -> Vec<InstanceRaw> {
        let mut instances = Vec::with_capacity(2 + self.barrier_count + self.grandstand_count);

        instances.push(InstanceRaw::cuboid(
            Vec3::new(0.0, -self.ground_thickness / 2.0, 0.0),
            Quat::IDENTITY,
            Vec3::new(self.ground_size, self.ground_thickness, self.ground_size),
            GROUND_COLOR,
        ));
        instances.push(InstanceRaw::cuboid(
            self.start_line,
            Quat::IDENTITY,
            Vec3::new(8.0, 0.02, 2.0),
            START_LINE_COLOR,
        ));

        for slot in self.barrier_slots() {
            instances.push(InstanceRaw::cuboid(
                slot.position,
                Quat::from_rotation_y(slot.yaw),
                self.barrier_size,
                BARRIER_COLOR,
            ));
        }
        for slot in self.grandstand_slots() {
            instances.push(InstanceRaw::cuboid(
                slot.position,
                Quat::from_rotation_y(slot.yaw),
                self.grandstand_size,
                GRANDSTAND_COLOR,
            ));
        }

        instances
    }
}

/// The circuit's bodies inside a physics world
#[derive(Debug)]
pub struct Track {
    layout: TrackLayout,
    scenery: Vec<InstanceRaw>,
}

impl Track {
    /// Add the ground and barrier ring to the world
    pub fn build(world: &mut PhysicsWorld, layout: TrackLayout) -> Self {
        let ground = world.add_rigid_body(presets::ground_body(layout.ground_thickness));
        world.add_collider(
            presets::ground_collider(layout.ground_size, layout.ground_thickness),
            ground,
        );

        let slots = layout.barrier_slots();
        for slot in &slots {
            let handle = world.add_rigid_body(presets::barrier_body(slot.position, slot.yaw));
            world.add_collider(presets::barrier_collider(layout.barrier_size), handle);
        }

        debug!(
            "Track built: {} barriers at radius {}",
            slots.len(),
            layout.barrier_radius
        );

        let scenery = layout.scenery();
        Self { layout, scenery }
    }

    #[cfg(test)]
    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    /// Where the car starts: position and yaw
    pub fn spawn(&self) -> (Vec3, f32) {
        (self.layout.spawn_position, self.layout.spawn_yaw)
    }

    pub fn scenery(&self) -> &[InstanceRaw] {
        &self.scenery
    }
}
