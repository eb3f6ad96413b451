//! Rapier2D behind a small top-down API.
//!
//! A room has two kinds of bodies: fixed boxes (wall runs, furniture) and
//! walkers that are driven by setting their velocity every tick and get
//! pushed back out of anything fixed. Gravity never applies to walkers.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;

fn to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn from_na(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Velocity-driven; collisions resolve against fixed bodies.
    Dynamic,
    Fixed,
}

/// An axis-aligned box collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderDesc {
    pub half_extents: Vec2,
}

impl ColliderDesc {
    /// A box of the given full size.
    pub fn rect(size: Vec2) -> Self {
        Self { half_extents: size / 2.0 }
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// Frictionless, so a walker slides along a wall it presses into.
    pub fn slippery() -> Self {
        Self { friction: 0.0, ..Self::default() }
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self { friction: 0.5, density: 1.0 }
    }
}

/// Everything needed to create one body with one collider.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    /// Collider centre relative to the body, for hitboxes that only cover
    /// the bottom of a sprite.
    pub collider_offset: Vec2,
    pub collider: ColliderDesc,
}

impl BodyDesc {
    pub fn walker(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            collider_offset: Vec2::ZERO,
            collider,
        }
    }

    pub fn fixed(collider: ColliderDesc) -> Self {
        Self { body_type: BodyType::Fixed, ..Self::walker(collider) }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_collider_offset(mut self, offset: Vec2) -> Self {
        self.collider_offset = offset;
        self
    }
}

/// Rapier handles kept on the owning entity.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// All Rapier2D state for one room.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    // Always empty; Rapier's step and removal still take them.
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: to_na(gravity),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.params.dt = dt;
    }

    /// Create a body and its collider. The owning entity id is kept in the
    /// body's `user_data`.
    pub fn create_body(
        &mut self,
        owner: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let builder = match desc.body_type {
            BodyType::Dynamic => RigidBodyBuilder::dynamic()
                .gravity_scale(0.0)
                .lock_rotations(),
            BodyType::Fixed => RigidBodyBuilder::fixed(),
        };
        let body_handle = self.bodies.insert(
            builder
                .translation(to_na(desc.position))
                .user_data(owner.0 as u128)
                .build(),
        );

        let half = desc.collider.half_extents;
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .translation(to_na(desc.collider_offset))
            .friction(material.friction)
            .density(material.density)
            .restitution(0.0)
            .build();
        let collider_handle =
            self.colliders.insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody { body_handle, collider_handle }
    }

    /// Remove a body together with its collider.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation by one `dt`.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(to_na(vel), true);
        }
    }

    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map_or(Vec2::ZERO, |rb| from_na(rb.linvel()))
    }

    /// Teleport a body and stop it.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(to_na(pos), true);
            rb.set_linvel(nalgebra::Vector2::zeros(), true);
        }
    }

    pub fn body_position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map_or(Vec2::ZERO, |rb| from_na(rb.translation()))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The box a body collides with, if it still exists.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let cuboid = self.colliders.get(body.collider_handle)?.shape().as_cuboid()?;
        Some(ColliderDesc { half_extents: from_na(&cuboid.half_extents) })
    }
}
