//! The walking player: facing, animation and velocity.

use glam::Vec2;
use roam_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, RenderLayer,
    SpriteRegistry,
};

use crate::config::{DIAGONAL_FACTOR, PLAYER_HITBOX_PX, PLAYER_SPEED, SCALE, TILE};

pub const PLAYER_TAG: &str = "player";
pub const PLAYER_SHEET: &str = "player";

/// One of the eight walk directions on the player sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Down,
    LeftDown,
    Left,
    LeftUp,
    Up,
    RightUp,
    Right,
    RightDown,
}

impl Facing {
    /// Walk animation name on the player sheet.
    pub fn walk(self) -> &'static str {
        match self {
            Facing::Down => "walk-down",
            Facing::LeftDown => "walk-left-down",
            Facing::Left => "walk-left",
            Facing::LeftUp => "walk-left-up",
            Facing::Up => "walk-up",
            Facing::RightUp => "walk-right-up",
            Facing::Right => "walk-right",
            Facing::RightDown => "walk-right-down",
        }
    }

    /// Still pose for this direction.
    pub fn idle(self) -> &'static str {
        match self {
            Facing::Down => "walk-down-idle",
            Facing::LeftDown => "walk-left-down-idle",
            Facing::Left => "walk-left-idle",
            Facing::LeftUp => "walk-left-up-idle",
            Facing::Up => "walk-up-idle",
            Facing::RightUp => "walk-right-up-idle",
            Facing::Right => "walk-right-idle",
            Facing::RightDown => "walk-right-down-idle",
        }
    }
}

/// Name the direction of a unit vector (Y-down).
///
/// Mostly horizontal (`|y| < 0.5`) is left/right, mostly vertical
/// (`|y| > 0.8`) is up/down, in between is a diagonal. Values exactly on a
/// threshold, and the zero vector, keep `previous`.
pub fn facing_for(dir: Vec2, previous: Facing) -> Facing {
    let ay = dir.y.abs();
    let up = dir.y < 0.0;

    if ay < 0.5 {
        if dir.x > 0.0 {
            Facing::Right
        } else if dir.x < 0.0 {
            Facing::Left
        } else {
            previous
        }
    } else if ay > 0.8 {
        if up {
            Facing::Up
        } else {
            Facing::Down
        }
    } else if ay > 0.5 && ay < 0.8 {
        match (dir.x > 0.0, dir.x < 0.0, up) {
            (true, _, true) => Facing::RightUp,
            (true, _, false) => Facing::RightDown,
            (_, true, true) => Facing::LeftUp,
            (_, true, false) => Facing::LeftDown,
            _ => previous,
        }
    } else {
        previous
    }
}

/// Where this tick's movement comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    Still,
    /// Unit vector toward the held pointer.
    Pointer(Vec2),
    /// Raw arrow/WASD axis, each component in {-1, 0, 1}.
    Keys(Vec2),
}

impl Steering {
    /// Direction used to pick the facing (unit length or zero).
    pub fn direction(self) -> Vec2 {
        match self {
            Steering::Still => Vec2::ZERO,
            Steering::Pointer(dir) => dir,
            Steering::Keys(axis) => axis.normalize_or_zero(),
        }
    }

    /// Velocity in world units per second.
    pub fn velocity(self) -> Vec2 {
        match self {
            Steering::Still => Vec2::ZERO,
            Steering::Pointer(dir) => dir * PLAYER_SPEED,
            Steering::Keys(axis) => {
                let factor = if axis.x != 0.0 && axis.y != 0.0 {
                    DIAGONAL_FACTOR
                } else {
                    1.0
                };
                axis * PLAYER_SPEED * factor
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    facing: Facing,
}

impl Player {
    /// Spawn the player at `pos`, facing down and idle.
    pub fn spawn(ctx: &mut EngineContext, registry: &SpriteRegistry, pos: Vec2) -> Self {
        let facing = Facing::Down;
        let id = ctx.next_id();
        let mut entity = Entity::new(id)
            .with_tag(PLAYER_TAG)
            .with_pos(pos)
            .with_scale(Vec2::splat(TILE))
            .with_layer(RenderLayer::Objects)
            .with_depth_offset(0.0);

        match (
            registry.sheet_sprite(PLAYER_SHEET, facing.idle()),
            registry.animation(PLAYER_SHEET, facing.idle()),
        ) {
            (Ok(sprite), Ok(animation)) => {
                entity = entity.with_sprite(sprite).with_animation(animation);
            }
            (Err(err), _) | (_, Err(err)) => log::error!("player has no sprite: {}", err),
        }

        // The hitbox covers the feet, at the bottom of the sprite cell.
        let hitbox = PLAYER_HITBOX_PX * SCALE;
        let desc = BodyDesc::walker(ColliderDesc::rect(hitbox))
            .with_collider_offset(Vec2::new(0.0, (TILE - hitbox.y) / 2.0));
        ctx.spawn_with_body(entity, desc, ColliderMaterial::slippery());

        Self { id, facing }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn position(&self, ctx: &EngineContext) -> Option<Vec2> {
        ctx.scene.get(self.id).map(|e| e.pos)
    }

    /// Apply this tick's steering: velocity, facing and animation.
    pub fn steer(&mut self, ctx: &mut EngineContext, steering: Steering) {
        ctx.set_velocity(self.id, steering.velocity());

        let dir = steering.direction();
        let Some(anim) = ctx.scene.get_mut(self.id).and_then(|e| e.animation.as_mut()) else {
            return;
        };

        if dir == Vec2::ZERO {
            if !anim.current_name().ends_with("-idle") {
                anim.play(self.facing.idle());
            }
            return;
        }

        self.facing = facing_for(dir, self.facing);
        anim.play_if_different(self.facing.walk());
    }
}
