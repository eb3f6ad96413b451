//! The room layout and the props that replace its markers.

use glam::Vec2;
use roam_engine::{
    AtlasId, BodyDesc, BuiltLevel, Cell, ColliderDesc, ColliderMaterial, Easing, EngineContext,
    Entity, EntityId, Interactable, Legend, LevelError, LevelMap, RenderLayer, SpriteComponent,
    SpriteRegistry, Tile, Tween,
};

use crate::config::{ORB_BOB, ORB_BOB_SECS, SCALE, TILE};
use crate::content::{Look, Prop, LINKS, PROPS};

/// `#` wall, `.` floor, `@` player, `c` cat, `t` table, `b` bookshelf,
/// `p` PC, `g` goldfish, `G`/`L`/`X` GitHub, LinkedIn and X orbs.
pub const ROOM_MAP: &[&str] = &[
    "####################",
    "#b....p.....g...G.L#",
    "#................X.#",
    "#..t...............#",
    "#.......c..........#",
    "#..........@.......#",
    "#...t.........t....#",
    "#..................#",
    "####################",
];

pub const PLAYER_MARKER: &str = "player";

const MARKERS: &[(char, &str)] = &[
    ('@', PLAYER_MARKER),
    ('c', "cat"),
    ('t', "table"),
    ('b', "bookshelf"),
    ('p', "pc"),
    ('g', "goldfish"),
    ('G', "github"),
    ('L', "linkedin"),
    ('X', "x"),
];

fn tile_of(registry: &SpriteRegistry, name: &str) -> (AtlasId, Tile) {
    match registry.get(name) {
        Some(sprite) => (sprite.atlas, Tile::new(sprite.col as u32, sprite.row as u32)),
        None => {
            log::warn!("room: no '{}' sprite, using cell (0, 0)", name);
            (AtlasId(0), Tile::new(0, 0))
        }
    }
}

/// The room map with its legend, tiles taken from the registry.
pub fn room_level(registry: &SpriteRegistry) -> LevelMap {
    let (atlas, floor) = tile_of(registry, "floor");
    let (_, wall) = tile_of(registry, "wall");

    let legend = MARKERS.iter().fold(
        Legend::new().with('#', Cell::Wall(wall)).with('.', Cell::Floor(floor)),
        |legend, &(symbol, name)| {
            legend.with(symbol, Cell::Marker { name: name.to_string(), floor: Some(floor) })
        },
    );

    LevelMap::new(ROOM_MAP, legend, TILE).with_atlas(atlas)
}

/// Build the room into `ctx` and replace every prop marker.
pub fn build_room(ctx: &mut EngineContext, registry: &SpriteRegistry) -> Result<BuiltLevel, LevelError> {
    let built = room_level(registry).build(ctx)?;
    for prop in PROPS {
        for pos in ctx.scene.take_markers(prop.marker) {
            spawn_prop(ctx, registry, prop, pos);
        }
    }
    Ok(built)
}

/// Spawn one interactable prop at `pos`.
pub fn spawn_prop(ctx: &mut EngineContext, registry: &SpriteRegistry, prop: &Prop, pos: Vec2) -> EntityId {
    let id = ctx.next_id();
    let mut interactable = Interactable::new(prop.name, prop.dialogue);
    if let Some(url) = prop.link.and_then(|i| LINKS.get(i)) {
        interactable = interactable.with_link(*url);
    }

    let mut entity = Entity::new(id)
        .with_tag(prop.name)
        .with_pos(pos)
        .with_scale(Vec2::splat(TILE))
        .with_layer(RenderLayer::Objects)
        .with_depth_offset(0.0)
        .with_interactable(interactable);

    match prop.look {
        Look::Furniture { sprite, hitbox_px } => {
            if let Some(sprite) = sprite_or_warn(registry, sprite) {
                entity = entity.with_sprite(sprite);
            }
            spawn_solid(ctx, entity, hitbox_px)
        }
        Look::Critter { sheet, anim, hitbox_px } => {
            match (registry.sheet_sprite(sheet, anim), registry.animation(sheet, anim)) {
                (Ok(sprite), Ok(animation)) => {
                    entity = entity.with_sprite(sprite).with_animation(animation);
                }
                (Err(err), _) | (_, Err(err)) => log::warn!("room: {}: {}", prop.name, err),
            }
            spawn_solid(ctx, entity, hitbox_px)
        }
        Look::Orb { sprite } => {
            if let Some(sprite) = sprite_or_warn(registry, sprite) {
                entity = entity.with_sprite(sprite);
            }
            ctx.scene.spawn(entity);
            ctx.tweens.add(
                id,
                Tween::position_y(pos.y, pos.y - ORB_BOB, ORB_BOB_SECS, Easing::SineInOut)
                    .ping_pong(),
            );
            id
        }
    }
}

fn sprite_or_warn(registry: &SpriteRegistry, name: &str) -> Option<SpriteComponent> {
    let sprite = registry.get(name).cloned();
    if sprite.is_none() {
        log::warn!("room: no '{}' sprite", name);
    }
    sprite
}

/// Spawn with a fixed body covering the bottom of the cell.
fn spawn_solid(ctx: &mut EngineContext, entity: Entity, hitbox_px: Vec2) -> EntityId {
    let hitbox = hitbox_px * SCALE;
    let desc = BodyDesc::fixed(ColliderDesc::rect(hitbox))
        .with_collider_offset(Vec2::new(0.0, (TILE - hitbox.y) / 2.0));
    ctx.spawn_with_body(entity, desc, ColliderMaterial::default())
}
