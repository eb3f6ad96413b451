use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::interactable::Interactable;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Tag prefix used by spawn markers created from level symbols.
pub const MARKER_PREFIX: &str = "marker:";

/// Opt-in per-frame depth: `z = pos.y + offset`.
///
/// A positive offset pushes the entity in front of neighbours at the same Y
/// (the player standing on a rug), a negative one behind (a tall bookshelf
/// whose sprite origin sits above its feet).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthSort {
    pub offset: f32,
}

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not drawn or scanned).
    pub active: bool,
    /// Position in world space (Y-down).
    pub pos: Vec2,
    /// Rendered size in world units.
    pub scale: Vec2,
    /// Draw depth within the layer. Higher draws later.
    pub z: f32,
    pub layer: RenderLayer,
    /// When set, `z` is recomputed from `pos.y` every tick.
    pub depth: Option<DepthSort>,
    pub sprite: Option<SpriteComponent>,
    pub animation: Option<AnimationComponent>,
    pub interactable: Option<Interactable>,
    /// Physics body (requires the "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            z: 0.0,
            layer: RenderLayer::default(),
            depth: None,
            sprite: None,
            animation: None,
            interactable: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    /// A spawn marker: position only, tagged `marker:<name>`.
    pub fn marker(id: EntityId, name: &str, pos: Vec2) -> Self {
        let mut entity = Self::new(id).with_tag(format!("{MARKER_PREFIX}{name}")).with_pos(pos);
        entity.active = false;
        entity
    }

    /// Whether this entity is a spawn marker.
    pub fn is_marker(&self) -> bool {
        self.tag.starts_with(MARKER_PREFIX)
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Depth-sort by Y with the given offset.
    pub fn with_depth_offset(mut self, offset: f32) -> Self {
        self.depth = Some(DepthSort { offset });
        self.z = self.pos.y + offset;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_interactable(mut self, interactable: Interactable) -> Self {
        self.interactable = Some(interactable);
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_inactive_and_tagged() {
        let m = Entity::marker(EntityId(4), "cat", Vec2::new(32.0, 96.0));
        assert!(m.is_marker());
        assert!(!m.active);
        assert_eq!(m.tag, "marker:cat");
        assert!(m.sprite.is_none());
    }

    #[test]
    fn depth_offset_seeds_z() {
        let e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(0.0, 120.0))
            .with_depth_offset(-8.0);
        assert_eq!(e.depth, Some(DepthSort { offset: -8.0 }));
        assert!((e.z - 112.0).abs() < 1e-6);
    }
}
