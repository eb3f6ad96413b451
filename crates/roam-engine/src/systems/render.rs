use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Append drawable entities to the render buffer, ordered by `(layer, z)`.
///
/// Inactive entities, spawn markers and entities without a sprite are
/// skipped. Equal keys keep iteration (spawn) order. The buffer is not
/// cleared, so background instances pushed earlier stay underneath.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    let mut drawable: Vec<(u8, f32, RenderInstance)> = entities
        .filter(|e| e.active && !e.is_marker())
        .filter_map(|entity| {
            let sprite = entity.sprite.as_ref()?;
            Some((
                entity.layer.as_u8(),
                entity.z,
                RenderInstance {
                    x: entity.pos.x,
                    y: entity.pos.y,
                    z: entity.z,
                    size: entity.scale.x,
                    col: sprite.col,
                    row: sprite.row,
                    alpha: sprite.alpha,
                    atlas: sprite.atlas.0 as f32,
                },
            ))
        })
        .collect();

    drawable.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    buffer.extend(drawable.into_iter().map(|(_, _, instance)| instance));
}
