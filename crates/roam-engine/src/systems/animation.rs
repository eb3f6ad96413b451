//! Animation system: ticks animations and updates sprite frames.

use crate::core::scene::Scene;

/// Tick all entity animations and copy the current frame cell into the sprite.
///
/// Call this once per tick before rendering.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        if let Some(ref mut anim) = entity.animation {
            anim.tick(dt);

            if let Some((col, row)) = anim.current_frame() {
                if let Some(ref mut sprite) = entity.sprite {
                    sprite.col = col;
                    sprite.row = row;
                }
            }
        }
    }
}
