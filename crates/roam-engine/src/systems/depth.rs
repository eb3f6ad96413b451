use crate::core::scene::Scene;

/// Recompute `z` for every entity that opted into depth sorting.
///
/// Run after physics so `z` follows the position actually drawn this frame.
pub fn apply_depth_sort(scene: &mut Scene) {
    for entity in scene.iter_mut() {
        if let Some(depth) = entity.depth {
            entity.z = entity.pos.y + depth.offset;
        }
    }
}
