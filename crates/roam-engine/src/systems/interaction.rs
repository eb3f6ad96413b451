//! Nearest-interactable scan.
//!
//! A room holds a handful of interactables, so every query is a linear
//! pass over the scene.

use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::interactable::Interactable;
use crate::core::scene::Scene;

/// An interactable found near a point.
#[derive(Debug, Clone, Copy)]
pub struct Nearby<'a> {
    pub id: EntityId,
    pub pos: Vec2,
    pub distance: f32,
    pub interactable: &'a Interactable,
}

/// Active interactables strictly closer than `radius` to `from`, nearest first.
/// Equal distances keep scene order.
pub fn interactables_in_range(scene: &Scene, from: Vec2, radius: f32) -> Vec<Nearby<'_>> {
    let mut found: Vec<Nearby<'_>> = scene
        .iter()
        .filter(|e| e.active)
        .filter_map(|e| {
            let interactable = e.interactable.as_ref()?;
            let distance = e.pos.distance(from);
            (distance < radius).then_some(Nearby {
                id: e.id,
                pos: e.pos,
                distance,
                interactable,
            })
        })
        .collect();
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}

/// The closest active interactable strictly within `radius` of `from`.
/// Ties go to the entity spawned first.
pub fn nearest_interactable(scene: &Scene, from: Vec2, radius: f32) -> Option<Nearby<'_>> {
    let mut best: Option<Nearby<'_>> = None;
    for entity in scene.iter().filter(|e| e.active) {
        let Some(interactable) = entity.interactable.as_ref() else {
            continue;
        };
        let distance = entity.pos.distance(from);
        if distance >= radius {
            continue;
        }
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Nearby {
                id: entity.id,
                pos: entity.pos,
                distance,
                interactable,
            });
        }
    }
    best
}
