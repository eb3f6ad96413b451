use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::{Entity, MARKER_PREFIX};

/// Entity storage using a flat Vec, in spawn order.
/// A room holds a few hundred entities at most, so every lookup is a scan.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Spawn order of the remaining entities is preserved.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.tag == tag).collect()
    }

    /// Positions of the spawn markers named `name`, in spawn order.
    pub fn markers(&self, name: &str) -> Vec<Vec2> {
        self.entities
            .iter()
            .filter(|e| is_marker_named(e, name))
            .map(|e| e.pos)
            .collect()
    }

    /// Consume the spawn markers named `name`: returns their positions in
    /// spawn order and removes them from the scene.
    pub fn take_markers(&mut self, name: &str) -> Vec<Vec2> {
        let positions = self.markers(name);
        self.entities.retain(|e| !is_marker_named(e, name));
        positions
    }

    /// Number of spawn markers still waiting to be replaced.
    pub fn marker_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_marker()).count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

fn is_marker_named(entity: &Entity, name: &str) -> bool {
    entity
        .tag
        .strip_prefix(MARKER_PREFIX)
        .is_some_and(|rest| rest == name)
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_keeps_spawn_order() {
        let mut scene = Scene::new();
        for i in 1..=4 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.despawn(EntityId(2));
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(scene.despawn(EntityId(2)).is_none());
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("player"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("table"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("table"));
        assert_eq!(scene.find_by_tag("player").unwrap().id, EntityId(1));
        assert_eq!(scene.find_all_by_tag("table").len(), 2);
        assert!(scene.find_by_tag("dragon").is_none());
    }

    #[test]
    fn take_markers_replaces_only_named_markers() {
        let mut scene = Scene::new();
        scene.spawn(Entity::marker(EntityId(1), "table", Vec2::new(64.0, 64.0)));
        scene.spawn(Entity::marker(EntityId(2), "cat", Vec2::new(128.0, 64.0)));
        scene.spawn(Entity::marker(EntityId(3), "table", Vec2::new(192.0, 64.0)));
        scene.spawn(Entity::new(EntityId(4)).with_tag("table"));

        let tables = scene.take_markers("table");
        assert_eq!(tables, vec![Vec2::new(64.0, 64.0), Vec2::new(192.0, 64.0)]);
        assert_eq!(scene.marker_count(), 1);
        // The real "table" entity is untouched.
        assert!(scene.get(EntityId(4)).is_some());

        assert!(scene.take_markers("table").is_empty());
    }

    #[test]
    fn marker_names_do_not_prefix_match() {
        let mut scene = Scene::new();
        scene.spawn(Entity::marker(EntityId(1), "orb-github", Vec2::ZERO));
        assert!(scene.markers("orb").is_empty());
        assert_eq!(scene.markers("orb-github").len(), 1);
    }
}
