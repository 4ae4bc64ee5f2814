//! Scene graph storage and the re-parent transaction

use super::entity::{Entity, EntityId};
use crate::scripting::ScriptEngine;
use thiserror::Error;
use tracing::{debug, info};

/// Name given to entities created without one
pub const DEFAULT_ENTITY_NAME: &str = "NewGameObject";

/// Errors that can occur when mutating the scene graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("Entity {0} not found in scene")]
    EntityNotFound(EntityId),

    #[error("Parenting {child} under {parent} would create a cycle")]
    CycleDetected { child: EntityId, parent: EntityId },
}

/// Owns every entity plus the ordered list of parentless ones.
///
/// Entities are stored in creation order. Because ids are handed out
/// monotonically and removal preserves order, the master list stays sorted by
/// id and lookups are a binary search.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    root_entities: Vec<EntityId>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root entity with a default transform
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let entity = Entity::new(id, name);
        debug!(entity = %id, name = entity.name(), "Created entity");

        self.entities.push(entity);
        self.root_entities.push(id);
        id
    }

    /// Create a root entity named [`DEFAULT_ENTITY_NAME`]
    pub fn create_entity_default(&mut self) -> EntityId {
        self.create_entity(DEFAULT_ENTITY_NAME)
    }

    /// Destroy an entity, promoting its children to root.
    ///
    /// Returns `false` when `id` is not part of this scene. Anything else that
    /// holds the id (editor selection, script engine) has to drop it.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let children = std::mem::take(&mut self.entities[index].children);
        for &child in &children {
            if let Some(entity) = self.get_mut(child) {
                entity.parent = None;
            }
            self.root_entities.push(child);
        }

        match self.entities[index].parent {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.remove_child(id);
                }
            }
            None => self.root_entities.retain(|&root| root != id),
        }

        let removed = self.entities.remove(index);
        info!(
            entity = %id,
            name = removed.name(),
            promoted = children.len(),
            "Destroyed entity"
        );
        true
    }

    /// Move `child` under `new_parent`, or to the root list for `None`.
    ///
    /// Setting the current parent again is a no-op. Fails without touching the
    /// scene when either id is unknown or the move would make an entity its
    /// own ancestor.
    pub fn set_parent(
        &mut self,
        child: EntityId,
        new_parent: Option<EntityId>,
    ) -> Result<(), SceneError> {
        let current = self
            .get(child)
            .ok_or(SceneError::EntityNotFound(child))?
            .parent;

        if let Some(parent) = new_parent {
            if !self.contains(parent) {
                return Err(SceneError::EntityNotFound(parent));
            }
            if parent == child || self.is_ancestor(child, parent) {
                return Err(SceneError::CycleDetected { child, parent });
            }
        }

        if current == new_parent {
            return Ok(());
        }

        match current {
            Some(old) => {
                if let Some(old) = self.get_mut(old) {
                    old.remove_child(child);
                }
            }
            None => self.root_entities.retain(|&root| root != child),
        }

        match new_parent {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.add_child(child);
                }
            }
            None => self.root_entities.push(child),
        }

        if let Some(entity) = self.get_mut(child) {
            entity.parent = new_parent;
        }

        debug!(entity = %child, from = ?current, to = ?new_parent, "Re-parented entity");
        Ok(())
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, Entity::id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|index| &self.entities[index])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |index| &mut self.entities[index])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Every entity in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Parentless entities in the order they became roots
    pub fn root_entities(&self) -> &[EntityId] {
        &self.root_entities
    }

    /// Children of `id`, empty for unknown ids
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.get(id).map(Entity::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.get(id).and_then(Entity::parent)
    }

    /// First entity with the given name, in creation order
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.name() == name)
            .map(Entity::id)
    }

    /// Bind every scripted entity to the script engine
    pub fn start_scripts(&mut self, scripts: &mut ScriptEngine) -> usize {
        let mut started = 0;
        for entity in self.entities.iter_mut() {
            if scripts.instantiate_entity(entity) {
                started += 1;
            }
        }
        debug!(started, "Started entity scripts");
        started
    }

    /// Run the per-frame update on every entity in creation order
    pub fn update(&self, delta_time: f32, scripts: &mut ScriptEngine) {
        for entity in &self.entities {
            entity.on_update(delta_time, scripts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut scene = Scene::new();
        assert_eq!(scene.create_entity("A"), EntityId(0));
        assert_eq!(scene.create_entity("B"), EntityId(1));
        assert_eq!(scene.create_entity_default(), EntityId(2));
        assert_eq!(scene.get(EntityId(2)).unwrap().name(), DEFAULT_ENTITY_NAME);
        assert_eq!(scene.root_entities(), &[EntityId(0), EntityId(1), EntityId(2)]);
    }

    #[test]
    fn test_ids_not_reused_after_destroy() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        assert!(scene.destroy_entity(a));
        let b = scene.create_entity("B");
        assert_eq!(b, EntityId(1));
        assert!(!scene.contains(a));
    }

    #[test]
    fn test_set_parent_moves_between_lists() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");

        scene.set_parent(b, Some(a)).unwrap();
        assert_eq!(scene.root_entities(), &[a]);
        assert_eq!(scene.children(a), &[b]);
        assert_eq!(scene.parent(b), Some(a));

        scene.set_parent(b, None).unwrap();
        assert_eq!(scene.root_entities(), &[a, b]);
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.parent(b), None);
    }

    #[test]
    fn test_set_parent_is_idempotent() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");

        scene.set_parent(b, Some(a)).unwrap();
        scene.set_parent(b, Some(a)).unwrap();
        assert_eq!(scene.children(a), &[b]);

        // Already a root
        scene.set_parent(a, None).unwrap();
        assert_eq!(scene.root_entities(), &[a]);
    }

    #[test]
    fn test_reparent_between_parents() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");
        let c = scene.create_entity("C");

        scene.set_parent(c, Some(a)).unwrap();
        scene.set_parent(c, Some(b)).unwrap();

        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[c]);
        assert_eq!(scene.root_entities(), &[a, b]);
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        assert_eq!(
            scene.set_parent(a, Some(a)),
            Err(SceneError::CycleDetected { child: a, parent: a })
        );
        assert_eq!(scene.root_entities(), &[a]);
    }

    #[test]
    fn test_cycle_rejected_and_scene_unchanged() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");
        let c = scene.create_entity("C");
        scene.set_parent(b, Some(a)).unwrap();
        scene.set_parent(c, Some(b)).unwrap();

        let result = scene.set_parent(a, Some(c));
        assert_eq!(result, Err(SceneError::CycleDetected { child: a, parent: c }));

        assert_eq!(scene.root_entities(), &[a]);
        assert_eq!(scene.parent(a), None);
        assert_eq!(scene.children(c), &[] as &[EntityId]);
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let mut scene = Scene::new();
        let a = scene.create_entity("A");
        let ghost = EntityId(99);

        assert_eq!(
            scene.set_parent(ghost, Some(a)),
            Err(SceneError::EntityNotFound(ghost))
        );
        assert_eq!(
            scene.set_parent(a, Some(ghost)),
            Err(SceneError::EntityNotFound(ghost))
        );
        assert!(!scene.destroy_entity(ghost));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_destroy_promotes_children() {
        let mut scene = Scene::new();
        let root = scene.create_entity("Root");
        let parent = scene.create_entity("Parent");
        let c1 = scene.create_entity("C1");
        let c2 = scene.create_entity("C2");
        scene.set_parent(parent, Some(root)).unwrap();
        scene.set_parent(c1, Some(parent)).unwrap();
        scene.set_parent(c2, Some(parent)).unwrap();

        assert!(scene.destroy_entity(parent));

        assert!(!scene.contains(parent));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.root_entities(), &[root, c1, c2]);
        assert_eq!(scene.parent(c1), None);
        assert_eq!(scene.parent(c2), None);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_find_by_name() {
        let mut scene = Scene::new();
        scene.create_entity("Main Camera");
        let player = scene.create_entity("Player");
        scene.create_entity("Player");
        assert_eq!(scene.find_by_name("Player"), Some(player));
        assert_eq!(scene.find_by_name("Enemy"), None);
    }

    #[test]
    fn test_update_dispatches_scripted_entities() {
        let mut scene = Scene::new();
        let player = scene.create_entity("Player");
        scene.create_entity("Light");
        scene.get_mut(player).unwrap().add_script("PlayerController");

        let mut scripts = ScriptEngine::new();
        scripts.init();
        assert_eq!(scene.start_scripts(&mut scripts), 1);

        scene.update(0.016, &mut scripts);
        scene.update(0.016, &mut scripts);
        assert_eq!(scripts.update_calls(), 2);
    }
}
