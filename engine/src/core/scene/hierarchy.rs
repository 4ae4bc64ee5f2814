//! Traversal helpers and consistency checks for the scene hierarchy

use super::entity::EntityId;
use super::scene::Scene;
use glam::Mat4;
use std::collections::HashSet;
use tracing::{error, trace};

/// Walks from an entity's parent up to its root
pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<EntityId>,
    visited: HashSet<EntityId>,
}

impl Iterator for Ancestors<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let current = self.next?;
        if !self.visited.insert(current) {
            error!(entity = %current, "Cyclic parent chain detected");
            self.next = None;
            return None;
        }
        self.next = self.scene.parent(current);
        Some(current)
    }
}

impl Scene {
    /// Parent, grandparent and so on up to the root
    pub fn ancestors(&self, id: EntityId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.parent(id),
            visited: HashSet::new(),
        }
    }

    /// Whether `ancestor` sits somewhere above `descendant`
    pub fn is_ancestor(&self, ancestor: EntityId, descendant: EntityId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Pre-order walk over every root and its subtree, with depth.
    ///
    /// This is the order the hierarchy panel draws rows in.
    pub fn walk_depth_first(&self) -> Vec<(EntityId, usize)> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(EntityId, usize)> = self
            .root_entities()
            .iter()
            .rev()
            .map(|&id| (id, 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            order.push((id, depth));
            stack.extend(self.children(id).iter().rev().map(|&child| (child, depth + 1)));
        }

        trace!(visited = order.len(), "Hierarchy walk completed");
        order
    }

    /// World matrix of an entity: its local transform under every ancestor's
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let local = self.get(id)?.transform().matrix();
        Some(self.ancestors(id).fold(local, |matrix, ancestor| {
            match self.get(ancestor) {
                Some(entity) => entity.transform().matrix() * matrix,
                None => matrix,
            }
        }))
    }
}

/// A broken link found by [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyIssue {
    /// Root list names an entity the scene does not own
    DanglingRoot(EntityId),
    /// Entity has a parent but is still listed as a root
    ParentedRoot(EntityId),
    /// Parentless entity missing from the root list
    MissingRoot(EntityId),
    /// Root list names the same entity more than once
    DuplicateRoot(EntityId),
    /// Parent id does not resolve to an owned entity
    DanglingParent { child: EntityId, parent: EntityId },
    /// Parent does not list the child back
    UnlinkedChild { child: EntityId, parent: EntityId },
    /// Child list entry does not point back at the parent
    MismatchedChild { parent: EntityId, child: EntityId },
    /// Same child listed twice by one parent
    DuplicateChild { parent: EntityId, child: EntityId },
    /// Entity is its own ancestor
    Cycle(EntityId),
}

/// Check every structural invariant of the hierarchy. Empty means consistent.
pub fn validate(scene: &Scene) -> Vec<HierarchyIssue> {
    let mut issues = Vec::new();

    let mut seen_roots = HashSet::new();
    for &root in scene.root_entities() {
        if !seen_roots.insert(root) {
            issues.push(HierarchyIssue::DuplicateRoot(root));
        }
        match scene.get(root) {
            None => issues.push(HierarchyIssue::DanglingRoot(root)),
            Some(entity) if entity.parent().is_some() => {
                issues.push(HierarchyIssue::ParentedRoot(root))
            }
            Some(_) => {}
        }
    }

    for entity in scene.entities() {
        let id = entity.id();

        match entity.parent() {
            None => {
                if !seen_roots.contains(&id) {
                    issues.push(HierarchyIssue::MissingRoot(id));
                }
            }
            Some(parent) => match scene.get(parent) {
                None => issues.push(HierarchyIssue::DanglingParent { child: id, parent }),
                Some(parent_entity) => {
                    if !parent_entity.children().contains(&id) {
                        issues.push(HierarchyIssue::UnlinkedChild { child: id, parent });
                    }
                }
            },
        }

        let mut seen_children = HashSet::new();
        for &child in entity.children() {
            if !seen_children.insert(child) {
                issues.push(HierarchyIssue::DuplicateChild { parent: id, child });
            }
            if scene.parent(child) != Some(id) {
                issues.push(HierarchyIssue::MismatchedChild { parent: id, child });
            }
        }

        if has_cycle(scene, id) {
            issues.push(HierarchyIssue::Cycle(id));
        }
    }

    issues
}

fn has_cycle(scene: &Scene, id: EntityId) -> bool {
    let mut visited = HashSet::new();
    let mut current = scene.parent(id);
    while let Some(next) = current {
        if next == id || !visited.insert(next) {
            return true;
        }
        current = scene.parent(next);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sample_scene() -> (Scene, [EntityId; 5]) {
        // camera
        // player
        //   model
        //     weapon
        // light
        let mut scene = Scene::new();
        let camera = scene.create_entity("Main Camera");
        let player = scene.create_entity("Player");
        let model = scene.create_entity("Character Model");
        let weapon = scene.create_entity("Weapon");
        let light = scene.create_entity("Directional Light");
        scene.set_parent(model, Some(player)).unwrap();
        scene.set_parent(weapon, Some(model)).unwrap();
        (scene, [camera, player, model, weapon, light])
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let (scene, [camera, player, model, weapon, _]) = sample_scene();
        let chain: Vec<_> = scene.ancestors(weapon).collect();
        assert_eq!(chain, vec![model, player]);
        assert_eq!(scene.ancestors(camera).count(), 0);
    }

    #[test]
    fn test_is_ancestor() {
        let (scene, [camera, player, model, weapon, _]) = sample_scene();
        assert!(scene.is_ancestor(player, weapon));
        assert!(scene.is_ancestor(model, weapon));
        assert!(!scene.is_ancestor(weapon, player));
        assert!(!scene.is_ancestor(camera, weapon));
        assert!(!scene.is_ancestor(player, player));
    }

    #[test]
    fn test_walk_depth_first_order() {
        let (scene, [camera, player, model, weapon, light]) = sample_scene();
        assert_eq!(
            scene.walk_depth_first(),
            vec![(camera, 0), (player, 0), (model, 1), (weapon, 2), (light, 0)]
        );
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.create_entity("Parent");
        let child = scene.create_entity("Child");
        scene.set_parent(child, Some(parent)).unwrap();

        scene.get_mut(parent).unwrap().transform_mut().position = Vec3::new(10.0, 0.0, 0.0);
        scene.get_mut(parent).unwrap().transform_mut().scale = Vec3::splat(2.0);
        scene.get_mut(child).unwrap().transform_mut().position = Vec3::new(1.0, 0.0, 0.0);

        let world = scene.world_matrix(child).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5);
        assert!(scene.world_matrix(EntityId(42)).is_none());
    }

    #[test]
    fn test_validate_consistent_scene() {
        let (mut scene, [_, player, _, _, _]) = sample_scene();
        assert!(validate(&scene).is_empty());

        scene.destroy_entity(player);
        assert!(validate(&scene).is_empty());
    }
}
