//! Editor selection state and the hierarchy actions that mutate it
//!
//! Panels never mutate the scene while it is being drawn. They collect
//! [`HierarchyAction`]s, which are applied once the frame's UI is built.

use forge_engine::core::scene::{EntityId, Scene, SceneError};
use tracing::{debug, info};

/// Something the user asked the hierarchy to do
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyAction {
    CreateEmpty,
    Select(EntityId),
    Deselect,
    BeginRename(EntityId),
    /// Apply the rename buffer to the entity being renamed
    CommitRename,
    CancelRename,
    Destroy(EntityId),
    /// Move `child` under `parent`, or to the root list for `None`
    Reparent {
        child: EntityId,
        parent: Option<EntityId>,
    },
}

/// What applying an action changed, for the editor's history and console
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Created(EntityId),
    Destroyed { id: EntityId, name: String },
    Renamed { id: EntityId, from: String, to: String },
    Reparented { child: EntityId, parent: Option<EntityId> },
    SelectionChanged,
    Unchanged,
}

/// Selected and renaming entity plus the rename text buffer
#[derive(Debug, Default, Clone)]
pub struct EditorSelection {
    selected: Option<EntityId>,
    renaming: Option<EntityId>,
    rename_buffer: String,
    rename_focus_pending: bool,
}

impl EditorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }

    pub fn renaming(&self) -> Option<EntityId> {
        self.renaming
    }

    pub fn rename_buffer_mut(&mut self) -> &mut String {
        &mut self.rename_buffer
    }

    pub fn select(&mut self, id: EntityId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.cancel_rename();
    }

    /// Enter rename mode with the buffer seeded from the entity's name
    pub fn begin_rename(&mut self, scene: &Scene, id: EntityId) -> bool {
        let Some(entity) = scene.get(id) else {
            return false;
        };
        self.rename_buffer = entity.name().to_string();
        self.renaming = Some(id);
        self.rename_focus_pending = true;
        true
    }

    pub fn cancel_rename(&mut self) {
        self.renaming = None;
        self.rename_buffer.clear();
        self.rename_focus_pending = false;
    }

    /// True once per rename, on the first frame the text field is drawn
    pub fn take_rename_focus(&mut self) -> bool {
        std::mem::take(&mut self.rename_focus_pending)
    }

    /// Drop references to entities the scene no longer owns
    pub fn invalidate(&mut self, scene: &Scene) {
        if self.selected.is_some_and(|id| !scene.contains(id)) {
            debug!(entity = ?self.selected, "Clearing stale selection");
            self.selected = None;
        }
        if self.renaming.is_some_and(|id| !scene.contains(id)) {
            self.cancel_rename();
        }
    }

    /// Apply one action to the scene and this selection
    pub fn apply(
        &mut self,
        scene: &mut Scene,
        action: HierarchyAction,
    ) -> Result<ActionOutcome, SceneError> {
        let outcome = match action {
            HierarchyAction::CreateEmpty => {
                let id = scene.create_entity_default();
                self.selected = Some(id);
                ActionOutcome::Created(id)
            }
            HierarchyAction::Select(id) => {
                if !scene.contains(id) {
                    return Err(SceneError::EntityNotFound(id));
                }
                if self.renaming.is_some_and(|r| r != id) {
                    self.cancel_rename();
                }
                self.selected = Some(id);
                ActionOutcome::SelectionChanged
            }
            HierarchyAction::Deselect => {
                self.clear();
                ActionOutcome::SelectionChanged
            }
            HierarchyAction::BeginRename(id) => {
                if !self.begin_rename(scene, id) {
                    return Err(SceneError::EntityNotFound(id));
                }
                self.selected = Some(id);
                ActionOutcome::SelectionChanged
            }
            HierarchyAction::CommitRename => self.commit_rename(scene),
            HierarchyAction::CancelRename => {
                self.cancel_rename();
                ActionOutcome::Unchanged
            }
            HierarchyAction::Destroy(id) => {
                let name = scene
                    .get(id)
                    .map(|e| e.name().to_string())
                    .ok_or(SceneError::EntityNotFound(id))?;
                scene.destroy_entity(id);
                self.invalidate(scene);
                info!(entity = %id, name = %name, "Entity deleted from hierarchy");
                ActionOutcome::Destroyed { id, name }
            }
            HierarchyAction::Reparent { child, parent } => {
                if scene.parent(child) == parent && scene.contains(child) {
                    return Ok(ActionOutcome::Unchanged);
                }
                scene.set_parent(child, parent)?;
                ActionOutcome::Reparented { child, parent }
            }
        };
        Ok(outcome)
    }

    fn commit_rename(&mut self, scene: &mut Scene) -> ActionOutcome {
        let Some(id) = self.renaming.take() else {
            return ActionOutcome::Unchanged;
        };
        self.rename_focus_pending = false;
        let new_name = std::mem::take(&mut self.rename_buffer);
        let trimmed = new_name.trim();

        match scene.get_mut(id) {
            Some(entity) if !trimmed.is_empty() && entity.name() != trimmed => {
                let from = entity.name().to_string();
                entity.set_name(trimmed);
                debug!(entity = %id, from = %from, to = %trimmed, "Renamed entity");
                ActionOutcome::Renamed {
                    id,
                    from,
                    to: trimmed.to_string(),
                }
            }
            _ => ActionOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_player() -> (Scene, EntityId, EntityId) {
        let mut scene = Scene::new();
        let player = scene.create_entity("Player");
        let model = scene.create_entity("Character Model");
        scene.set_parent(model, Some(player)).unwrap();
        (scene, player, model)
    }

    #[test]
    fn test_create_empty_selects_new_entity() {
        let mut scene = Scene::new();
        let mut selection = EditorSelection::new();
        let outcome = selection
            .apply(&mut scene, HierarchyAction::CreateEmpty)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Created(EntityId(0)));
        assert_eq!(selection.selected(), Some(EntityId(0)));
        assert_eq!(scene.get(EntityId(0)).unwrap().name(), "NewGameObject");
    }

    #[test]
    fn test_deleting_selected_entity_clears_selection() {
        let (mut scene, player, model) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection.select(player);

        selection
            .apply(&mut scene, HierarchyAction::Destroy(player))
            .unwrap();

        assert_eq!(selection.selected(), None);
        assert_eq!(scene.root_entities(), &[model]);
    }

    #[test]
    fn test_deleting_renaming_entity_cancels_rename() {
        let (mut scene, player, model) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection.select(player);
        selection
            .apply(&mut scene, HierarchyAction::BeginRename(model))
            .unwrap();
        assert_eq!(selection.renaming(), Some(model));

        selection
            .apply(&mut scene, HierarchyAction::Destroy(model))
            .unwrap();
        assert_eq!(selection.renaming(), None);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_deleting_other_entity_keeps_selection() {
        let (mut scene, player, model) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection.select(player);
        selection
            .apply(&mut scene, HierarchyAction::Destroy(model))
            .unwrap();
        assert_eq!(selection.selected(), Some(player));
    }

    #[test]
    fn test_rename_commit() {
        let (mut scene, player, _) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection
            .apply(&mut scene, HierarchyAction::BeginRename(player))
            .unwrap();
        assert_eq!(selection.rename_buffer_mut().as_str(), "Player");
        assert!(selection.take_rename_focus());
        assert!(!selection.take_rename_focus());

        *selection.rename_buffer_mut() = "  Hero ".to_string();
        let outcome = selection
            .apply(&mut scene, HierarchyAction::CommitRename)
            .unwrap();

        assert_eq!(
            outcome,
            ActionOutcome::Renamed {
                id: player,
                from: "Player".to_string(),
                to: "Hero".to_string()
            }
        );
        assert_eq!(scene.get(player).unwrap().name(), "Hero");
        assert_eq!(selection.renaming(), None);
    }

    #[test]
    fn test_rename_to_blank_is_ignored() {
        let (mut scene, player, _) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection.begin_rename(&scene, player);
        selection.rename_buffer_mut().clear();

        let outcome = selection
            .apply(&mut scene, HierarchyAction::CommitRename)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Unchanged);
        assert_eq!(scene.get(player).unwrap().name(), "Player");
    }

    #[test]
    fn test_reparent_cycle_is_rejected() {
        let (mut scene, player, model) = scene_with_player();
        let mut selection = EditorSelection::new();
        let result = selection.apply(
            &mut scene,
            HierarchyAction::Reparent {
                child: player,
                parent: Some(model),
            },
        );
        assert!(matches!(result, Err(SceneError::CycleDetected { .. })));
        assert_eq!(scene.parent(model), Some(player));
    }

    #[test]
    fn test_unparent_moves_to_root() {
        let (mut scene, player, model) = scene_with_player();
        let mut selection = EditorSelection::new();
        let outcome = selection
            .apply(
                &mut scene,
                HierarchyAction::Reparent {
                    child: model,
                    parent: None,
                },
            )
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Reparented {
                child: model,
                parent: None
            }
        );
        assert_eq!(scene.root_entities(), &[player, model]);
    }

    #[test]
    fn test_select_unknown_entity_fails() {
        let mut scene = Scene::new();
        let mut selection = EditorSelection::new();
        let result = selection.apply(&mut scene, HierarchyAction::Select(EntityId(7)));
        assert_eq!(result, Err(SceneError::EntityNotFound(EntityId(7))));
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_invalidate_after_external_destroy() {
        let (mut scene, player, _) = scene_with_player();
        let mut selection = EditorSelection::new();
        selection.select(player);
        scene.destroy_entity(player);

        selection.invalidate(&scene);
        assert_eq!(selection.selected(), None);
    }
}
