//! Entity data owned by a [`Scene`](super::Scene)

use super::components::TransformComponent;
use crate::scripting::{ScriptComponent, ScriptEngine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to an entity inside its owning scene.
///
/// Ids are assigned monotonically starting at 0 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named node in the scene graph
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    name: String,
    transform: TransformComponent,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    script: Option<ScriptComponent>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: TransformComponent::default(),
            parent: None,
            children: Vec::new(),
            script: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn transform(&self) -> &TransformComponent {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut TransformComponent {
        &mut self.transform
    }

    /// Parent handle, `None` for root entities
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Child handles in insertion order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Append a child link. Already-linked children are ignored.
    pub(crate) fn add_child(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Remove every link to `child`
    pub(crate) fn remove_child(&mut self, child: EntityId) {
        self.children.retain(|&c| c != child);
    }

    /// Attach a script tag, replacing any existing one
    pub fn add_script(&mut self, class_name: impl Into<String>) {
        self.script = Some(ScriptComponent::new(class_name));
    }

    pub fn script(&self) -> Option<&ScriptComponent> {
        self.script.as_ref()
    }

    pub fn script_mut(&mut self) -> Option<&mut ScriptComponent> {
        self.script.as_mut()
    }

    pub fn remove_script(&mut self) -> Option<ScriptComponent> {
        self.script.take()
    }

    /// Per-frame update. Only entities carrying a script tag reach the script engine.
    pub fn on_update(&self, delta_time: f32, scripts: &mut ScriptEngine) {
        if self.script.is_some() {
            scripts.on_update_entity(self, delta_time);
        }
    }
}
