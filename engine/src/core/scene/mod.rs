//! Scene graph: entities, their transforms and parent/child links

pub mod components;
pub mod entity;
pub mod hierarchy;
#[allow(clippy::module_inception)]
pub mod scene;

pub use components::TransformComponent;
pub use entity::{Entity, EntityId};
pub use hierarchy::{validate, Ancestors, HierarchyIssue};
pub use scene::{Scene, SceneError, DEFAULT_ENTITY_NAME};
