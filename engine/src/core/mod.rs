//! Core engine types: the scene graph and the editor camera

pub mod camera;
pub mod scene;

pub use camera::EditorCamera;
pub use scene::{Entity, EntityId, Scene, SceneError, TransformComponent};
