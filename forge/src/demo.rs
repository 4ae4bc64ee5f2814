//! Scene shown when the editor starts

use forge_engine::core::scene::{Scene, TransformComponent};
use glam::Vec3;

/// Script class attached to the demo player
pub const PLAYER_SCRIPT: &str = "PlayerController";

/// Camera, light and a player with a child model
pub fn build_demo_scene() -> Scene {
    let mut scene = Scene::new();

    let camera = scene.create_entity("Main Camera");
    let light = scene.create_entity("Directional Light");
    let player = scene.create_entity("Player");
    let model = scene.create_entity("Character Model");

    if let Some(entity) = scene.get_mut(camera) {
        *entity.transform_mut() = TransformComponent::from_position(Vec3::new(0.0, 2.7, -5.0));
    }
    if let Some(entity) = scene.get_mut(light) {
        *entity.transform_mut() = TransformComponent::from_position(Vec3::new(0.0, 10.0, 0.0))
            .with_rotation(Vec3::new(50f32.to_radians(), (-30f32).to_radians(), 0.0));
    }
    if let Some(entity) = scene.get_mut(player) {
        entity.add_script(PLAYER_SCRIPT);
    }

    if let Err(e) = scene.set_parent(model, Some(player)) {
        tracing::warn!(error = %e, "Failed to parent demo model");
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_layout() {
        let scene = build_demo_scene();
        assert_eq!(scene.len(), 4);

        let player = scene.find_by_name("Player").unwrap();
        let model = scene.find_by_name("Character Model").unwrap();
        assert_eq!(scene.parent(model), Some(player));
        assert_eq!(scene.root_entities().len(), 3);
        assert_eq!(
            scene.get(player).unwrap().script().unwrap().class_name,
            PLAYER_SCRIPT
        );
    }
}
