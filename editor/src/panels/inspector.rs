//! Component inspector panel
//!
//! Edits the name, transform and script tag of the selected entity.

use super::{Placement, CONTENT_ITEM_PAYLOAD, INSPECTOR_WINDOW};
use forge_engine::core::scene::{Entity, EntityId, Scene};
use glam::Vec3;
use imgui::{Drag, DragDropFlags, TreeNodeFlags};
use tracing::debug;

/// What the inspector did besides editing fields in place
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InspectorResponse {
    /// Content browser item dropped onto the panel
    pub dropped: Option<usize>,
    /// Entity whose script tag was removed
    pub script_removed: Option<EntityId>,
}

/// Render the inspector for `selected`
pub fn render_inspector_panel(
    ui: &imgui::Ui,
    scene: &mut Scene,
    selected: Option<EntityId>,
    placement: Placement,
    opened: &mut bool,
) -> InspectorResponse {
    let mut response = InspectorResponse::default();

    ui.window(INSPECTOR_WINDOW)
        .position(placement.rect.pos, placement.condition())
        .size(placement.rect.size, placement.condition())
        .opened(opened)
        .build(|| {
            let world = selected.and_then(|id| world_position(scene, id));
            let Some(entity) = selected.and_then(|id| scene.get_mut(id)) else {
                ui.text_disabled("No Entity Selected");
                return;
            };

            if draw_entity(ui, entity, world) {
                response.script_removed = Some(entity.id());
            }

            ui.separator();
            ui.text_disabled("Drop a script here to attach it");
            let avail = ui.content_region_avail();
            ui.invisible_button("##inspector_drop", [avail[0].max(1.0), avail[1].max(20.0)]);
            if let Some(target) = ui.drag_drop_target() {
                if let Some(Ok(payload)) =
                    target.accept_payload::<usize, _>(CONTENT_ITEM_PAYLOAD, DragDropFlags::empty())
                {
                    response.dropped = Some(payload.data);
                }
                target.pop();
            }
        });

    response
}

/// Returns `true` when the script tag was removed
fn draw_entity(ui: &imgui::Ui, entity: &mut Entity, world: Option<Vec3>) -> bool {
    ui.text(format!("Entity {}", entity.id()));

    let mut name = entity.name().to_string();
    if ui.input_text("Name", &mut name).build() && !name.trim().is_empty() {
        entity.set_name(name);
    }

    if ui.collapsing_header("Transform", TreeNodeFlags::DEFAULT_OPEN) {
        let transform = entity.transform_mut();

        let mut position = transform.position.to_array();
        if Drag::new("Position").speed(0.1).build_array(ui, &mut position) {
            transform.position = Vec3::from_array(position);
        }

        let mut rotation = rotation_to_degrees(transform.rotation);
        if Drag::new("Rotation").speed(1.0).build_array(ui, &mut rotation) {
            transform.rotation = rotation_from_degrees(rotation);
        }

        let mut scale = transform.scale.to_array();
        if Drag::new("Scale").speed(0.01).build_array(ui, &mut scale) {
            transform.scale = Vec3::from_array(scale);
        }

        if let Some(world) = world {
            ui.text_disabled(format!(
                "World: {:.2}, {:.2}, {:.2}",
                world.x, world.y, world.z
            ));
        }
    }

    let mut remove_script = false;
    if let Some(script) = entity.script() {
        if ui.collapsing_header("Script", TreeNodeFlags::DEFAULT_OPEN) {
            ui.text(format!("Class: {}", script.class_name));
            remove_script = ui.small_button("Remove Script");
        }
    }
    if !remove_script {
        return false;
    }
    match entity.remove_script() {
        Some(script) => {
            debug!(entity = %entity.id(), class = %script.class_name, "Removed script");
            true
        }
        None => false,
    }
}

/// Origin of `id` in world space, after every parent transform
pub fn world_position(scene: &Scene, id: EntityId) -> Option<Vec3> {
    scene
        .world_matrix(id)
        .map(|matrix| matrix.transform_point3(Vec3::ZERO))
}

/// Euler radians to the degrees shown in the panel
pub fn rotation_to_degrees(rotation: Vec3) -> [f32; 3] {
    [
        rotation.x.to_degrees(),
        rotation.y.to_degrees(),
        rotation.z.to_degrees(),
    ]
}

pub fn rotation_from_degrees(degrees: [f32; 3]) -> Vec3 {
    Vec3::new(
        degrees[0].to_radians(),
        degrees[1].to_radians(),
        degrees[2].to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_degrees_conversion() {
        let degrees = rotation_to_degrees(Vec3::new(FRAC_PI_2, 0.0, -FRAC_PI_2));
        assert!((degrees[0] - 90.0).abs() < 1e-4);
        assert_eq!(degrees[1], 0.0);
        assert!((degrees[2] + 90.0).abs() < 1e-4);

        let back = rotation_from_degrees(degrees);
        assert!((back - Vec3::new(FRAC_PI_2, 0.0, -FRAC_PI_2)).length() < 1e-5);
    }

    #[test]
    fn test_world_position_follows_parent() {
        let mut scene = Scene::new();
        let player = scene.create_entity("Player");
        let weapon = scene.create_entity("Weapon");
        scene.set_parent(weapon, Some(player)).unwrap();

        scene.get_mut(player).unwrap().transform_mut().position = Vec3::new(0.0, 1.0, 5.0);
        scene.get_mut(weapon).unwrap().transform_mut().position = Vec3::new(0.5, 0.0, 0.0);

        let world = world_position(&scene, weapon).unwrap();
        assert!((world - Vec3::new(0.5, 1.0, 5.0)).length() < 1e-5);

        scene.set_parent(weapon, None).unwrap();
        let world = world_position(&scene, weapon).unwrap();
        assert!((world - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);

        scene.destroy_entity(weapon);
        assert!(world_position(&scene, weapon).is_none());
    }
}
