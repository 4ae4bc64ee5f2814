//! Scene hierarchy panel
//!
//! Displays the scene as a tree of root entities and their children. Rows can
//! be selected, renamed, deleted and dragged onto each other to re-parent.

use super::{Placement, ENTITY_PAYLOAD, HIERARCHY_WINDOW};
use crate::selection::{EditorSelection, HierarchyAction};
use forge_engine::core::scene::{EntityId, Scene};
use imgui::{DragDropFlags, Key, MouseButton, TreeNodeFlags};

/// Render the scene hierarchy panel and return the actions the user took
pub fn render_hierarchy_panel(
    ui: &imgui::Ui,
    scene: &Scene,
    selection: &mut EditorSelection,
    placement: Placement,
    opened: &mut bool,
) -> Vec<HierarchyAction> {
    let mut actions = Vec::new();

    ui.window(HIERARCHY_WINDOW)
        .position(placement.rect.pos, placement.condition())
        .size(placement.rect.size, placement.condition())
        .opened(opened)
        .build(|| {
            if ui.button("Create Empty") {
                actions.push(HierarchyAction::CreateEmpty);
            }
            ui.separator();

            for &root in scene.root_entities() {
                draw_entity_node(ui, scene, root, selection, &mut actions);
            }

            // Remaining space: click to deselect, drop to unparent
            let avail = ui.content_region_avail();
            let area = [avail[0].max(1.0), avail[1].max(20.0)];
            if ui.invisible_button("##hierarchy_background", area) {
                actions.push(HierarchyAction::Deselect);
            }
            if let Some(target) = ui.drag_drop_target() {
                if let Some(Ok(payload)) =
                    target.accept_payload::<EntityId, _>(ENTITY_PAYLOAD, DragDropFlags::empty())
                {
                    actions.push(HierarchyAction::Reparent {
                        child: payload.data,
                        parent: None,
                    });
                }
                target.pop();
            }

            if ui.is_window_focused() {
                let key_action = shortcut_action(
                    selection.selected(),
                    selection.renaming().is_some(),
                    ui.is_key_pressed(Key::Delete),
                    ui.is_key_pressed(Key::F2),
                );
                actions.extend(key_action);
            }
        });

    actions
}

/// Recursively render an entity and its children
fn draw_entity_node(
    ui: &imgui::Ui,
    scene: &Scene,
    id: EntityId,
    selection: &mut EditorSelection,
    actions: &mut Vec<HierarchyAction>,
) {
    let Some(entity) = scene.get(id) else {
        return;
    };
    let id_label = format!("entity_{}", id.0);
    let _id = ui.push_id(&id_label);

    if selection.renaming() == Some(id) {
        if selection.take_rename_focus() {
            ui.set_keyboard_focus_here();
        }
        let submitted = ui
            .input_text("##rename", selection.rename_buffer_mut())
            .enter_returns_true(true)
            .auto_select_all(true)
            .build();
        if submitted {
            actions.push(HierarchyAction::CommitRename);
        } else if ui.is_key_pressed(Key::Escape)
            || (!ui.is_item_active() && ui.is_mouse_clicked(MouseButton::Left))
        {
            actions.push(HierarchyAction::CancelRename);
        }
        return;
    }

    let mut flags = TreeNodeFlags::OPEN_ON_ARROW
        | TreeNodeFlags::SPAN_AVAIL_WIDTH
        | TreeNodeFlags::DEFAULT_OPEN;
    if !entity.has_children() {
        flags |= TreeNodeFlags::LEAF;
    }
    if selection.is_selected(id) {
        flags |= TreeNodeFlags::SELECTED;
    }

    let label = format!("{}##node", entity.name());
    let node = ui
        .tree_node_config(&label)
        .flags(flags)
        .push();

    if ui.is_item_clicked() {
        actions.push(HierarchyAction::Select(id));
    }
    if ui.is_item_hovered() && ui.is_mouse_double_clicked(MouseButton::Left) {
        actions.push(HierarchyAction::BeginRename(id));
    }
    if ui.is_item_clicked_with_button(MouseButton::Right) {
        ui.open_popup("##entity_context");
    }

    if let Some(_tooltip) = ui
        .drag_drop_source_config(ENTITY_PAYLOAD)
        .begin_payload(id)
    {
        ui.text(entity.name());
    }

    if let Some(target) = ui.drag_drop_target() {
        if let Some(Ok(payload)) =
            target.accept_payload::<EntityId, _>(ENTITY_PAYLOAD, DragDropFlags::empty())
        {
            actions.extend(drop_action(payload.data, id));
        }
        target.pop();
    }

    ui.popup("##entity_context", || {
        if ui.menu_item("Rename") {
            actions.push(HierarchyAction::BeginRename(id));
        }
        if entity.parent().is_some() && ui.menu_item("Unparent") {
            actions.push(HierarchyAction::Reparent {
                child: id,
                parent: None,
            });
        }
        ui.separator();
        if ui.menu_item("Delete") {
            actions.push(HierarchyAction::Destroy(id));
        }
    });

    if let Some(_node) = node {
        for &child in entity.children() {
            draw_entity_node(ui, scene, child, selection, actions);
        }
    }
}

/// Keyboard shortcuts for the selected row: Delete destroys, F2 renames
pub fn shortcut_action(
    selected: Option<EntityId>,
    renaming: bool,
    delete_pressed: bool,
    rename_pressed: bool,
) -> Option<HierarchyAction> {
    let selected = selected?;
    if renaming {
        return None;
    }
    if delete_pressed {
        Some(HierarchyAction::Destroy(selected))
    } else if rename_pressed {
        Some(HierarchyAction::BeginRename(selected))
    } else {
        None
    }
}

/// Dropping a row onto another parents it there; dropping onto itself does nothing
pub fn drop_action(dragged: EntityId, target: EntityId) -> Option<HierarchyAction> {
    (dragged != target).then_some(HierarchyAction::Reparent {
        child: dragged,
        parent: Some(target),
    })
}
