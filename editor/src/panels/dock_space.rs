//! Main menu bar and the dock space behind every panel

use crate::layout::PanelVisibility;
use imgui::ConfigFlags;

/// Menu entries that need the editor to act
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewScene,
    OpenScene,
    SaveScene,
    Exit,
    Undo,
    Redo,
    ResetLayout,
    About,
}

/// Draw the menu bar and a dock space over the main viewport.
///
/// Panel toggles in the Window menu write straight into `visibility`; every
/// other entry is returned for the caller to handle.
pub fn render_dock_space(ui: &imgui::Ui, visibility: &mut PanelVisibility) -> Vec<MenuAction> {
    let mut actions = Vec::new();

    if ui.io().config_flags.contains(ConfigFlags::DOCKING_ENABLE) {
        ui.dockspace_over_main_viewport();
    }

    ui.main_menu_bar(|| {
        ui.menu("File", || {
            if ui.menu_item_config("New Scene").shortcut("Ctrl+N").build() {
                actions.push(MenuAction::NewScene);
            }
            if ui.menu_item_config("Open Scene").shortcut("Ctrl+O").build() {
                actions.push(MenuAction::OpenScene);
            }
            if ui.menu_item_config("Save Scene").shortcut("Ctrl+S").build() {
                actions.push(MenuAction::SaveScene);
            }
            ui.separator();
            if ui.menu_item_config("Exit").shortcut("Alt+F4").build() {
                actions.push(MenuAction::Exit);
            }
        });
        ui.menu("Edit", || {
            if ui.menu_item_config("Undo").shortcut("Ctrl+Z").build() {
                actions.push(MenuAction::Undo);
            }
            if ui.menu_item_config("Redo").shortcut("Ctrl+Y").build() {
                actions.push(MenuAction::Redo);
            }
        });
        ui.menu("Window", || {
            ui.menu_item_config("Hierarchy")
                .build_with_ref(&mut visibility.hierarchy);
            ui.menu_item_config("Inspector")
                .build_with_ref(&mut visibility.inspector);
            ui.menu_item_config("Content Browser")
                .build_with_ref(&mut visibility.content_browser);
            ui.menu_item_config("Viewport")
                .build_with_ref(&mut visibility.viewport);
            ui.separator();
            if ui.menu_item("Reset Layout") {
                actions.push(MenuAction::ResetLayout);
            }
        });
        ui.menu("Help", || {
            if ui.menu_item("About") {
                actions.push(MenuAction::About);
            }
        });
    });

    actions
}

/// Height taken by the main menu bar at the top of the work area
pub fn menu_bar_height(ui: &imgui::Ui) -> f32 {
    ui.frame_height()
}
