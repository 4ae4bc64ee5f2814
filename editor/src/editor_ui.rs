//! Editor UI root
//!
//! Owns the imgui context, the active scene and all editor state. The host
//! drives it once per frame: [`EditorUi::new_frame`], [`EditorUi::draw`] and
//! [`EditorUi::render`].

use crate::layout::DockLayout;
use crate::panels::content_browser::{AssetEntry, AssetKind};
use crate::panels::dock_space::menu_bar_height;
use crate::panels::{
    render_content_browser_panel, render_dock_space, render_hierarchy_panel,
    render_inspector_panel, render_viewport_panel, ContentBrowserState, InspectorResponse,
    MenuAction, Placement, ViewportResponse, HIERARCHY_WINDOW,
};
use crate::scene_view_renderer::SceneViewRenderer;
use crate::selection::{ActionOutcome, EditorSelection, HierarchyAction};
use crate::settings::EditorSettings;
use forge_engine::config::CameraConfig;
use forge_engine::core::scene::{EntityId, Scene};
use forge_engine::core::EditorCamera;
use imgui::{ConfigFlags, TextureId};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use winit::event::Event;
use winit::window::Window;

const ABOUT_POPUP: &str = "About Forge";

/// Entity changes the host has to mirror in the script engine
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorEvents {
    /// Entities that no longer exist
    pub destroyed: Vec<EntityId>,
    /// Entities that gained a script tag
    pub scripted: Vec<EntityId>,
    /// Entities whose script tag was removed
    pub unscripted: Vec<EntityId>,
}

impl EditorEvents {
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty() && self.scripted.is_empty() && self.unscripted.is_empty()
    }

    /// Note the entity the inspector stripped a script from
    fn record_inspector(&mut self, response: &InspectorResponse) {
        self.unscripted.extend(response.script_removed);
    }
}

pub struct EditorUi {
    imgui: imgui::Context,
    platform: WinitPlatform,
    renderer: Renderer,
    frame_open: bool,

    scene: Option<Scene>,
    selection: EditorSelection,
    camera: EditorCamera,
    scene_view: SceneViewRenderer,
    texture_id: Option<TextureId>,
    pending_view_size: Option<(i32, i32)>,

    settings: EditorSettings,
    settings_path: PathBuf,
    content: ContentBrowserState,
    reset_layout: bool,
    show_about: bool,
    exit_requested: bool,
    events: EditorEvents,
}

impl EditorUi {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        window: &Window,
        surface_format: wgpu::TextureFormat,
        camera: &CameraConfig,
    ) -> Self {
        info!("Initializing editor UI");

        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        imgui.io_mut().config_flags |= ConfigFlags::DOCKING_ENABLE;

        let style = imgui.style_mut();
        style.window_rounding = 0.0;
        style.scrollbar_rounding = 0.0;

        let mut platform = WinitPlatform::new(&mut imgui);
        platform.attach_window(imgui.io_mut(), window, HiDpiMode::Default);

        let renderer = Renderer::new(
            &mut imgui,
            device,
            queue,
            RendererConfig {
                texture_format: surface_format,
                ..Default::default()
            },
        );

        let settings_path = EditorSettings::default_path();
        let settings = EditorSettings::load_or_default(&settings_path);

        let mut content = ContentBrowserState::new();
        content.log("Editor started");

        Self {
            imgui,
            platform,
            renderer,
            frame_open: false,
            scene: None,
            selection: EditorSelection::new(),
            camera: EditorCamera::from_config(camera),
            scene_view: SceneViewRenderer::new(device),
            texture_id: None,
            pending_view_size: None,
            settings,
            settings_path,
            content,
            reset_layout: false,
            show_about: false,
            exit_requested: false,
            events: EditorEvents::default(),
        }
    }

    /// Forward a window event to imgui. Must run before the host handles it.
    pub fn handle_event(&mut self, window: &Window, event: &Event<()>) {
        self.platform
            .handle_event(self.imgui.io_mut(), window, event);
    }

    pub fn new_frame(&mut self, window: &Window) {
        if let Err(e) = self.platform.prepare_frame(self.imgui.io_mut(), window) {
            warn!(error = %e, "Failed to prepare imgui frame");
        }
    }

    /// Render the scene view, then build every panel and apply what they asked for
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
    ) {
        if let Some((width, height)) = self.pending_view_size.take() {
            if self.scene_view.resize(device, width, height) {
                self.texture_id =
                    self.scene_view
                        .register_texture(device, &mut self.renderer, self.texture_id);
            }
        }
        self.scene_view.render(encoder, queue, &self.camera);

        let ui = self.imgui.new_frame();
        self.frame_open = true;

        let display = ui.io().display_size;
        let menu_height = menu_bar_height(ui);
        let layout = DockLayout::compute(
            [0.0, menu_height],
            [display[0], (display[1] - menu_height).max(0.0)],
        );
        let reset = std::mem::take(&mut self.reset_layout);
        let place = |rect| Placement { rect, reset };

        let menu_actions = render_dock_space(ui, &mut self.settings.panels);

        let mut hierarchy_actions = Vec::new();
        let mut inspector = InspectorResponse::default();
        match self.scene.as_mut() {
            Some(scene) => {
                if self.settings.panels.hierarchy {
                    hierarchy_actions = render_hierarchy_panel(
                        ui,
                        scene,
                        &mut self.selection,
                        place(layout.hierarchy),
                        &mut self.settings.panels.hierarchy,
                    );
                }
                if self.settings.panels.inspector {
                    inspector = render_inspector_panel(
                        ui,
                        scene,
                        self.selection.selected(),
                        place(layout.inspector),
                        &mut self.settings.panels.inspector,
                    );
                }
            }
            None => {
                if self.settings.panels.hierarchy {
                    let placement = place(layout.hierarchy);
                    ui.window(HIERARCHY_WINDOW)
                        .position(placement.rect.pos, placement.condition())
                        .size(placement.rect.size, placement.condition())
                        .opened(&mut self.settings.panels.hierarchy)
                        .build(|| ui.text_disabled("No active scene"));
                }
            }
        }

        if self.settings.panels.content_browser {
            render_content_browser_panel(
                ui,
                &mut self.content,
                self.settings.thumbnail_size,
                place(layout.content_browser),
                &mut self.settings.panels.content_browser,
            );
        }

        let mut viewport = ViewportResponse::default();
        if self.settings.panels.viewport {
            viewport = render_viewport_panel(
                ui,
                self.texture_id,
                &mut self.camera,
                place(layout.viewport),
                &mut self.settings.panels.viewport,
            );
        }

        if std::mem::take(&mut self.show_about) {
            ui.open_popup(ABOUT_POPUP);
        }
        if let Some(_popup) = ui
            .modal_popup_config(ABOUT_POPUP)
            .always_auto_resize(true)
            .begin_popup()
        {
            ui.text(format!("Forge Editor {}", env!("CARGO_PKG_VERSION")));
            ui.text("Scene editor on wgpu and Dear ImGui");
            if ui.button("Close") {
                ui.close_current_popup();
            }
        }

        self.platform.prepare_render(ui, window);

        for action in menu_actions {
            self.handle_menu_action(action);
        }
        self.apply_actions(hierarchy_actions);

        self.events.record_inspector(&inspector);
        if let Some(index) = inspector.dropped {
            self.drop_on_inspector(index);
        }
        if let Some(index) = viewport.dropped {
            self.drop_on_viewport(index);
        }
        if viewport.requested_size.is_some() {
            self.pending_view_size = viewport.requested_size;
        }
    }

    /// Draw the imgui frame on top of `view`. Does nothing if [`draw`](Self::draw) was skipped.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        if !std::mem::take(&mut self.frame_open) {
            return;
        }
        let draw_data = self.imgui.render();

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ImGui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(e) = self.renderer.render(draw_data, queue, device, &mut pass) {
            warn!(error = ?e, "ImGui render failed");
        }
    }

    /// Apply hierarchy actions in order, recording what changed
    pub fn apply_actions(&mut self, actions: Vec<HierarchyAction>) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        for action in actions {
            match self.selection.apply(scene, action) {
                Ok(outcome) => {
                    record_outcome(&mut self.content, &mut self.events, &outcome)
                }
                Err(e) => {
                    warn!(error = %e, "Hierarchy action rejected");
                    self.content.log(format!("Error: {e}"));
                }
            }
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        debug!(?action, "Menu action");
        match action {
            MenuAction::NewScene => {
                self.set_active_scene(Scene::new());
                self.content.record("New scene");
            }
            MenuAction::OpenScene | MenuAction::SaveScene => {
                self.content.log("Scene files are not supported yet");
            }
            MenuAction::Undo | MenuAction::Redo => {
                self.content.log("Undo history is not available");
            }
            MenuAction::Exit => self.exit_requested = true,
            MenuAction::ResetLayout => {
                self.settings.panels = Default::default();
                self.reset_layout = true;
            }
            MenuAction::About => self.show_about = true,
        }
    }

    fn drop_on_inspector(&mut self, index: usize) {
        let (Some(scene), Some(target)) = (self.scene.as_mut(), self.selection.selected()) else {
            return;
        };
        let Some(asset) = self.content.asset(index).cloned() else {
            return;
        };
        if attach_script_asset(scene, target, &asset) {
            self.events.scripted.push(target);
            self.content
                .record(format!("Attached {} to {}", asset.stem(), target));
        } else {
            self.content
                .log(format!("{} is not a script", asset.name));
        }
    }

    fn drop_on_viewport(&mut self, index: usize) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(asset) = self.content.asset(index).cloned() else {
            return;
        };
        let id = spawn_from_asset(scene, &asset);
        self.selection.select(id);
        if asset.kind == AssetKind::Script {
            self.events.scripted.push(id);
        }
        self.content.record(format!("Created {} {}", asset.stem(), id));
    }

    /// Replace the active scene. Every entity of the old one is reported as destroyed.
    pub fn set_active_scene(&mut self, scene: Scene) {
        if let Some(old) = self.scene.replace(scene) {
            self.events
                .destroyed
                .extend(old.entities().iter().map(|entity| entity.id()));
        }
        self.selection.clear();
        info!("Active scene replaced");
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn selection(&self) -> &EditorSelection {
        &self.selection
    }

    pub fn take_events(&mut self) -> EditorEvents {
        std::mem::take(&mut self.events)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn camera(&self) -> &EditorCamera {
        &self.camera
    }

    pub fn scene_view(&self) -> &SceneViewRenderer {
        &self.scene_view
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn content(&self) -> &ContentBrowserState {
        &self.content
    }

    pub fn save_settings(&self) {
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            warn!(error = %e, "Failed to save editor settings");
        }
    }
}

/// Write an action outcome to the history and collect host events
fn record_outcome(content: &mut ContentBrowserState, events: &mut EditorEvents, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Created(id) => content.record(format!("Created entity {id}")),
        ActionOutcome::Destroyed { id, name } => {
            events.destroyed.push(*id);
            content.record(format!("Deleted {name}"));
        }
        ActionOutcome::Renamed { from, to, .. } => {
            content.record(format!("Renamed {from} to {to}"))
        }
        ActionOutcome::Reparented { child, parent } => match parent {
            Some(parent) => content.record(format!("Moved {child} under {parent}")),
            None => content.record(format!("Moved {child} to root")),
        },
        ActionOutcome::SelectionChanged | ActionOutcome::Unchanged => {}
    }
}

/// Tag `target` with the script class named by a script asset
pub fn attach_script_asset(scene: &mut Scene, target: EntityId, asset: &AssetEntry) -> bool {
    if asset.kind != AssetKind::Script {
        return false;
    }
    let Some(entity) = scene.get_mut(target) else {
        return false;
    };
    entity.add_script(asset.stem());
    true
}

/// Create a root entity named after an asset; script assets also tag it
pub fn spawn_from_asset(scene: &mut Scene, asset: &AssetEntry) -> EntityId {
    let id = scene.create_entity(asset.stem());
    if asset.kind == AssetKind::Script {
        if let Some(entity) = scene.get_mut(id) {
            entity.add_script(asset.stem());
        }
    }
    id
}
