//! ImGui-based scene editor for the Forge engine
//!
//! Hosts the hierarchy, inspector, content browser and viewport panels over a
//! [`Scene`](forge_engine::core::scene::Scene), and renders the scene view into
//! an off-screen target the viewport panel displays.

pub mod editor_ui;
pub mod layout;
pub mod panels;
pub mod scene_view_renderer;
pub mod selection;
pub mod settings;

pub use editor_ui::{EditorEvents, EditorUi};
pub use layout::{DockLayout, PanelVisibility, Rect};
pub use scene_view_renderer::SceneViewRenderer;
pub use selection::{ActionOutcome, EditorSelection, HierarchyAction};
pub use settings::EditorSettings;
