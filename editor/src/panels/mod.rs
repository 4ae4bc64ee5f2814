//! Editor UI panels
//!
//! Each panel is a free function drawing one imgui window. Panels that change
//! the scene hierarchy return actions instead of mutating it mid-frame.

pub mod content_browser;
pub mod dock_space;
pub mod hierarchy;
pub mod inspector;
pub mod viewport;

pub use content_browser::{render_content_browser_panel, ContentBrowserState};
pub use dock_space::{render_dock_space, MenuAction};
pub use hierarchy::render_hierarchy_panel;
pub use inspector::{render_inspector_panel, InspectorResponse};
pub use viewport::{render_viewport_panel, ViewportResponse};

use crate::layout::Rect;
use imgui::Condition;

/// Window names, also used as imgui ids
pub const HIERARCHY_WINDOW: &str = "Hierarchy";
pub const INSPECTOR_WINDOW: &str = "Inspector";
pub const CONTENT_BROWSER_WINDOW: &str = "Content Browser";
pub const VIEWPORT_WINDOW: &str = "Viewport";

/// Drag-drop payload type for hierarchy rows
pub const ENTITY_PAYLOAD: &str = "ENTITY_NODE";
/// Drag-drop payload type for content browser tiles
pub const CONTENT_ITEM_PAYLOAD: &str = "CONTENT_BROWSER_ITEM";

/// Where a panel window goes this frame
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub rect: Rect,
    /// Force the layout rectangle instead of only seeding it
    pub reset: bool,
}

impl Placement {
    pub fn condition(&self) -> Condition {
        if self.reset {
            Condition::Always
        } else {
            Condition::FirstUseEver
        }
    }
}
