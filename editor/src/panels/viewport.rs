//! Scene viewport panel
//!
//! Shows the off-screen scene view and forwards mouse wheel zoom to the editor
//! camera while the image is hovered.

use super::{Placement, CONTENT_ITEM_PAYLOAD, VIEWPORT_WINDOW};
use forge_engine::core::EditorCamera;
use imgui::{DragDropFlags, StyleVar, TextureId, WindowFlags};

/// What the viewport asked for during this frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewportResponse {
    /// Size of the image region, applied to the scene view next frame
    pub requested_size: Option<(i32, i32)>,
    /// Content browser item dropped onto the image
    pub dropped: Option<usize>,
    pub hovered: bool,
}

/// Render the viewport panel
pub fn render_viewport_panel(
    ui: &imgui::Ui,
    texture_id: Option<TextureId>,
    camera: &mut EditorCamera,
    placement: Placement,
    opened: &mut bool,
) -> ViewportResponse {
    let mut response = ViewportResponse::default();

    let padding = ui.push_style_var(StyleVar::WindowPadding([0.0, 0.0]));
    ui.window(VIEWPORT_WINDOW)
        .position(placement.rect.pos, placement.condition())
        .size(placement.rect.size, placement.condition())
        .opened(opened)
        .flags(WindowFlags::NO_SCROLLBAR | WindowFlags::NO_SCROLL_WITH_MOUSE)
        .build(|| {
            let region = ui.content_region_avail();
            response.requested_size = Some(viewport_size_from_region(region));
            let origin = ui.cursor_pos();

            match texture_id {
                Some(texture_id) => imgui::Image::new(texture_id, region).build(ui),
                None => ui.text_disabled("Scene view unavailable"),
            }

            response.hovered = ui.is_item_hovered();
            apply_viewport_input(camera, response.hovered, ui.io().mouse_wheel);

            if let Some(target) = ui.drag_drop_target() {
                if let Some(Ok(payload)) =
                    target.accept_payload::<usize, _>(CONTENT_ITEM_PAYLOAD, DragDropFlags::empty())
                {
                    response.dropped = Some(payload.data);
                }
                target.pop();
            }

            ui.set_cursor_pos([origin[0] + 10.0, origin[1] + 10.0]);
            ui.child_window("##viewport_overlay")
                .size([160.0, 48.0])
                .border(true)
                .flags(WindowFlags::NO_INPUTS | WindowFlags::NO_SCROLLBAR)
                .build(|| {
                    ui.text(format!("FPS: {:.1}", ui.io().framerate));
                    ui.text(format!("Zoom Dist: {:.2}", camera.distance()));
                });
        });
    padding.pop();

    response
}

/// Integer pixel size of a content region, never negative
pub fn viewport_size_from_region(region: [f32; 2]) -> (i32, i32) {
    let to_pixels = |v: f32| if v.is_finite() { v.max(0.0).floor() as i32 } else { 0 };
    (to_pixels(region[0]), to_pixels(region[1]))
}

/// Zoom the camera with the wheel, only while the viewport is hovered.
///
/// Returns `true` when the camera moved.
pub fn apply_viewport_input(camera: &mut EditorCamera, hovered: bool, wheel: f32) -> bool {
    if !hovered || wheel == 0.0 {
        return false;
    }
    let before = camera.distance();
    camera.zoom(wheel);
    camera.distance() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_size_from_region() {
        assert_eq!(viewport_size_from_region([800.7, 600.2]), (800, 600));
        assert_eq!(viewport_size_from_region([-5.0, 10.0]), (0, 10));
        assert_eq!(viewport_size_from_region([f32::INFINITY, 1.0]), (0, 1));
    }

    #[test]
    fn test_wheel_ignored_when_not_hovered() {
        let mut camera = EditorCamera::default();
        let before = camera.distance();
        assert!(!apply_viewport_input(&mut camera, false, 1.0));
        assert_eq!(camera.distance(), before);
    }

    #[test]
    fn test_wheel_zooms_when_hovered() {
        let mut camera = EditorCamera::default();
        assert!(apply_viewport_input(&mut camera, true, 1.0));
        assert!((camera.distance() - 0.936).abs() < 1e-5);
        assert!(!apply_viewport_input(&mut camera, true, 0.0));
    }
}
