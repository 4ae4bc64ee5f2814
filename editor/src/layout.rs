//! Fixed dock layout
//!
//! The editor splits the work area once: hierarchy on the left, inspector on
//! the right of what remains, content browser along the bottom of the centre
//! column and the viewport in the rest.

use serde::{Deserialize, Serialize};

/// Share of the work area width given to the hierarchy
pub const LEFT_SPLIT: f32 = 0.15;
/// Share of the remaining width given to the inspector
pub const RIGHT_SPLIT: f32 = 0.20;
/// Share of the centre column height given to the content browser
pub const BOTTOM_SPLIT: f32 = 0.25;

/// Axis-aligned screen rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn new(pos: [f32; 2], size: [f32; 2]) -> Self {
        Self { pos, size }
    }

    pub fn max(&self) -> [f32; 2] {
        [self.pos[0] + self.size[0], self.pos[1] + self.size[1]]
    }

    pub fn area(&self) -> f32 {
        self.size[0] * self.size[1]
    }

    /// Area shared with `other`; zero when they only touch
    pub fn overlap(&self, other: &Rect) -> f32 {
        let [ax, ay] = self.max();
        let [bx, by] = other.max();
        let w = ax.min(bx) - self.pos[0].max(other.pos[0]);
        let h = ay.min(by) - self.pos[1].max(other.pos[1]);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Where each panel sits in the default layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockLayout {
    pub hierarchy: Rect,
    pub inspector: Rect,
    pub content_browser: Rect,
    pub viewport: Rect,
}

impl DockLayout {
    /// Split the work area. Negative sizes are treated as empty.
    pub fn compute(work_pos: [f32; 2], work_size: [f32; 2]) -> Self {
        let [x, y] = work_pos;
        let width = work_size[0].max(0.0);
        let height = work_size[1].max(0.0);

        let left_w = width * LEFT_SPLIT;
        let rest_w = width - left_w;
        let right_w = rest_w * RIGHT_SPLIT;
        let centre_w = rest_w - right_w;
        let bottom_h = height * BOTTOM_SPLIT;
        let top_h = height - bottom_h;
        let centre_x = x + left_w;

        Self {
            hierarchy: Rect::new([x, y], [left_w, height]),
            inspector: Rect::new([centre_x + centre_w, y], [right_w, height]),
            content_browser: Rect::new([centre_x, y + top_h], [centre_w, bottom_h]),
            viewport: Rect::new([centre_x, y], [centre_w, top_h]),
        }
    }

    pub fn rects(&self) -> [Rect; 4] {
        [
            self.hierarchy,
            self.inspector,
            self.content_browser,
            self.viewport,
        ]
    }
}

/// Which panels are shown, toggled from the Window menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelVisibility {
    pub hierarchy: bool,
    pub inspector: bool,
    pub content_browser: bool,
    pub viewport: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            hierarchy: true,
            inspector: true,
            content_browser: true,
            viewport: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_layout_tiles_work_area() {
        let layout = DockLayout::compute([0.0, 20.0], [1600.0, 880.0]);
        let total: f32 = layout.rects().iter().map(Rect::area).sum();
        assert!((total - 1600.0 * 880.0).abs() < 1.0);

        let rects = layout.rects();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(a.overlap(b) < EPSILON, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_split_ratios() {
        let layout = DockLayout::compute([0.0, 0.0], [1000.0, 800.0]);
        assert!((layout.hierarchy.size[0] - 150.0).abs() < EPSILON);
        // 20% of the 850 left after the hierarchy
        assert!((layout.inspector.size[0] - 170.0).abs() < EPSILON);
        assert!((layout.viewport.size[0] - 680.0).abs() < EPSILON);
        assert!((layout.content_browser.size[1] - 200.0).abs() < EPSILON);
        assert!((layout.viewport.size[1] - 600.0).abs() < EPSILON);
    }

    #[test]
    fn test_layout_respects_work_origin() {
        let layout = DockLayout::compute([10.0, 25.0], [1000.0, 800.0]);
        assert_eq!(layout.hierarchy.pos, [10.0, 25.0]);
        assert!((layout.viewport.pos[0] - 160.0).abs() < EPSILON);
        assert!((layout.inspector.max()[0] - 1010.0).abs() < EPSILON);
        assert!((layout.content_browser.max()[1] - 825.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_work_area() {
        let layout = DockLayout::compute([0.0, 0.0], [-5.0, 0.0]);
        for rect in layout.rects() {
            assert_eq!(rect.area(), 0.0);
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new([0.0, 0.0], [10.0, 10.0]);
        let b = Rect::new([5.0, 5.0], [10.0, 10.0]);
        let c = Rect::new([10.0, 0.0], [5.0, 5.0]);
        assert_eq!(a.overlap(&b), 25.0);
        assert_eq!(a.overlap(&c), 0.0);
    }
}
