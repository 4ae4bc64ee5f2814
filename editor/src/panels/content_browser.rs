//! Content browser panel
//!
//! Placeholder asset catalogue with a folder tree, search box and tile grid,
//! plus the editor console and action history tabs.

use super::{Placement, CONTENT_BROWSER_WINDOW, CONTENT_ITEM_PAYLOAD};
use std::collections::VecDeque;
use std::path::Path;

const TILE_PADDING: f32 = 8.0;
const MAX_LOG_LINES: usize = 256;

/// Kind of asset, one per content folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Model,
    Texture,
    Material,
    Script,
    Audio,
    Prefab,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Model,
        AssetKind::Texture,
        AssetKind::Material,
        AssetKind::Script,
        AssetKind::Audio,
        AssetKind::Prefab,
    ];

    pub fn folder(self) -> &'static str {
        match self {
            AssetKind::Model => "Models",
            AssetKind::Texture => "Textures",
            AssetKind::Material => "Materials",
            AssetKind::Script => "Scripts",
            AssetKind::Audio => "Audio",
            AssetKind::Prefab => "Prefabs",
        }
    }

    /// Short tag drawn on the tile in place of a thumbnail
    fn badge(self) -> &'static str {
        match self {
            AssetKind::Model => "MDL",
            AssetKind::Texture => "TEX",
            AssetKind::Material => "MAT",
            AssetKind::Script => "SCR",
            AssetKind::Audio => "SFX",
            AssetKind::Prefab => "PFB",
        }
    }

    /// Guess the kind from a file extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "fbx" | "obj" | "gltf" | "glb" => Some(AssetKind::Model),
            "png" | "jpg" | "jpeg" | "tga" => Some(AssetKind::Texture),
            "mat" => Some(AssetKind::Material),
            "cs" => Some(AssetKind::Script),
            "wav" | "ogg" | "mp3" => Some(AssetKind::Audio),
            "json" | "prefab" => Some(AssetKind::Prefab),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub name: String,
    pub kind: AssetKind,
}

impl AssetEntry {
    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}

fn placeholder_assets() -> Vec<AssetEntry> {
    [
        "Character_01.fbx",
        "grass_texture.png",
        "metal.mat",
        "PlayerController.cs",
        "Jump.wav",
        "MainScene.json",
    ]
    .into_iter()
    .filter_map(|name| {
        AssetKind::from_file_name(name).map(|kind| AssetEntry {
            name: name.to_string(),
            kind,
        })
    })
    .collect()
}

/// UI state of the content browser, including the console and history logs
#[derive(Debug)]
pub struct ContentBrowserState {
    pub search: String,
    /// `None` shows every folder
    pub selected_folder: Option<AssetKind>,
    assets: Vec<AssetEntry>,
    console: VecDeque<String>,
    history: VecDeque<String>,
}

impl Default for ContentBrowserState {
    fn default() -> Self {
        Self {
            search: String::new(),
            selected_folder: None,
            assets: placeholder_assets(),
            console: VecDeque::new(),
            history: VecDeque::new(),
        }
    }
}

impl ContentBrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[AssetEntry] {
        &self.assets
    }

    pub fn asset(&self, index: usize) -> Option<&AssetEntry> {
        self.assets.get(index)
    }

    /// Append a line to the console tab
    pub fn log(&mut self, line: impl Into<String>) {
        push_capped(&mut self.console, line.into());
    }

    /// Append a line to the history tab
    pub fn record(&mut self, line: impl Into<String>) {
        push_capped(&mut self.history, line.into());
    }

    pub fn console(&self) -> &VecDeque<String> {
        &self.console
    }

    pub fn history(&self) -> &VecDeque<String> {
        &self.history
    }
}

/// Oldest lines fall off once the log is full
fn push_capped(lines: &mut VecDeque<String>, line: String) {
    while lines.len() >= MAX_LOG_LINES {
        lines.pop_front();
    }
    lines.push_back(line);
}

/// Indices of assets in `folder` whose name contains `search`, ignoring case
pub fn filter_assets(assets: &[AssetEntry], folder: Option<AssetKind>, search: &str) -> Vec<usize> {
    let needle = search.trim().to_lowercase();
    assets
        .iter()
        .enumerate()
        .filter(|(_, asset)| folder.is_none_or(|kind| asset.kind == kind))
        .filter(|(_, asset)| needle.is_empty() || asset.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// How many tiles fit on one row, at least one
pub fn grid_columns(width: f32, thumbnail: f32, padding: f32) -> usize {
    let cell = thumbnail + padding;
    if cell <= 0.0 || !width.is_finite() {
        return 1;
    }
    ((width / cell).floor() as usize).max(1)
}

/// Render the content browser panel
pub fn render_content_browser_panel(
    ui: &imgui::Ui,
    state: &mut ContentBrowserState,
    thumbnail_size: f32,
    placement: Placement,
    opened: &mut bool,
) {
    ui.window(CONTENT_BROWSER_WINDOW)
        .position(placement.rect.pos, placement.condition())
        .size(placement.rect.size, placement.condition())
        .opened(opened)
        .build(|| {
            let Some(_tabs) = ui.tab_bar("##content_tabs") else {
                return;
            };
            if let Some(_tab) = ui.tab_item("Assets") {
                draw_assets_tab(ui, state, thumbnail_size);
            }
            if let Some(_tab) = ui.tab_item("Console") {
                if ui.small_button("Clear") {
                    state.console.clear();
                }
                draw_lines(ui, "##console_lines", &state.console);
            }
            if let Some(_tab) = ui.tab_item("History") {
                draw_lines(ui, "##history_lines", &state.history);
            }
        });
}

fn draw_assets_tab(ui: &imgui::Ui, state: &mut ContentBrowserState, thumbnail_size: f32) {
    ui.columns(2, "##content_split", true);
    ui.set_column_width(0, 160.0);

    if ui
        .selectable_config("All")
        .selected(state.selected_folder.is_none())
        .build()
    {
        state.selected_folder = None;
    }
    for kind in AssetKind::ALL {
        if ui
            .selectable_config(kind.folder())
            .selected(state.selected_folder == Some(kind))
            .build()
        {
            state.selected_folder = Some(kind);
        }
    }

    ui.next_column();

    ui.input_text("##search", &mut state.search)
        .hint("Search...")
        .build();

    let visible = filter_assets(&state.assets, state.selected_folder, &state.search);
    ui.child_window("##asset_grid").build(|| {
        if visible.is_empty() {
            ui.text_disabled("No assets");
            return;
        }

        let columns = grid_columns(ui.content_region_avail()[0], thumbnail_size, TILE_PADDING);
        ui.columns(columns as i32, "##asset_tiles", false);
        for index in visible {
            let asset = &state.assets[index];
            let id_label = format!("asset_{index}");
            let _id = ui.push_id(&id_label);

            ui.button_with_size(asset.kind.badge(), [thumbnail_size, thumbnail_size]);
            if let Some(_tooltip) = ui
                .drag_drop_source_config(CONTENT_ITEM_PAYLOAD)
                .begin_payload(index)
            {
                ui.text(&asset.name);
            }
            let wrap = ui.push_text_wrap_pos_with_pos(ui.cursor_pos()[0] + thumbnail_size);
            ui.text(&asset.name);
            wrap.end();
            ui.next_column();
        }
        ui.columns(1, "##asset_tiles_end", false);
    });

    ui.columns(1, "##content_split_end", false);
}

fn draw_lines(ui: &imgui::Ui, id: &str, lines: &VecDeque<String>) {
    ui.child_window(id).border(true).build(|| {
        for line in lines {
            ui.text(line);
        }
        if ui.scroll_y() >= ui.scroll_max_y() {
            ui.set_scroll_here_y_with_ratio(1.0);
        }
    });
}
