use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;
use crate::tools::Tool;

/// Format an RGB triple as `#rrggbb`
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb` or `rrggbb` (any case) into an opaque color
pub fn hex_to_rgb(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Toolbar preferences restored between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarSettings {
    pub tool: Tool,
    pub color: String,
}

/// Tool and color selection state behind the overlay toolbar.
///
/// The drawing engine only reads `current_tool`/`current_color` when a
/// gesture starts, so changing them mid-gesture never affects ink already
/// being drawn.
#[derive(Debug, Clone)]
pub struct Toolbar {
    current_tool: Tool,
    current_color: Color32,
    palette: Vec<Color32>,
    /// Index into `palette` of the highlighted swatch, if the color came from one
    active_swatch: Option<usize>,
    /// Values of the red/green/blue sliders
    rgb: [u8; 3],
    visible: bool,
    more_menu_open: bool,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(Tool::Brush, Color32::from_rgb(255, 0, 0), Vec::new())
    }
}

impl Toolbar {
    pub fn new(tool: Tool, color: Color32, palette: Vec<Color32>) -> Self {
        let mut toolbar = Self {
            current_tool: tool,
            current_color: color,
            palette,
            active_swatch: None,
            rgb: [0, 0, 0],
            visible: false,
            more_menu_open: false,
        };
        toolbar.select_color(color);
        toolbar
    }

    /// Build the toolbar from a validated config
    pub fn from_config(config: &OverlayConfig) -> Self {
        let color = config.default_color().unwrap_or(Color32::from_rgb(255, 0, 0));
        let palette = config.palette_colors().unwrap_or_default();
        Self::new(config.default_tool, color, palette)
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    pub fn current_color(&self) -> Color32 {
        self.current_color
    }

    pub fn palette(&self) -> &[Color32] {
        &self.palette
    }

    pub fn active_swatch(&self) -> Option<usize> {
        self.active_swatch
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Color shown in the preview box next to the sliders
    pub fn preview_color(&self) -> Color32 {
        let [r, g, b] = self.rgb;
        Color32::from_rgb(r, g, b)
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.current_tool != tool {
            log::debug!("Tool selected: {}", tool.name());
        }
        self.current_tool = tool;
    }

    /// Select a color, typically from a palette swatch.
    ///
    /// Highlights the matching swatch and moves the sliders to the color.
    pub fn select_color(&mut self, color: Color32) {
        self.current_color = color;
        self.active_swatch = self.palette.iter().position(|swatch| *swatch == color);
        self.rgb = [color.r(), color.g(), color.b()];
    }

    /// Select a custom color from the RGB sliders; no swatch is highlighted
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.rgb = [r, g, b];
        self.current_color = Color32::from_rgb(r, g, b);
        self.active_swatch = None;
    }

    /// Hex form of the current color
    pub fn current_color_hex(&self) -> String {
        rgb_to_hex(self.current_color.r(), self.current_color.g(), self.current_color.b())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.more_menu_open = false;
    }

    pub fn is_more_menu_open(&self) -> bool {
        self.more_menu_open
    }

    pub fn toggle_more_menu(&mut self) {
        self.more_menu_open = !self.more_menu_open;
    }

    pub fn close_more_menu(&mut self) {
        self.more_menu_open = false;
    }

    /// A click landed somewhere on the page; close the menu unless it hit the menu itself
    pub fn handle_click(&mut self, inside_more_menu: bool) {
        if !inside_more_menu {
            self.close_more_menu();
        }
    }

    pub fn settings(&self) -> ToolbarSettings {
        ToolbarSettings {
            tool: self.current_tool,
            color: self.current_color_hex(),
        }
    }

    /// Restore saved preferences; an unparsable color keeps the current one
    pub fn apply_settings(&mut self, settings: &ToolbarSettings) {
        self.select_tool(settings.tool);
        match hex_to_rgb(&settings.color) {
            Some(color) => self.select_color(color),
            None => log::warn!("Ignoring saved color {:?}", settings.color),
        }
    }
}
