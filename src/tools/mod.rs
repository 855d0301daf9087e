use egui::{Color32, CursorIcon};
use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;

/// The annotation tools offered by the overlay toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Arrow,
    #[default]
    Brush,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Arrow, Tool::Brush, Tool::Eraser];

    /// Return the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arrow => "Arrow",
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
        }
    }

    /// Icon shown on the toolbar button
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Arrow => "➡",
            Self::Brush => "🖌",
            Self::Eraser => "⌫",
        }
    }

    /// Cursor shown over the drawing surface while this tool is selected
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Self::Arrow | Self::Brush => CursorIcon::Crosshair,
            Self::Eraser => CursorIcon::Cell,
        }
    }
}

/// How stroke ends are rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    /// Segment ends flush with its endpoints
    Butt,
    /// Segment ends in a half disc around each endpoint
    Round,
}

/// Compositing applied when a stroke lands on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing pixels
    #[default]
    SourceOver,
    /// Remove existing pixels under the stroke
    DestinationOut,
}

/// Stroke style captured when a gesture begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: LineCap,
    pub composite: CompositeMode,
}

impl StrokeStyle {
    /// Solid ink with round caps and joins
    pub fn ink(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            composite: CompositeMode::SourceOver,
        }
    }

    /// Fully transparent stroke that removes whatever it passes over
    pub fn eraser(width: f32) -> Self {
        Self {
            color: Color32::TRANSPARENT,
            width,
            cap: LineCap::Round,
            composite: CompositeMode::DestinationOut,
        }
    }
}

/// Fixed widths and sizes the drawing engine uses for each tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub brush_width: f32,
    pub eraser_width: f32,
    pub arrow_width: f32,
    pub arrow_head_length: f32,
    pub preview_alpha: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            brush_width: 3.0,
            eraser_width: 20.0,
            arrow_width: 3.0,
            arrow_head_length: 15.0,
            preview_alpha: 0.7,
        }
    }
}

impl From<&OverlayConfig> for ToolSettings {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            brush_width: config.brush_width,
            eraser_width: config.eraser_width,
            arrow_width: config.arrow_width,
            arrow_head_length: config.arrow_head_length,
            preview_alpha: config.preview_alpha,
        }
    }
}

impl ToolSettings {
    /// The style a brush or eraser gesture captures at pointer-down.
    /// Arrows build their style at render time instead.
    pub fn style_for(&self, tool: Tool, color: Color32) -> Option<StrokeStyle> {
        match tool {
            Tool::Arrow => None,
            Tool::Brush => Some(StrokeStyle::ink(color, self.brush_width)),
            Tool::Eraser => Some(StrokeStyle::eraser(self.eraser_width)),
        }
    }
}
