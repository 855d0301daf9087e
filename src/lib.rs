#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod panels;
pub mod surface;
pub mod toolbar;
pub mod tools;

pub use app::OverlayApp;
pub use config::{ArrowPreviewMode, OverlayConfig};
pub use engine::{DrawingEngine, EngineEvent, EngineState, Gesture, transition};
pub use error::{ConfigError, HostError, MessageError};
pub use host::{HostEvent, HostIntegration, HostMessage, MessageChannel, OverlaySession, Visibility};
pub use input::{InputNormalizer, PointerPhase, PointerSample, RawInputEvent};
pub use surface::{DrawOp, Layer, Surface};
pub use toolbar::Toolbar;
pub use tools::{StrokeStyle, Tool, ToolSettings};
