use std::time::Duration;

use egui::{Rect, TextureHandle, TextureId, TextureOptions};

use crate::config::OverlayConfig;
use crate::engine::DrawingEngine;
use crate::host::{HostEvent, HostIntegration, HostMessage, MessageChannel, OverlaySession};
use crate::input::{InputHandler, InputNormalizer, MouseKind, RawInputEvent, TouchKind};
use crate::panels;
use crate::toolbar::{Toolbar, ToolbarSettings};

/// Storage key for toolbar preferences
const TOOLBAR_KEY: &str = "slide_ink_toolbar";

/// How often to wake up and look for host messages posted from elsewhere
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The overlay window: toolbar, drawing surface and host session
pub struct OverlayApp {
    engine: DrawingEngine,
    toolbar: Toolbar,
    session: OverlaySession,
    normalizer: InputNormalizer,
    input: InputHandler,
    messages: MessageChannel,
    texture: Option<TextureHandle>,
    /// Engine revision currently uploaded to `texture`
    uploaded_revision: Option<u64>,
}

impl OverlayApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &OverlayConfig,
        hosts: Vec<Box<dyn HostIntegration>>,
        messages: MessageChannel,
    ) -> Self {
        let mut app = Self::with_session(config, OverlaySession::attach(hosts), messages);

        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<ToolbarSettings>(storage, TOOLBAR_KEY) {
                app.toolbar.apply_settings(&settings);
            }
        }
        app
    }

    /// Build the app around an already attached session
    pub fn with_session(config: &OverlayConfig, session: OverlaySession, messages: MessageChannel) -> Self {
        let mut app = Self {
            engine: DrawingEngine::from_config(config, 1, 1),
            toolbar: Toolbar::from_config(config),
            session,
            normalizer: InputNormalizer::new(),
            input: InputHandler::new(),
            messages,
            texture: None,
            uploaded_revision: None,
        };
        app.sync_toolbar();
        app
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut Toolbar {
        &mut self.toolbar
    }

    pub fn session(&self) -> &OverlaySession {
        &self.session
    }

    /// Handle for posting host messages into this overlay
    pub fn messages(&self) -> MessageChannel {
        self.messages.clone()
    }

    pub fn handle_host_event(&mut self, event: HostEvent) {
        self.session.handle_event(event, &mut self.engine);
        self.sync_toolbar();
    }

    /// Apply every pending cross-window message
    pub fn process_messages(&mut self) {
        for message in self.messages.drain() {
            self.handle_host_event(HostEvent::Message(message));
        }
    }

    /// Match the surface to the on-screen canvas
    pub fn resize_surface(&mut self, rect: Rect) {
        let width = (rect.width().round() as u32).max(1);
        let height = (rect.height().round() as u32).max(1);
        self.engine.resize(width, height);
    }

    /// Feed raw events through the normalizer into the engine.
    ///
    /// Presses only count when they start on the surface
    /// (`presses_allowed`); a mouse leaving the surface ends the gesture.
    pub fn handle_raw_input(&mut self, events: &[RawInputEvent], surface_rect: Rect, presses_allowed: bool) {
        if !self.session.accepts_input() {
            return;
        }

        for event in events {
            let event = match event {
                RawInputEvent::Mouse {
                    kind: MouseKind::Down,
                    client,
                } if !presses_allowed || !surface_rect.contains(*client) => continue,
                RawInputEvent::Mouse {
                    kind: MouseKind::Move,
                    client,
                } if !surface_rect.contains(*client) => RawInputEvent::Mouse {
                    kind: MouseKind::Leave,
                    client: *client,
                },
                RawInputEvent::Touch {
                    kind: TouchKind::Start,
                    touches,
                    ..
                } if !presses_allowed || !touches.first().is_some_and(|pos| surface_rect.contains(*pos)) => {
                    continue;
                }
                other => other.clone(),
            };

            if let Some(sample) = self.normalizer.normalize(&event, surface_rect) {
                self.engine.handle_sample(
                    sample,
                    self.toolbar.current_tool(),
                    self.toolbar.current_color(),
                );
            }
        }
    }

    pub(crate) fn collect_input(&mut self, ctx: &egui::Context) -> Vec<RawInputEvent> {
        self.input.process_input(ctx)
    }

    /// Upload the surface if it changed and return its texture
    pub(crate) fn surface_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let revision = self.engine.revision();
        if let Some(texture) = self.texture.as_mut() {
            if self.uploaded_revision != Some(revision) {
                texture.set(self.engine.surface().to_color_image(), TextureOptions::NEAREST);
                self.uploaded_revision = Some(revision);
            }
            return texture.id();
        }

        let texture = ctx.load_texture(
            "overlay-surface",
            self.engine.surface().to_color_image(),
            TextureOptions::NEAREST,
        );
        let id = texture.id();
        self.texture = Some(texture);
        self.uploaded_revision = Some(revision);
        id
    }

    pub(crate) fn clear_surface(&mut self) {
        self.handle_host_event(HostEvent::Message(HostMessage::ClearCanvas));
    }

    fn sync_toolbar(&mut self) {
        if self.session.accepts_input() {
            self.toolbar.show();
        } else {
            self.toolbar.hide();
            self.normalizer.reset();
            self.engine.cancel_gesture();
        }
    }
}

impl eframe::App for OverlayApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOLBAR_KEY, &self.toolbar.settings());
    }

    /// Keep the window see-through so the slides show under the ink
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        if !self.session.is_supported() {
            panels::unsupported_panel(ctx);
            return;
        }

        if self.toolbar.is_visible() {
            panels::toolbar_panel(self, ctx);
        }
        panels::canvas_panel(self, ctx);

        ctx.request_repaint_after(MESSAGE_POLL_INTERVAL);
    }
}
