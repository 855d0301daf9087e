mod bridge;
mod desktop;
mod message;
mod office;
mod wps;

pub use bridge::{HOST_ATTRIBUTE, hosts_from_attributes};
pub use desktop::DesktopHost;
pub use message::{HostMessage, MessageChannel};
pub use office::{OfficeApplication, OfficeHost};
pub use wps::{WPS_MIN_EVENT_API_VERSION, WpsHost};

use crate::engine::DrawingEngine;
use crate::error::{HostError, HostResult};

/// Shown instead of the overlay when no supported host was found
pub const UNSUPPORTED_HOST_MESSAGE: &str =
    "This add-in only works in Office PowerPoint or WPS Presentation and cannot run as a standalone page.";

/// Which presentation host an integration talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Office,
    Wps,
    Desktop,
}

impl HostKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Office => "Office PowerPoint",
            Self::Wps => "WPS Presentation",
            Self::Desktop => "Desktop",
        }
    }
}

/// Capabilities a presentation host offers the overlay.
///
/// Implementations are injected when the session is created; the overlay
/// never probes for host globals itself.
pub trait HostIntegration {
    fn kind(&self) -> HostKind;

    /// Whether this host's API is present in the current environment
    fn is_available(&self) -> bool;

    /// Register for slideshow begin/end.
    /// `Ok(false)` means this host build has no slideshow events.
    fn subscribe_slideshow_events(&mut self) -> HostResult<bool>;

    /// Whether a slideshow is running right now
    fn slideshow_running(&self) -> HostResult<bool>;

    /// The overlay became visible and accepts input
    fn on_show(&mut self) {}

    /// The overlay was hidden and rejects input
    fn on_hide(&mut self) {}

    /// The overlay surface was erased
    fn on_clear(&mut self) {}
}

/// Lifecycle events delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    SlideShowBegin,
    SlideShowEnd,
    Message(HostMessage),
}

/// Whether the overlay is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    /// No supported host; permanent for the session
    Unsupported,
}

/// Connects the overlay to its presentation host and tracks visibility
pub struct OverlaySession {
    host: Option<Box<dyn HostIntegration>>,
    visibility: Visibility,
}

impl std::fmt::Debug for OverlaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlaySession")
            .field("host", &self.host.as_ref().map(|host| host.kind()))
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl OverlaySession {
    /// Attach to the first available host among `candidates`.
    ///
    /// Hosts whose API fails during setup fall back to an always-visible
    /// overlay. Without any usable host the session is unsupported.
    pub fn attach(candidates: Vec<Box<dyn HostIntegration>>) -> Self {
        let Some(mut host) = candidates.into_iter().find(|host| host.is_available()) else {
            log::error!("No supported presentation host detected");
            return Self::unsupported();
        };

        let kind = host.kind();
        let visibility = match host.subscribe_slideshow_events() {
            Ok(true) => match host.slideshow_running() {
                Ok(true) => Visibility::Visible,
                Ok(false) => Visibility::Hidden,
                Err(err) => {
                    log::error!("Failed to query slideshow state on {}: {err}", kind.name());
                    Visibility::Visible
                }
            },
            Ok(false) => {
                log::info!("{} has no slideshow events, keeping the overlay visible", kind.name());
                Visibility::Visible
            }
            Err(HostError::UnsupportedApplication(app)) => {
                log::error!("Overlay loaded in {app}, which is not supported");
                return Self::unsupported();
            }
            Err(err) => {
                log::error!("Failed to subscribe to slideshow events on {}: {err}", kind.name());
                Visibility::Visible
            }
        };

        log::info!("Overlay attached to {}", kind.name());
        let mut session = Self {
            host: Some(host),
            visibility: Visibility::Hidden,
        };
        match visibility {
            Visibility::Visible => session.on_surface_show(),
            _ => session.on_surface_hide(),
        }
        session
    }

    fn unsupported() -> Self {
        Self {
            host: None,
            visibility: Visibility::Unsupported,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn host_kind(&self) -> Option<HostKind> {
        self.host.as_ref().map(|host| host.kind())
    }

    /// Whether pointer input should reach the normalizer
    pub fn accepts_input(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_supported(&self) -> bool {
        self.visibility != Visibility::Unsupported
    }

    pub fn on_surface_show(&mut self) {
        if let Some(host) = self.host.as_mut() {
            self.visibility = Visibility::Visible;
            host.on_show();
        }
    }

    pub fn on_surface_hide(&mut self) {
        if let Some(host) = self.host.as_mut() {
            self.visibility = Visibility::Hidden;
            host.on_hide();
        }
    }

    pub fn on_surface_clear(&mut self, engine: &mut DrawingEngine) {
        engine.clear();
        if let Some(host) = self.host.as_mut() {
            host.on_clear();
        }
    }

    pub fn handle_event(&mut self, event: HostEvent, engine: &mut DrawingEngine) {
        match event {
            HostEvent::SlideShowBegin | HostEvent::Message(HostMessage::SlideShowBegin) => {
                log::info!("Slideshow started");
                self.on_surface_show();
            }
            HostEvent::SlideShowEnd | HostEvent::Message(HostMessage::SlideShowEnd) => {
                log::info!("Slideshow ended");
                engine.cancel_gesture();
                self.on_surface_hide();
                self.on_surface_clear(engine);
            }
            HostEvent::Message(HostMessage::ClearCanvas) => self.on_surface_clear(engine),
            HostEvent::Message(HostMessage::Unknown) => {
                log::debug!("Ignoring unknown host message");
            }
        }
    }
}
