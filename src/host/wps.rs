use super::{HostIntegration, HostKind};
use crate::error::{HostError, HostResult};

/// First WPS API version with `SlideShowBegin`/`SlideShowEnd` events
pub const WPS_MIN_EVENT_API_VERSION: u32 = 1000;

/// WPS Presentation host
#[derive(Debug, Clone)]
pub struct WpsHost {
    present: bool,
    api_version: u32,
    /// Open slideshow windows, `None` when the query fails
    slideshow_windows: Option<usize>,
}

impl WpsHost {
    pub fn new(api_version: u32, slideshow_windows: Option<usize>) -> Self {
        Self {
            present: true,
            api_version,
            slideshow_windows,
        }
    }

    /// The WPS API is not loaded
    pub fn absent() -> Self {
        Self {
            present: false,
            api_version: 0,
            slideshow_windows: None,
        }
    }
}

impl HostIntegration for WpsHost {
    fn kind(&self) -> HostKind {
        HostKind::Wps
    }

    fn is_available(&self) -> bool {
        self.present
    }

    fn subscribe_slideshow_events(&mut self) -> HostResult<bool> {
        Ok(self.api_version >= WPS_MIN_EVENT_API_VERSION)
    }

    fn slideshow_running(&self) -> HostResult<bool> {
        self.slideshow_windows
            .map(|count| count > 0)
            .ok_or_else(|| HostError::Api("Application.SlideShowWindows is unavailable".to_owned()))
    }
}
