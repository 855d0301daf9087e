use super::{HostIntegration, HostKind};
use crate::error::HostResult;

/// Standalone desktop window; there is no slideshow to follow, so the
/// overlay stays visible.
#[derive(Debug, Clone, Default)]
pub struct DesktopHost;

impl HostIntegration for DesktopHost {
    fn kind(&self) -> HostKind {
        HostKind::Desktop
    }

    fn is_available(&self) -> bool {
        true
    }

    fn subscribe_slideshow_events(&mut self) -> HostResult<bool> {
        Ok(false)
    }

    fn slideshow_running(&self) -> HostResult<bool> {
        Ok(true)
    }
}
