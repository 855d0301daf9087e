use super::{HostIntegration, HostKind};
use crate::error::{HostError, HostResult};

/// The Office application the add-in was loaded into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeApplication {
    PowerPoint,
    Word,
    Excel,
    Other(String),
}

impl OfficeApplication {
    pub fn name(&self) -> &str {
        match self {
            Self::PowerPoint => "PowerPoint",
            Self::Word => "Word",
            Self::Excel => "Excel",
            Self::Other(name) => name,
        }
    }

    /// Parse an Office.js host name such as `"PowerPoint"`
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "PowerPoint" => Self::PowerPoint,
            "Word" => Self::Word,
            "Excel" => Self::Excel,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Office.js host as reported once the add-in is ready
#[derive(Debug, Clone)]
pub struct OfficeHost {
    present: bool,
    application: OfficeApplication,
    /// Whether the `PowerPointApi 1.5` requirement set is supported
    power_point_api_1_5: bool,
    subscribed: bool,
}

impl OfficeHost {
    pub fn new(application: OfficeApplication, power_point_api_1_5: bool) -> Self {
        Self {
            present: true,
            application,
            power_point_api_1_5,
            subscribed: false,
        }
    }

    /// Office.js is not loaded
    pub fn absent() -> Self {
        Self {
            present: false,
            application: OfficeApplication::Other(String::new()),
            power_point_api_1_5: false,
            subscribed: false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

impl HostIntegration for OfficeHost {
    fn kind(&self) -> HostKind {
        HostKind::Office
    }

    fn is_available(&self) -> bool {
        self.present
    }

    fn subscribe_slideshow_events(&mut self) -> HostResult<bool> {
        if self.application != OfficeApplication::PowerPoint {
            return Err(HostError::UnsupportedApplication(self.application.name().to_owned()));
        }
        if !self.power_point_api_1_5 {
            return Ok(false);
        }
        self.subscribed = true;
        Ok(true)
    }

    /// Office.js cannot report slideshow state; the add-in is only loaded
    /// while presenting, so assume a slideshow is running.
    fn slideshow_running(&self) -> HostResult<bool> {
        Ok(true)
    }
}
