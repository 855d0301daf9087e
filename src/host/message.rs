use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::MessageError;

/// Commands the host page can post to the overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostMessage {
    /// `{"action": "clearCanvas"}`
    ClearCanvas,
    /// Slideshow lifecycle forwarded by the page-side host bridge
    SlideShowBegin,
    SlideShowEnd,
    /// Any action this overlay does not know; ignored
    #[serde(other)]
    Unknown,
}

impl HostMessage {
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Cross-window message queue.
///
/// Clones share one queue: the host side posts raw payloads from any
/// thread and the overlay drains them once per frame, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MessageChannel {
    queue: Arc<Mutex<VecDeque<String>>>,
}

impl MessageChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a raw JSON payload
    pub fn post(&self, raw: impl Into<String>) {
        self.queue.lock().push_back(raw.into());
    }

    /// Serialize and post a message
    pub fn post_message(&self, message: &HostMessage) -> Result<(), MessageError> {
        self.post(serde_json::to_string(message)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Take every pending message. Malformed payloads are logged and dropped.
    pub fn drain(&self) -> Vec<HostMessage> {
        let pending: Vec<String> = self.queue.lock().drain(..).collect();
        pending
            .into_iter()
            .filter_map(|raw| match HostMessage::parse(&raw) {
                Ok(message) => Some(message),
                Err(err) => {
                    log::warn!("Dropping host message {raw:?}: {err}");
                    None
                }
            })
            .collect()
    }
}
