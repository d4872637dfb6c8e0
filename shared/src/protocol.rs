use serde::{Deserialize, Serialize};

/// Status shown before anything else has happened
pub const INITIAL_STATUS: &str = "Initializing...";

/// Messages sent from the detector core to a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// Full state, sent when a renderer first attaches
    Snapshot {
        models_loaded: bool,
        status: String,
        is_laughing: bool,
    },
    /// Face models finished loading (or were reset)
    ModelsLoaded { loaded: bool },
    /// Human-readable status line changed
    Status { text: String },
    /// Laughing flag flipped
    Laughing { laughing: bool },
}

/// Commands sent from a rendering layer to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiCommand {
    /// End the current session and release the camera
    Logout,
}

/// The three observable values a renderer draws from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub models_loaded: bool,
    pub status: String,
    pub is_laughing: bool,
}

impl Default for UiSnapshot {
    fn default() -> Self {
        Self {
            models_loaded: false,
            status: INITIAL_STATUS.to_string(),
            is_laughing: false,
        }
    }
}

impl UiSnapshot {
    /// Message carrying the whole snapshot
    pub fn to_message(&self) -> UiMessage {
        UiMessage::Snapshot {
            models_loaded: self.models_loaded,
            status: self.status.clone(),
            is_laughing: self.is_laughing,
        }
    }

    /// Incremental messages that turn `self` into `next`
    pub fn diff(&self, next: &UiSnapshot) -> Vec<UiMessage> {
        let mut messages = Vec::new();
        if self.models_loaded != next.models_loaded {
            messages.push(UiMessage::ModelsLoaded {
                loaded: next.models_loaded,
            });
        }
        if self.status != next.status {
            messages.push(UiMessage::Status {
                text: next.status.clone(),
            });
        }
        if self.is_laughing != next.is_laughing {
            messages.push(UiMessage::Laughing {
                laughing: next.is_laughing,
            });
        }
        messages
    }
}
