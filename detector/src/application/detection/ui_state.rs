use shared::UiSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

use super::status;
use crate::domain::ClassificationResult;

/// Observable status, laughing flag and models-loaded flag.
///
/// Renderers subscribe; only the detector and its loop write.
#[derive(Clone)]
pub struct UiState {
    tx: Arc<watch::Sender<UiSnapshot>>,
}

impl UiState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(UiSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> UiSnapshot {
        self.tx.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.tx.borrow().status.clone()
    }

    pub fn is_laughing(&self) -> bool {
        self.tx.borrow().is_laughing
    }

    pub fn set_status(&self, text: &str) {
        self.tx.send_if_modified(|s| replace(&mut s.status, text));
    }

    pub fn set_models_loaded(&self, loaded: bool) {
        self.tx.send_if_modified(|s| {
            let changed = s.models_loaded != loaded;
            s.models_loaded = loaded;
            changed
        });
    }

    pub fn publish(&self, result: &ClassificationResult) {
        self.tx.send_if_modified(|s| {
            let laughing_changed = s.is_laughing != result.is_laughing;
            s.is_laughing = result.is_laughing;
            replace(&mut s.status, &result.status_text) || laughing_changed
        });
    }

    /// Back to the state a fresh session starts from
    pub fn reset(&self) {
        self.tx.send_if_modified(|s| {
            let fresh = UiSnapshot::default();
            if *s == fresh {
                return false;
            }
            *s = fresh;
            true
        });
    }

    /// A frame could not be processed
    pub fn publish_failure(&self) {
        self.publish(&ClassificationResult {
            is_laughing: false,
            status_text: status::DETECTION_FAILED.to_string(),
        });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

fn replace(slot: &mut String, text: &str) -> bool {
    if slot == text {
        return false;
    }
    slot.clear();
    slot.push_str(text);
    true
}
