use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::ModelReadiness;

/// Observable model readiness shared by the loader and whoever gates on it
#[derive(Clone)]
pub struct ReadinessTracker {
    tx: Arc<watch::Sender<ModelReadiness>>,
}

impl ReadinessTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ModelReadiness::NotLoaded);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> ModelReadiness {
        *self.tx.borrow()
    }

    /// Applies a forward transition; backwards moves are ignored
    pub(crate) fn advance(&self, next: ModelReadiness) -> bool {
        self.tx.send_if_modified(|current| match current.advance(next) {
            Some(state) => {
                *current = state;
                true
            }
            None => false,
        })
    }
}

impl Default for ReadinessTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_is_sticky() {
        let tracker = ReadinessTracker::new();
        assert!(tracker.advance(ModelReadiness::Loading));
        assert!(tracker.advance(ModelReadiness::Ready));
        assert!(!tracker.advance(ModelReadiness::Failed));
        assert!(!tracker.advance(ModelReadiness::NotLoaded));
        assert_eq!(tracker.get(), ModelReadiness::Ready);
    }
}
