use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use url::Url;

use super::ReadinessTracker;
use crate::application::ports::{ModelLoadError, ModelNet, ModelProvider};
use crate::domain::ModelReadiness;

/// Loads the detector, landmark and expression nets, once per process.
///
/// A failure is final: later calls report it without retrying.
pub struct ModelLoader {
    provider: Arc<dyn ModelProvider>,
    readiness: ReadinessTracker,
    weights_uri: Url,
    load_lock: Mutex<()>,
}

impl ModelLoader {
    pub fn new(provider: Arc<dyn ModelProvider>, readiness: ReadinessTracker, weights_uri: Url) -> Self {
        Self {
            provider,
            readiness,
            weights_uri,
            load_lock: Mutex::new(()),
        }
    }

    pub fn readiness(&self) -> &ReadinessTracker {
        &self.readiness
    }

    pub async fn ensure_loaded(&self) -> Result<(), ModelLoadError> {
        let _guard = self.load_lock.lock().await;
        match self.readiness.get() {
            ModelReadiness::Ready => return Ok(()),
            ModelReadiness::Failed => return Err(ModelLoadError::PreviouslyFailed),
            ModelReadiness::NotLoaded | ModelReadiness::Loading => {}
        }

        self.readiness.advance(ModelReadiness::Loading);
        info!("Loading face models from {}", self.weights_uri);

        for net in ModelNet::ALL {
            if let Err(e) = self.provider.load_from_uri(net, &self.weights_uri).await {
                error!("Error loading face models: {}", e);
                self.readiness.advance(ModelReadiness::Failed);
                return Err(e);
            }
            info!("Loaded {}", net);
        }

        self.readiness.advance(ModelReadiness::Ready);
        info!("Face models ready");
        Ok(())
    }
}
