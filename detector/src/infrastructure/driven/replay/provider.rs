use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::ReplayTrace;
use crate::application::ports::{InferenceError, ModelLoadError, ModelNet, ModelProvider, VideoFrame};
use crate::domain::FaceDetection;

/// Answers inference from a recorded trace, with a fixed per-frame latency
pub struct ReplayModelProvider {
    trace: Arc<ReplayTrace>,
    latency: Duration,
}

impl ReplayModelProvider {
    pub fn new(trace: Arc<ReplayTrace>, latency: Duration) -> Self {
        Self { trace, latency }
    }
}

#[async_trait]
impl ModelProvider for ReplayModelProvider {
    async fn load_from_uri(&self, net: ModelNet, uri: &Url) -> Result<(), ModelLoadError> {
        debug!("Replay provider skipping download of {} from {}", net, uri);
        Ok(())
    }

    async fn detect_single_face(
        &self,
        frame: &VideoFrame,
    ) -> Result<Option<FaceDetection>, InferenceError> {
        tokio::time::sleep(self.latency).await;
        self.trace.detection(frame.sequence).map_err(InferenceError)
    }
}
