// Driven port - Camera device (output port)

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    User,
}

/// What to ask the device for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub video: bool,
    pub audio: bool,
    pub facing_mode: FacingMode,
}

impl StreamConstraints {
    /// Front camera, no audio
    pub fn front_camera() -> Self {
        Self {
            video: true,
            audio: false,
            facing_mode: FacingMode::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// A live capture stream; releasing it frees the device
pub trait MediaStream: Send + Sync {
    fn id(&self) -> &str;

    /// Stops every track. Safe to call more than once.
    fn stop_all_tracks(&self);

    fn active_tracks(&self) -> usize;
}

#[async_trait]
pub trait CameraSource: Send + Sync {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, CameraError>;
}
