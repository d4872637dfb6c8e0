use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use crate::application::ports::{
    CameraError, CameraSource, MediaStream, StreamConstraints, VideoSurface,
};

/// Owns the single camera stream attached to a video surface.
///
/// The stream is released on `stop`, on a new `start`, and when the controller
/// is dropped.
pub struct CameraController {
    source: Arc<dyn CameraSource>,
    surface: Arc<dyn VideoSurface>,
    active: Mutex<Option<Arc<dyn MediaStream>>>,
}

impl CameraController {
    pub fn new(source: Arc<dyn CameraSource>, surface: Arc<dyn VideoSurface>) -> Self {
        Self {
            source,
            surface,
            active: Mutex::new(None),
        }
    }

    /// Requests the front camera (video only) and attaches it to the surface
    pub async fn start(&self) -> Result<(), CameraError> {
        self.stop();

        let stream = self
            .source
            .request_stream(&StreamConstraints::front_camera())
            .await
            .map_err(|e| {
                error!("Camera error: {}", e);
                e
            })?;

        info!("Camera stream {} started", stream.id());
        self.surface.attach_stream(Some(Arc::clone(&stream)));
        *self.active() = Some(stream);
        Ok(())
    }

    /// Releases every track of the active stream. No-op without one.
    pub fn stop(&self) {
        let Some(stream) = self.active().take() else {
            return;
        };
        stream.stop_all_tracks();
        self.surface.attach_stream(None);
        info!("Camera stream {} released", stream.id());
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    fn active(&self) -> MutexGuard<'_, Option<Arc<dyn MediaStream>>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        self.stop();
    }
}
