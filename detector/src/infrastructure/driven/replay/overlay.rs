use std::sync::Mutex;
use tracing::{debug, trace};

use crate::application::ports::OverlaySurface;
use crate::domain::{FaceDetection, FrameSize};

/// Overlay without a screen: drawing calls are logged
#[derive(Default)]
pub struct LoggingOverlay {
    size: Mutex<Option<FrameSize>>,
}

impl LoggingOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlaySurface for LoggingOverlay {
    fn resize(&self, size: FrameSize) {
        if let Ok(mut current) = self.size.lock() {
            if *current != Some(size) {
                debug!("Overlay resized to {}x{}", size.width, size.height);
                *current = Some(size);
            }
        }
    }

    fn clear(&self) {
        trace!("Overlay cleared");
    }

    fn draw_detection(&self, detection: &FaceDetection) {
        let b = detection.bounding_box;
        trace!(
            "Face at ({:.0}, {:.0}) {:.0}x{:.0}, {} landmarks",
            b.x,
            b.y,
            b.width,
            b.height,
            detection.landmarks.len()
        );
    }
}
