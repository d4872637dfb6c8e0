use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use super::CameraBehaviour;
use crate::application::ports::{CameraError, CameraSource, MediaStream, StreamConstraints};

pub struct ReplayStream {
    id: String,
    tracks: AtomicUsize,
}

impl MediaStream for ReplayStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop_all_tracks(&self) {
        self.tracks.store(0, Ordering::SeqCst);
    }

    fn active_tracks(&self) -> usize {
        self.tracks.load(Ordering::SeqCst)
    }
}

/// Hands out one-track video streams, or refuses as the trace says
pub struct ReplayCamera {
    behaviour: CameraBehaviour,
    issued: AtomicU64,
}

impl ReplayCamera {
    pub fn new(behaviour: CameraBehaviour) -> Self {
        Self {
            behaviour,
            issued: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl CameraSource for ReplayCamera {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, CameraError> {
        match self.behaviour {
            CameraBehaviour::Denied => return Err(CameraError::PermissionDenied),
            CameraBehaviour::Unavailable => {
                return Err(CameraError::DeviceUnavailable(
                    "no replay device".to_string(),
                ))
            }
            CameraBehaviour::Granted => {}
        }
        if !constraints.video {
            return Err(CameraError::DeviceUnavailable(
                "replay only provides video".to_string(),
            ));
        }

        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ReplayStream {
            id: format!("replay-{n}"),
            tracks: AtomicUsize::new(1),
        }))
    }
}
