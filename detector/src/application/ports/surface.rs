// Driven ports - Video and overlay surfaces, display refresh signal

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use super::camera::MediaStream;
use crate::domain::{FaceDetection, FrameSize};

/// One decoded frame handed to inference
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub sequence: u64,
    pub size: FrameSize,
    pub data: Bytes,
}

/// The element a camera stream is attached to
#[async_trait]
pub trait VideoSurface: Send + Sync {
    /// Sets or clears the stream the surface plays
    fn attach_stream(&self, stream: Option<Arc<dyn MediaStream>>);

    /// Resolves once the surface is playing. Dropping the future deregisters
    /// the listener.
    async fn playing(&self);

    /// Current frame, or `None` while no decoded frames are available yet
    fn capture_frame(&self) -> Option<VideoFrame>;

    /// Size the video is currently displayed at
    fn display_size(&self) -> FrameSize;
}

/// Drawing layer stacked on top of the video
pub trait OverlaySurface: Send + Sync {
    fn resize(&self, size: FrameSize);
    fn clear(&self);
    fn draw_detection(&self, detection: &FaceDetection);
}

/// Display-refresh aligned tick
#[async_trait]
pub trait FrameClock: Send + Sync {
    async fn next_frame(&self);
}
