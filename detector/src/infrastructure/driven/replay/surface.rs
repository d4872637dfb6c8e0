use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::application::ports::{MediaStream, VideoFrame, VideoSurface};
use crate::domain::FrameSize;

/// Video surface fed by a replay stream.
///
/// Plays as soon as a stream is attached, withholds the first `warmup`
/// frames as a real decoder would, and ends after `limit` frames.
pub struct ReplaySurface {
    size: FrameSize,
    warmup: u64,
    limit: Option<u64>,
    polls: AtomicU64,
    delivered: AtomicU64,
    playing: watch::Sender<bool>,
    exhausted: watch::Sender<bool>,
    stream: Mutex<Option<Arc<dyn MediaStream>>>,
}

impl ReplaySurface {
    pub fn new(size: FrameSize, warmup: u64, limit: Option<u64>) -> Self {
        let (playing, _) = watch::channel(false);
        let (exhausted, _) = watch::channel(false);
        Self {
            size,
            warmup,
            limit,
            polls: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            playing,
            exhausted,
            stream: Mutex::new(None),
        }
    }

    /// Resolves once every frame up to the limit has been handed out and the
    /// loop came back for another. Never resolves without a limit.
    pub async fn finished(&self) {
        let mut rx = self.exhausted.subscribe();
        let _ = rx.wait_for(|done| *done).await;
    }

    fn stream_live(&self) -> bool {
        self.stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| s.active_tracks() > 0)
    }
}

#[async_trait]
impl VideoSurface for ReplaySurface {
    fn attach_stream(&self, stream: Option<Arc<dyn MediaStream>>) {
        let attached = stream.is_some();
        *self.stream.lock().unwrap_or_else(PoisonError::into_inner) = stream;
        self.polls.store(0, Ordering::SeqCst);
        self.playing.send_replace(attached);
    }

    async fn playing(&self) {
        let mut rx = self.playing.subscribe();
        let _ = rx.wait_for(|playing| *playing).await;
    }

    fn capture_frame(&self) -> Option<VideoFrame> {
        if !self.stream_live() {
            return None;
        }
        if self.polls.fetch_add(1, Ordering::SeqCst) < self.warmup {
            return None;
        }

        let sequence = self.delivered.load(Ordering::SeqCst);
        if self.limit.is_some_and(|limit| sequence >= limit) {
            self.exhausted.send_replace(true);
            return None;
        }
        self.delivered.fetch_add(1, Ordering::SeqCst);

        Some(VideoFrame {
            sequence,
            size: self.size,
            data: Bytes::new(),
        })
    }

    fn display_size(&self) -> FrameSize {
        self.size
    }
}
