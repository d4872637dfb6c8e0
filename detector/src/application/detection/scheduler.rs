//! The per-frame detection loop.
//!
//! Once the video surface reports it is playing, and after a short settling
//! delay, the loop repeatedly samples a frame, runs inference, draws the result
//! on the overlay and publishes the classification. Inference for a surface is
//! strictly sequential: the next tick is awaited only after the previous frame
//! has been fully handled, so slow inference lowers the frame rate instead of
//! building a backlog.
//!
//! Stopping cancels the playback wait and any pending tick. An inference call
//! already in flight runs to completion, but its result is discarded.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::UiState;
use crate::application::ports::{
    FrameClock, ModelProvider, OverlaySurface, VideoFrame, VideoSurface,
};
use crate::domain::classify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    WaitingForPlayback,
    WaitingForVideoReady,
    Detecting,
}

/// Everything one loop iteration touches
#[derive(Clone)]
pub struct DetectionContext {
    pub provider: Arc<dyn ModelProvider>,
    pub surface: Arc<dyn VideoSurface>,
    pub overlay: Arc<dyn OverlaySurface>,
    pub clock: Arc<dyn FrameClock>,
    pub ui: UiState,
    pub settle_delay: Duration,
}

struct RunningLoop {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

pub struct DetectionScheduler {
    ctx: DetectionContext,
    state: Arc<watch::Sender<LoopState>>,
    running: Option<RunningLoop>,
}

impl DetectionScheduler {
    pub fn new(ctx: DetectionContext) -> Self {
        let (state, _rx) = watch::channel(LoopState::Idle);
        Self {
            ctx,
            state: Arc::new(state),
            running: None,
        }
    }

    /// Spawns the loop, classifying faces under `display_name`.
    /// A loop that is already running is stopped first.
    pub fn start(&mut self, display_name: String) {
        if self.running.is_some() {
            warn!("Detection loop already running, restarting");
            self.stop();
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_detection_loop(
            self.ctx.clone(),
            display_name,
            Arc::clone(&self.state),
            cancel.clone(),
        ));
        self.running = Some(RunningLoop { cancel, task });
    }

    /// Cancels the loop. Does not wait for an in-flight inference call.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel.cancel();
            self.state.send_replace(LoopState::Idle);
            debug!("Detection loop cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.cancel.is_cancelled() && !r.task.is_finished())
    }

    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }
}

impl Drop for DetectionScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

enum FrameOutcome {
    Classified,
    Failed,
    Discarded,
}

async fn run_detection_loop(
    ctx: DetectionContext,
    display_name: String,
    state: Arc<watch::Sender<LoopState>>,
    cancel: CancellationToken,
) {
    let set_state = |next: LoopState| {
        if !cancel.is_cancelled() {
            state.send_if_modified(|s| std::mem::replace(s, next) != next);
        }
    };

    set_state(LoopState::WaitingForPlayback);
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = ctx.surface.playing() => {}
    }
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = tokio::time::sleep(ctx.settle_delay) => {}
    }
    info!("Detection loop started for {}", display_name);

    let mut frames = 0u64;
    let mut failures = 0u64;
    loop {
        set_state(LoopState::WaitingForVideoReady);
        if let Some(frame) = ctx.surface.capture_frame() {
            set_state(LoopState::Detecting);
            match detect_frame(&ctx, &display_name, frame, &cancel).await {
                FrameOutcome::Classified => frames += 1,
                FrameOutcome::Failed => failures += 1,
                FrameOutcome::Discarded => break,
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ctx.clock.next_frame() => {}
        }
    }

    info!(
        "Detection loop for {} stopped after {} frames ({} failed)",
        display_name, frames, failures
    );
}

async fn detect_frame(
    ctx: &DetectionContext,
    display_name: &str,
    frame: VideoFrame,
    cancel: &CancellationToken,
) -> FrameOutcome {
    ctx.overlay.resize(frame.size);

    let result = ctx.provider.detect_single_face(&frame).await;
    if cancel.is_cancelled() {
        debug!("Surface torn down, discarding frame {}", frame.sequence);
        return FrameOutcome::Discarded;
    }

    ctx.overlay.clear();
    match result {
        Ok(detection) => {
            if let Some(face) = &detection {
                ctx.overlay
                    .draw_detection(&face.resized(ctx.surface.display_size()));
                if let Some((name, p)) = face.expressions.dominant() {
                    debug!("Frame {}: dominant expression {} ({:.2})", frame.sequence, name, p);
                }
            }
            ctx.ui.publish(&classify(detection.as_ref(), display_name));
            FrameOutcome::Classified
        }
        Err(e) => {
            error!("Detection error on frame {}: {}", frame.sequence, e);
            ctx.ui.publish_failure();
            FrameOutcome::Failed
        }
    }
}
