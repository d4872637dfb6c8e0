//! Scripted fakes for the detection ports.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{watch, Semaphore};
use url::Url;

use crate::application::ports::*;
use crate::domain::expression::HAPPY;
use crate::domain::{BoundingBox, Expressions, FaceDetection, FrameSize, Point};

pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Gives spawned tasks a chance to run
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

pub fn face_with_happy(happy: f64) -> FaceDetection {
    FaceDetection {
        image_size: FrameSize::new(640, 480),
        bounding_box: BoundingBox {
            x: 200.0,
            y: 120.0,
            width: 240.0,
            height: 260.0,
        },
        landmarks: vec![Point { x: 280.0, y: 200.0 }, Point { x: 360.0, y: 200.0 }],
        expressions: Expressions::new()
            .with(HAPPY, happy)
            .with("neutral", 1.0 - happy),
    }
}

/// Inference that blocks until the test releases permits, one per call
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Option<FaceDetection>, InferenceError>>>,
    permits: Semaphore,
    failing_nets: Mutex<HashSet<ModelNet>>,
    loads: Mutex<Vec<ModelNet>>,
    started: AtomicUsize,
    finished: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            permits: Semaphore::new(0),
            failing_nets: Mutex::new(HashSet::new()),
            loads: Mutex::new(Vec::new()),
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Queues the result of a future call; an empty script yields `Ok(None)`
    pub fn push(&self, result: Result<Option<FaceDetection>, InferenceError>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn release(&self, calls: usize) {
        self.permits.add_permits(calls);
    }

    pub fn fail_load(&self, net: ModelNet) {
        self.failing_nets.lock().unwrap().insert(net);
    }

    pub fn loads(&self) -> Vec<ModelNet> {
        self.loads.lock().unwrap().clone()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn load_from_uri(&self, net: ModelNet, uri: &Url) -> Result<(), ModelLoadError> {
        self.loads.lock().unwrap().push(net);
        if self.failing_nets.lock().unwrap().contains(&net) {
            return Err(ModelLoadError::Load {
                net,
                uri: uri.to_string(),
                reason: "404 Not Found".to_string(),
            });
        }
        Ok(())
    }

    async fn detect_single_face(
        &self,
        _frame: &VideoFrame,
    ) -> Result<Option<FaceDetection>, InferenceError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.permits.acquire().await.unwrap().forget();
        let result = self.script.lock().unwrap().pop_front().unwrap_or(Ok(None));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.finished.fetch_add(1, Ordering::SeqCst);
        result
    }
}

pub struct FakeStream {
    id: String,
    tracks: AtomicUsize,
}

impl FakeStream {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tracks: AtomicUsize::new(1),
        }
    }
}

impl MediaStream for FakeStream {
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

pub struct FakeCamera {
    denial: Mutex<Option<CameraError>>,
    streams: Mutex<Vec<Arc<FakeStream>>>,
    constraints: Mutex<Option<StreamConstraints>>,
    requests: AtomicUsize,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self {
            denial: Mutex::new(None),
            streams: Mutex::new(Vec::new()),
            constraints: Mutex::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn deny(&self, error: CameraError) {
        *self.denial.lock().unwrap() = Some(error);
    }

    pub fn streams(&self) -> Vec<Arc<FakeStream>> {
        self.streams.lock().unwrap().clone()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_constraints(&self) -> Option<StreamConstraints> {
        self.constraints.lock().unwrap().clone()
    }
}

#[async_trait]
impl CameraSource for FakeCamera {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, CameraError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.constraints.lock().unwrap() = Some(constraints.clone());
        if let Some(error) = self.denial.lock().unwrap().clone() {
            return Err(error);
        }
        let mut streams = self.streams.lock().unwrap();
        let stream = Arc::new(FakeStream::new(format!("stream-{}", streams.len())));
        streams.push(stream.clone());
        Ok(stream)
    }
}

/// Video surface with switchable playback and frame readiness
pub struct FakeSurface {
    playing: watch::Sender<bool>,
    autoplay: bool,
    ready: AtomicBool,
    sequence: AtomicU64,
    size: FrameSize,
    display: Mutex<FrameSize>,
    stream: Mutex<Option<Arc<dyn MediaStream>>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Starts playing as soon as a stream is attached
    pub fn autoplay() -> Self {
        Self::build(true)
    }

    fn build(autoplay: bool) -> Self {
        let (playing, _rx) = watch::channel(false);
        Self {
            playing,
            autoplay,
            ready: AtomicBool::new(true),
            sequence: AtomicU64::new(0),
            size: FrameSize::new(640, 480),
            display: Mutex::new(FrameSize::new(640, 480)),
            stream: Mutex::new(None),
        }
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.send_replace(playing);
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn set_display_size(&self, size: FrameSize) {
        *self.display.lock().unwrap() = size;
    }

    pub fn has_stream(&self) -> bool {
        self.stream.lock().unwrap().is_some()
    }
}

#[async_trait]
impl VideoSurface for FakeSurface {
    fn attach_stream(&self, stream: Option<Arc<dyn MediaStream>>) {
        let attached = stream.is_some();
        *self.stream.lock().unwrap() = stream;
        if self.autoplay {
            self.set_playing(attached);
        }
    }

    async fn playing(&self) {
        let mut rx = self.playing.subscribe();
        let _ = rx.wait_for(|playing| *playing).await;
    }

    fn capture_frame(&self) -> Option<VideoFrame> {
        if !self.ready.load(Ordering::SeqCst) {
            return None;
        }
        Some(VideoFrame {
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
            size: self.size,
            data: Bytes::from_static(&[0u8; 16]),
        })
    }

    fn display_size(&self) -> FrameSize {
        *self.display.lock().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Resize(FrameSize),
    Clear,
    Draw(FaceDetection),
}

pub struct RecordingOverlay {
    events: Mutex<Vec<OverlayEvent>>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<OverlayEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl OverlaySurface for RecordingOverlay {
    fn resize(&self, size: FrameSize) {
        self.events.lock().unwrap().push(OverlayEvent::Resize(size));
    }

    fn clear(&self) {
        self.events.lock().unwrap().push(OverlayEvent::Clear);
    }

    fn draw_detection(&self, detection: &FaceDetection) {
        self.events
            .lock()
            .unwrap()
            .push(OverlayEvent::Draw(detection.clone()));
    }
}

/// Ticks as soon as the runtime gets around to it
pub struct YieldClock;

#[async_trait]
impl FrameClock for YieldClock {
    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }
}
