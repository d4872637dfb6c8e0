use serde::Deserialize;
use std::path::Path;

use crate::domain::{BoundingBox, Expressions, FaceDetection, FrameSize, Point};

/// How the replayed camera answers a stream request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraBehaviour {
    #[default]
    Granted,
    Denied,
    Unavailable,
}

/// One recorded frame: `null` for no face, `{"error": ...}` for a failed
/// inference call, otherwise the face.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TraceFrame {
    Failure {
        error: String,
    },
    Face {
        expressions: Expressions,
        #[serde(default)]
        bounding_box: Option<BoundingBox>,
        #[serde(default)]
        landmarks: Vec<Point>,
    },
}

/// A recorded sequence of detections, replayed in a loop
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayTrace {
    #[serde(default = "default_frame_size")]
    pub frame_size: FrameSize,
    #[serde(default)]
    pub camera: CameraBehaviour,
    pub frames: Vec<Option<TraceFrame>>,
}

fn default_frame_size() -> FrameSize {
    FrameSize::new(640, 480)
}

impl Default for ReplayTrace {
    fn default() -> Self {
        Self {
            frame_size: default_frame_size(),
            camera: CameraBehaviour::default(),
            frames: vec![None],
        }
    }
}

impl ReplayTrace {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read replay trace {}", path.display()))?;
        let trace: ReplayTrace = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid replay trace {}", path.display()))?;
        anyhow::ensure!(!trace.frames.is_empty(), "Replay trace {} has no frames", path.display());
        Ok(trace)
    }

    /// Detection for frame `sequence`, cycling through the trace
    pub fn detection(&self, sequence: u64) -> Result<Option<FaceDetection>, String> {
        if self.frames.is_empty() {
            return Ok(None);
        }
        let index = (sequence % self.frames.len() as u64) as usize;
        match &self.frames[index] {
            None => Ok(None),
            Some(TraceFrame::Failure { error }) => Err(error.clone()),
            Some(TraceFrame::Face {
                expressions,
                bounding_box,
                landmarks,
            }) => Ok(Some(FaceDetection {
                image_size: self.frame_size,
                bounding_box: bounding_box.unwrap_or_else(|| self.centred_box()),
                landmarks: landmarks.clone(),
                expressions: expressions.clone(),
            })),
        }
    }

    fn centred_box(&self) -> BoundingBox {
        let w = f64::from(self.frame_size.width);
        let h = f64::from(self.frame_size.height);
        BoundingBox {
            x: w * 0.3,
            y: h * 0.2,
            width: w * 0.4,
            height: h * 0.6,
        }
    }
}
