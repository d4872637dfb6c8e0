//! Per-frame face detection results as produced by the inference capability.
//!
//! Nothing here outlives a single frame; the scheduler hands a detection to the
//! classifier and the overlay and then drops it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expression name the laugh decision is based on
pub const HAPPY: &str = "happy";

/// Pixel dimensions of a frame or drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Expression name to probability in `[0, 1]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expressions(HashMap<String, f64>);

impl Expressions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, probability: f64) -> Self {
        self.0.insert(name.into(), probability);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Probability of `happy`; missing or NaN reads as 0.
    pub fn happy(&self) -> f64 {
        match self.get(HAPPY) {
            Some(p) if !p.is_nan() => p,
            _ => 0.0,
        }
    }

    /// Most probable expression, if any
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.0
            .iter()
            .filter(|(_, p)| !p.is_nan())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, p)| (name.as_str(), *p))
    }
}

/// The single most prominent face in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Dimensions of the image the coordinates refer to
    pub image_size: FrameSize,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub landmarks: Vec<Point>,
    #[serde(default)]
    pub expressions: Expressions,
}

impl FaceDetection {
    /// Rescales coordinates to `display`, e.g. before drawing onto an overlay
    /// whose size differs from the detector input.
    pub fn resized(&self, display: FrameSize) -> FaceDetection {
        if self.image_size.is_empty() || self.image_size == display {
            return self.clone();
        }
        let sx = f64::from(display.width) / f64::from(self.image_size.width);
        let sy = f64::from(display.height) / f64::from(self.image_size.height);

        FaceDetection {
            image_size: display,
            bounding_box: BoundingBox {
                x: self.bounding_box.x * sx,
                y: self.bounding_box.y * sy,
                width: self.bounding_box.width * sx,
                height: self.bounding_box.height * sy,
            },
            landmarks: self
                .landmarks
                .iter()
                .map(|p| Point {
                    x: p.x * sx,
                    y: p.y * sy,
                })
                .collect(),
            expressions: self.expressions.clone(),
        }
    }
}
