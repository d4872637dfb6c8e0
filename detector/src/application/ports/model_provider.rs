// Driven port - Face inference capability (output port)

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use url::Url;

use super::surface::VideoFrame;
use crate::domain::FaceDetection;

/// The three nets that must all be loaded before detection can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelNet {
    /// Generic face localisation (SSD MobileNet v1)
    FaceDetector,
    /// 68-point face landmarks
    FaceLandmarks,
    /// Expression probabilities
    FaceExpressions,
}

impl ModelNet {
    /// Load order
    pub const ALL: [ModelNet; 3] = [
        ModelNet::FaceDetector,
        ModelNet::FaceLandmarks,
        ModelNet::FaceExpressions,
    ];
}

impl fmt::Display for ModelNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelNet::FaceDetector => "ssd_mobilenetv1",
            ModelNet::FaceLandmarks => "face_landmark_68",
            ModelNet::FaceExpressions => "face_expression",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelLoadError {
    #[error("failed to load {net} from {uri}: {reason}")]
    Load {
        net: ModelNet,
        uri: String,
        reason: String,
    },

    #[error("face models failed to load earlier in this process")]
    PreviouslyFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inference failed: {0}")]
pub struct InferenceError(pub String);

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Loads one net's weights from `uri`
    async fn load_from_uri(&self, net: ModelNet, uri: &Url) -> Result<(), ModelLoadError>;

    /// Single-face detection with landmarks and expressions.
    /// `Ok(None)` means no face in the frame.
    async fn detect_single_face(
        &self,
        frame: &VideoFrame,
    ) -> Result<Option<FaceDetection>, InferenceError>;
}
