//! Status lines published while the detector starts up or fails.
//! Per-frame classification lines live with the classifier.

pub const LOADING_MODELS: &str = "Loading face models...";
pub const MODELS_LOADED: &str = "Models loaded — starting camera";
pub const MODEL_LOAD_FAILED: &str = "Failed to load face detection models. Check logs.";
pub const CAMERA_UNAVAILABLE: &str =
    "Camera access denied or not available. Allow camera and reload.";
pub const DETECTION_FAILED: &str = "Error detecting face. Try again.";
