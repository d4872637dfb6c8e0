// Domain layer - accounts, per-frame detections, the laugh decision
// No dependencies on other layers

pub mod classification;
pub mod entities;
pub mod errors;
pub mod expression;
pub mod readiness;
pub mod value_objects;

pub use classification::{classify, ClassificationResult, LAUGH_THRESHOLD};
pub use entities::*;
pub use errors::ValidationError;
pub use expression::{BoundingBox, Expressions, FaceDetection, FrameSize, Point};
pub use readiness::ModelReadiness;
pub use value_objects::*;
