// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod camera;
pub mod key_value_store;
pub mod model_provider;
pub mod surface;

pub use camera::{CameraError, CameraSource, FacingMode, MediaStream, StreamConstraints};
pub use key_value_store::{KeyValueStore, StoreError};
pub use model_provider::{InferenceError, ModelLoadError, ModelNet, ModelProvider};
pub use surface::{FrameClock, OverlaySurface, VideoFrame, VideoSurface};
