//! Adapters that drive the detector from a recorded detection trace instead of
//! a webcam and an inference model.

pub mod camera;
pub mod overlay;
pub mod provider;
pub mod surface;
pub mod trace;

pub use camera::{ReplayCamera, ReplayStream};
pub use overlay::LoggingOverlay;
pub use provider::ReplayModelProvider;
pub use surface::ReplaySurface;
pub use trace::{CameraBehaviour, ReplayTrace, TraceFrame};
