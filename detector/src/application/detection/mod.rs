// Detection use cases - model readiness, camera lifecycle, the per-frame loop

pub mod camera;
pub mod detector;
pub mod model_loader;
pub mod readiness;
pub mod scheduler;
pub mod status;
pub mod ui_state;

#[cfg(test)]
pub(crate) mod test_support;

pub use camera::CameraController;
pub use detector::{ActivationError, DetectorAdapters, DetectorSettings, LaughDetector};
pub use model_loader::ModelLoader;
pub use readiness::ReadinessTracker;
pub use scheduler::{DetectionContext, DetectionScheduler, LoopState};
pub use ui_state::UiState;
