use shared::UiCommand;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

use super::{
    status, CameraController, DetectionContext, DetectionScheduler, ModelLoader,
    ReadinessTracker, UiState,
};
use crate::application::ports::{
    CameraError, CameraSource, FrameClock, ModelLoadError, ModelProvider, OverlaySurface,
    VideoSurface,
};
use crate::application::session::commands::end_session;
use crate::application::session::{SessionError, SessionStore};
use crate::domain::{Account, ModelReadiness};

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error(transparent)]
    Models(#[from] ModelLoadError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// The host capabilities one detector drives
pub struct DetectorAdapters {
    pub provider: Arc<dyn ModelProvider>,
    pub camera: Arc<dyn CameraSource>,
    pub surface: Arc<dyn VideoSurface>,
    pub overlay: Arc<dyn OverlaySurface>,
    pub clock: Arc<dyn FrameClock>,
}

#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub weights_uri: Url,
    pub settle_delay: Duration,
}

/// Sequences model loading, camera acquisition and the detection loop for the
/// signed-in account, and tears them down on logout.
pub struct LaughDetector {
    sessions: Arc<SessionStore>,
    loader: ModelLoader,
    camera: CameraController,
    scheduler: DetectionScheduler,
    ui: UiState,
    account: Option<Account>,
}

impl LaughDetector {
    pub fn new(
        sessions: Arc<SessionStore>,
        adapters: DetectorAdapters,
        settings: DetectorSettings,
    ) -> Self {
        let ui = UiState::new();
        let loader = ModelLoader::new(
            Arc::clone(&adapters.provider),
            ReadinessTracker::new(),
            settings.weights_uri,
        );
        let camera = CameraController::new(adapters.camera, Arc::clone(&adapters.surface));
        let scheduler = DetectionScheduler::new(DetectionContext {
            provider: adapters.provider,
            surface: adapters.surface,
            overlay: adapters.overlay,
            clock: adapters.clock,
            ui: ui.clone(),
            settle_delay: settings.settle_delay,
        });

        Self {
            sessions,
            loader,
            camera,
            scheduler,
            ui,
            account: None,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn readiness(&self) -> &ReadinessTracker {
        self.loader.readiness()
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_detecting(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Loads models, starts the camera and begins detecting for `account`.
    ///
    /// Failures are published as a status line and returned; nothing is
    /// retried.
    pub async fn activate(&mut self, account: Account) -> Result<(), ActivationError> {
        if self.account.is_some() {
            self.shutdown();
        }
        self.ui.reset();
        info!("Activating detector for {}", account.name());
        let name = account.name().to_string();
        self.account = Some(account);

        if self.readiness().get() != ModelReadiness::Ready {
            self.ui.set_status(status::LOADING_MODELS);
        }
        if let Err(e) = self.loader.ensure_loaded().await {
            self.ui.set_models_loaded(false);
            self.ui.set_status(status::MODEL_LOAD_FAILED);
            return Err(e.into());
        }
        self.ui.set_models_loaded(true);
        self.ui.set_status(status::MODELS_LOADED);

        if let Err(e) = self.camera.start().await {
            self.ui.set_status(status::CAMERA_UNAVAILABLE);
            return Err(e.into());
        }

        self.scheduler.start(name);
        Ok(())
    }

    pub async fn handle_command(&mut self, command: UiCommand) -> Result<(), SessionError> {
        match command {
            UiCommand::Logout => self.logout().await,
        }
    }

    /// Stops detection, releases the camera and ends the session
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.scheduler.stop();
        self.ui.reset();
        let result = end_session::execute(&self.sessions, &self.camera).await;
        if let Some(account) = self.account.take() {
            info!("Logged out {}", account.name());
        }
        result
    }

    /// Stops detection and releases the camera; the session stays signed in
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        self.camera.stop();
        self.ui.reset();
        if self.account.take().is_some() {
            info!("Detector shut down");
        }
    }
}
