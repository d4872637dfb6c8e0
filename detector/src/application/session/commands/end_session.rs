use tracing::info;

use crate::application::detection::CameraController;
use crate::application::session::{SessionError, SessionStore};

/// Releases the session's camera stream, then clears the current session
pub async fn execute(
    sessions: &SessionStore,
    camera: &CameraController,
) -> Result<(), SessionError> {
    camera.stop();
    sessions.clear_current().await?;
    info!("Session ended");
    Ok(())
}
