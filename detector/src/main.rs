use anyhow::{Context, Result};
use shared::{UiCommand, UiMessage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use laugh_detector::application::detection::{DetectorAdapters, LaughDetector};
use laugh_detector::application::session::commands::{restore_session, start_demo_session};
use laugh_detector::application::session::SessionStore;
use laugh_detector::infrastructure::config::AppConfig;
use laugh_detector::infrastructure::driven::replay::{
    LoggingOverlay, ReplayCamera, ReplayModelProvider, ReplaySurface, ReplayTrace,
};
use laugh_detector::infrastructure::driven::{IntervalClock, JsonFileStore};

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the UI state as JSON lines: one snapshot, then changes.
fn spawn_printer(
    mut rx: tokio::sync::watch::Receiver<shared::UiSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = rx.borrow_and_update().clone();
        emit(&last.to_message());
        while rx.changed().await.is_ok() {
            let next = rx.borrow_and_update().clone();
            for message in last.diff(&next) {
                emit(&message);
            }
            last = next;
        }
    })
}

fn emit(message: &UiMessage) {
    match serde_json::to_string(message) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("Failed to encode UI message: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    init_tracing(&config.logging.filter);

    info!("Laugh detector starting...");

    let store = Arc::new(JsonFileStore::new(&config.storage.path));
    let sessions = Arc::new(SessionStore::new(store));
    let account = match restore_session::execute(&sessions).await? {
        Some(account) => account,
        None => start_demo_session::execute(&sessions)
            .await
            .context("Failed to start demo session")?,
    };

    let trace = match &config.replay.trace_path {
        Some(path) => ReplayTrace::load(path).await?,
        None => ReplayTrace::default(),
    };
    let trace = Arc::new(trace);
    let surface = Arc::new(ReplaySurface::new(
        trace.frame_size,
        config.replay.warmup_frames,
        config.replay.frame_count,
    ));

    let adapters = DetectorAdapters {
        provider: Arc::new(ReplayModelProvider::new(
            Arc::clone(&trace),
            Duration::from_millis(config.replay.inference_latency_ms),
        )),
        camera: Arc::new(ReplayCamera::new(trace.camera)),
        surface: surface.clone(),
        overlay: Arc::new(LoggingOverlay::new()),
        clock: Arc::new(IntervalClock::new(config.frame_interval())),
    };
    let mut detector = LaughDetector::new(
        Arc::clone(&sessions),
        adapters,
        config.detector_settings()?,
    );
    let printer = spawn_printer(detector.ui().subscribe());

    if let Err(e) = detector.activate(account).await {
        error!("Activation failed: {}", e);
    }

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            _ = surface.finished() => {
                info!("Replay finished");
                break;
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match serde_json::from_str::<UiCommand>(&line) {
                    Ok(command) => {
                        if let Err(e) = detector.handle_command(command).await {
                            error!("{}", e.user_message());
                        }
                        break;
                    }
                    Err(e) => warn!("Ignoring unknown command {:?}: {}", line, e),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("stdin closed: {}", e);
                    stdin_open = false;
                }
            },
        }
    }

    detector.shutdown();
    drop(detector);
    if tokio::time::timeout(Duration::from_secs(1), printer).await.is_err() {
        warn!("UI printer did not finish");
    }

    Ok(())
}
