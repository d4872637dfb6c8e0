//! Runtime configuration.
//!
//! Layered, lowest priority first:
//! - built-in defaults
//! - `config/laugh-detector.toml`, or the file passed on the command line
//! - `LAUGH_DETECTOR_*` environment variables, `__` between nested keys
//!   (e.g. `LAUGH_DETECTOR_DETECTION__SETTLE_DELAY_MS=500`)

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::application::detection::DetectorSettings;

const DEFAULT_CONFIG_FILE: &str = "config/laugh-detector";
const ENV_PREFIX: &str = "LAUGH_DETECTOR";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub detection: DetectionConfig,
    pub storage: StorageConfig,
    pub replay: ReplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Where the detector, landmark and expression weights are fetched from
    pub weights_uri: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            weights_uri: "https://cdn.jsdelivr.net/npm/face-api.js@0.22.2/weights".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Pause between playback starting and the first inference
    pub settle_delay_ms: u64,
    /// Period of the frame clock
    pub frame_interval_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("laugh-detector.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Recorded detections; without one every frame reads as "no face"
    pub trace_path: Option<PathBuf>,
    /// Stop after this many frames
    pub frame_count: Option<u64>,
    pub inference_latency_ms: u64,
    /// Frames withheld after playback starts
    pub warmup_frames: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            trace_path: None,
            frame_count: None,
            inference_latency_ms: 30,
            warmup_frames: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the layered configuration. An explicit `path` must exist; the
    /// default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn detector_settings(&self) -> Result<DetectorSettings> {
        let weights_uri = Url::parse(&self.models.weights_uri)
            .with_context(|| format!("Invalid models.weights_uri: {}", self.models.weights_uri))?;
        Ok(DetectorSettings {
            weights_uri,
            settle_delay: Duration::from_millis(self.detection.settle_delay_ms),
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.detection.frame_interval_ms)
    }
}
