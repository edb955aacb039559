use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::DEFAULT_CANVAS_SIZE;
use crate::sample::{DEFAULT_PREVIEW_SCALE, SAMPLE_WIDTH};

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "ferrite-sketch.json";

pub const DEFAULT_ADDR: &str = "127.0.0.1:7878";
pub const DEFAULT_INIT_NET: &str = "mnist_init_net.json";
pub const DEFAULT_PREDICT_NET: &str = "mnist_predict_net.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Read { path: String, source: std::io::Error },
    #[error("could not parse config '{path}': {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("canvas_size {0} is not a positive multiple of {SAMPLE_WIDTH}")]
    CanvasSize(u32),
    #[error("preview_scale must be positive")]
    PreviewScale,
}

/// Runtime settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Address the studio listens on.
    pub addr: String,
    /// Side of the square drawing surface in pixels.
    pub canvas_size: u32,
    /// Replication factor of the sample preview.
    pub preview_scale: u32,
    /// Directory holding the two model files.
    pub model_dir: PathBuf,
    /// Parameter blobs of the model.
    pub init_net: String,
    /// Layer graph of the model.
    pub predict_net: String,
    /// Sample store opened at startup, if any.
    pub store_dir: Option<PathBuf>,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            addr: DEFAULT_ADDR.to_owned(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            preview_scale: DEFAULT_PREVIEW_SCALE,
            model_dir: PathBuf::from("."),
            init_net: DEFAULT_INIT_NET.to_owned(),
            predict_net: DEFAULT_PREDICT_NET.to_owned(),
            store_dir: None,
            log_level: "info".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<SketchConfig, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        let config: SketchConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `ferrite-sketch.json` from the working directory, falling back
    /// to defaults when the file does not exist.
    pub fn load_or_default() -> Result<SketchConfig, ConfigError> {
        if Path::new(CONFIG_FILE).exists() {
            SketchConfig::load(CONFIG_FILE)
        } else {
            Ok(SketchConfig::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size == 0 || self.canvas_size as usize % SAMPLE_WIDTH != 0 {
            return Err(ConfigError::CanvasSize(self.canvas_size));
        }
        if self.preview_scale == 0 {
            return Err(ConfigError::PreviewScale);
        }
        Ok(())
    }

    pub fn init_net_path(&self) -> PathBuf {
        self.model_dir.join(&self.init_net)
    }

    pub fn predict_net_path(&self) -> PathBuf {
        self.model_dir.join(&self.predict_net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_size, 196);
        assert_eq!(config.predict_net_path(), PathBuf::from("./mnist_predict_net.json"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: SketchConfig = serde_json::from_str(r#"{ "addr": "0.0.0.0:9000" }"#).unwrap();
        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.init_net, DEFAULT_INIT_NET);
        assert_eq!(config.preview_scale, 7);
    }

    #[test]
    fn rejects_canvas_that_does_not_tile() {
        let config = SketchConfig { canvas_size: 200, ..SketchConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::CanvasSize(200))));
        let config = SketchConfig { canvas_size: 392, ..SketchConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_bad_json() {
        let path = std::env::temp_dir().join(format!("ferrite-sketch-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ addr: ").unwrap();
        assert!(matches!(SketchConfig::load(&path), Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_file(&path);
    }
}
