// src/config.rs

//! Render configuration.
//!
//! Settings are deserialized from a JSON file named by the
//! `SIGN_RASTER_CONFIG` environment variable. Every field has a default, so
//! a partial file (or no file at all) is valid. The size given on the command
//! line always wins over the configured one.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::evaluator::shapes::DEFAULT_STRIDE;
use crate::evaluator::{Disc, Evaluator, HalfPlane, Ring};
use crate::grid::DEFAULT_SIZE;

/// Environment variable holding the path of the config file.
pub const CONFIG_ENV_VAR: &str = "SIGN_RASTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of the image when none is given on the command line.
    pub size: u32,
    /// Lanes per evaluator call. 1 selects the scalar path.
    pub stride: usize,
    /// Which built-in evaluator to render.
    pub evaluator: EvaluatorConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: DEFAULT_SIZE,
            stride: DEFAULT_STRIDE,
            evaluator: EvaluatorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluatorConfig {
    HalfPlane,
    Disc { radius: f32 },
    Ring { inner: f32, outer: f32 },
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig::Disc { radius: 0.75 }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_error = |reason: String| RenderError::Config {
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        Self::from_json_str(&text).map_err(|e| config_error(e.to_string()))
    }

    /// Loads from `SIGN_RASTER_CONFIG` if it is set, else the defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let config = Self::load_from(Path::new(&path))?;
                info!("Loaded config from {:?}: {:?}", path, config);
                Ok(config)
            }
            None => {
                info!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// Builds the configured evaluator at the configured stride.
    pub fn build_evaluator(&self) -> Box<dyn Evaluator> {
        let stride = self.stride;
        match self.evaluator {
            EvaluatorConfig::HalfPlane => Box::new(HalfPlane::new(stride)),
            EvaluatorConfig::Disc { radius } => Box::new(Disc::new(radius, stride)),
            EvaluatorConfig::Ring { inner, outer } => Box::new(Ring::new(inner, outer, stride)),
        }
    }
}
