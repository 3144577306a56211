//! Application configuration and the dataset load run with builder pattern.

use crate::errors::AppError;
use glam::DVec3;
use prism_data::{
    CenterMethod, DataParser, DataparserOutputs, Intrinsics, OrientationMethod,
    PolarizationDataParserConfig, Split,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of a `--config` JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub dataparser: PolarizationDataParserConfig,
}

impl AppConfig {
    /// Read a config file. Keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub scale_factor: Option<f64>,
    pub downscale_factor: Option<u32>,
    pub scene_scale: Option<f64>,
    pub orientation_method: Option<OrientationMethod>,
    pub center_method: Option<CenterMethod>,
    pub auto_scale_poses: Option<bool>,
    pub train_split_fraction: Option<f64>,
    pub depth_unit_scale_factor: Option<f64>,
    pub log_level: Option<String>,
}

impl Overrides {
    /// Apply every set value onto `config`.
    pub fn apply(self, config: &mut AppConfig) {
        let parser = &mut config.dataparser;
        if let Some(data) = self.data {
            parser.data = data;
        }
        if let Some(scale_factor) = self.scale_factor {
            parser.scale_factor = scale_factor;
        }
        if let Some(downscale_factor) = self.downscale_factor {
            parser.downscale_factor = Some(downscale_factor);
        }
        if let Some(scene_scale) = self.scene_scale {
            parser.scene_scale = scene_scale;
        }
        if let Some(method) = self.orientation_method {
            parser.orientation_method = method;
        }
        if let Some(method) = self.center_method {
            parser.center_method = method;
        }
        if let Some(auto_scale_poses) = self.auto_scale_poses {
            parser.auto_scale_poses = auto_scale_poses;
        }
        if let Some(fraction) = self.train_split_fraction {
            parser.train_split_fraction = fraction;
        }
        if let Some(factor) = self.depth_unit_scale_factor {
            parser.depth_unit_scale_factor = factor;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

/// Short description of loaded dataparser outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub split: Split,
    pub num_frames: usize,
    pub intrinsics: Intrinsics,
    pub scene_min: DVec3,
    pub scene_max: DVec3,
    pub first_image: Option<PathBuf>,
    pub last_image: Option<PathBuf>,
}

impl DatasetSummary {
    pub fn new(split: Split, outputs: &DataparserOutputs) -> Self {
        Self {
            split,
            num_frames: outputs.len(),
            intrinsics: *outputs.cameras.intrinsics(),
            scene_min: outputs.scene_box.min,
            scene_max: outputs.scene_box.max,
            first_image: outputs.image_filenames.first().cloned(),
            last_image: outputs.image_filenames.last().cloned(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.intrinsics;
        writeln!(f, "split: {}", self.split)?;
        writeln!(f, "frames: {}", self.num_frames)?;
        writeln!(
            f,
            "intrinsics: fx={} fy={} cx={} cy={} size={}x{}",
            k.fx, k.fy, k.cx, k.cy, k.width, k.height
        )?;
        write!(f, "scene box: {} .. {}", self.scene_min, self.scene_max)?;
        if let (Some(first), Some(last)) = (&self.first_image, &self.last_image) {
            write!(f, "\nimages: {} .. {}", first.display(), last.display())?;
        }
        Ok(())
    }
}

/// Builder for configuring and running a dataset load.
pub struct AppBuilder {
    config: AppConfig,
    split: Split,
}

impl AppBuilder {
    /// Create a new AppBuilder with default settings.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            split: Split::Train,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply command-line overrides on top of the current configuration.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        overrides.apply(&mut self.config);
        self
    }

    /// Select the split to load.
    pub fn with_split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    /// Initialize logging, then load the dataset.
    pub fn run(self) -> Result<DatasetSummary, AppError> {
        self.init_logging();
        self.load()
    }

    /// Load the dataset without touching the global subscriber.
    pub fn load(self) -> Result<DatasetSummary, AppError> {
        debug!("Dataparser config: {:?}", self.config.dataparser);

        let parser = self.config.dataparser.setup()?;
        let outputs = parser.get_dataparser_outputs(self.split)?;
        let summary = DatasetSummary::new(self.split, &outputs);

        info!(
            "Dataset ready: {} frames, {}x{} images",
            summary.num_frames, summary.intrinsics.width, summary.intrinsics.height
        );
        Ok(summary)
    }

    fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.config.logging.level)),
            )
            .with_target(false)
            .init();
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
