//! Dataparser configuration.

use crate::dataparser::PolarizationDataParser;
use crate::error::{DataParserError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How camera poses are reoriented by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationMethod {
    Pca,
    #[default]
    Up,
    Vertical,
    None,
}

/// How camera poses are recentered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterMethod {
    #[default]
    Poses,
    Focus,
    None,
}

/// Dataset partition requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Val,
    Test,
}

macro_rules! impl_str_enum {
    ($ty:ty, $($variant:ident => $name:literal),+ $(,)?) => {
        impl $ty {
            /// Accepted spellings, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "unknown value '{}', expected one of: {}",
                        s,
                        Self::NAMES.join(", ")
                    )),
                }
            }
        }
    };
}

impl_str_enum!(OrientationMethod, Pca => "pca", Up => "up", Vertical => "vertical", None => "none");
impl_str_enum!(CenterMethod, Poses => "poses", Focus => "focus", None => "none");
impl_str_enum!(Split, Train => "train", Val => "val", Test => "test");

/// Configuration for [`PolarizationDataParser`].
///
/// Only `data` and `scene_scale` shape the outputs. The remaining options are
/// declarative settings read by the training framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolarizationDataParserConfig {
    /// Directory containing `transforms.json`.
    pub data: PathBuf,
    /// How much to scale the camera origins by.
    pub scale_factor: f64,
    /// How much to downscale images. When unset the host picks a factor keeping
    /// the largest image dimension under 1600px.
    pub downscale_factor: Option<u32>,
    /// How much to scale the region of interest by.
    pub scene_scale: f64,
    pub orientation_method: OrientationMethod,
    pub center_method: CenterMethod,
    /// Whether poses are scaled to fit a +/- 1 bounding box.
    pub auto_scale_poses: bool,
    /// Fraction of images used for training; the rest are for eval.
    pub train_split_fraction: f64,
    /// Scales depth values to meters (0.001 converts millimeters).
    pub depth_unit_scale_factor: f64,
}

impl Default for PolarizationDataParserConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/nerfstudio/poster"),
            scale_factor: 1.0,
            downscale_factor: None,
            scene_scale: 1.0,
            orientation_method: OrientationMethod::Up,
            center_method: CenterMethod::Poses,
            auto_scale_poses: true,
            train_split_fraction: 0.9,
            depth_unit_scale_factor: 1e-3,
        }
    }
}

impl PolarizationDataParserConfig {
    /// Create a config for a dataset directory with default settings.
    pub fn with_data(data: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Set the scene box scale.
    pub fn with_scene_scale(mut self, scene_scale: f64) -> Self {
        self.scene_scale = scene_scale;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(DataParserError::InvalidConfig(msg)) };

        if !(self.scene_scale.is_finite() && self.scene_scale > 0.0) {
            return invalid(format!(
                "scene_scale must be a positive number, got {}",
                self.scene_scale
            ));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return invalid(format!(
                "scale_factor must be a positive number, got {}",
                self.scale_factor
            ));
        }
        if self.downscale_factor == Some(0) {
            return invalid("downscale_factor must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.train_split_fraction) {
            return invalid(format!(
                "train_split_fraction must be within [0, 1], got {}",
                self.train_split_fraction
            ));
        }
        if !(self.depth_unit_scale_factor.is_finite() && self.depth_unit_scale_factor > 0.0) {
            return invalid(format!(
                "depth_unit_scale_factor must be a positive number, got {}",
                self.depth_unit_scale_factor
            ));
        }
        Ok(())
    }

    /// Validate and instantiate the dataparser this config targets.
    pub fn setup(self) -> Result<PolarizationDataParser> {
        self.validate()?;
        Ok(PolarizationDataParser::new(self))
    }
}
