//! Prism Data Crate
//!
//! Dataparser for polarization capture datasets. Reads a `transforms.json`
//! manifest and produces the camera batch, image list and scene bounds a
//! training loop consumes. Camera projection, sampling and optimization are
//! left to the training framework.
//!
//! ## Example
//!
//! ```no_run
//! use prism_data::{DataParser, PolarizationDataParserConfig, Split};
//!
//! let parser = PolarizationDataParserConfig::with_data("data/polar/bust")
//!     .with_scene_scale(1.5)
//!     .setup()?;
//! let outputs = parser.get_dataparser_outputs(Split::Train)?;
//! println!("{} frames", outputs.len());
//! # Ok::<(), prism_data::DataParserError>(())
//! ```

pub mod cameras;
pub mod config;
pub mod dataparser;
pub mod error;
pub mod manifest;
pub mod pose;
pub mod scene_box;

pub use cameras::{CameraType, Cameras, Intrinsics};
pub use config::{CenterMethod, OrientationMethod, PolarizationDataParserConfig, Split};
pub use dataparser::{DataParser, DataparserOutputs, PolarizationDataParser};
pub use error::{DataParserError, Result};
pub use manifest::{FrameRecord, MANIFEST_FILE_NAME, Manifest, load_from_json};
pub use scene_box::SceneBox;
