//! Camera batch handed to the training pipeline.
//!
//! Only the data is modelled here. Projection and ray generation belong to the
//! host framework's camera model.

use crate::error::{DataParserError, Result};
use crate::manifest::Manifest;
use crate::pose::rows_3x4;
use glam::{DAffine3, DVec3};

/// Projection model of a camera batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraType {
    #[default]
    Perspective,
}

/// Pinhole intrinsics shared by every camera in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    pub width: u32,
    pub height: u32,
}

impl Intrinsics {
    /// Read the shared intrinsics from the manifest's top-level fields.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        Ok(Self {
            fx: manifest.fl_x,
            fy: manifest.fl_y,
            cx: manifest.cx,
            cy: manifest.cy,
            width: image_dimension("w", manifest.w)?,
            height: image_dimension("h", manifest.h)?,
        })
    }
}

fn image_dimension(field: &'static str, value: f64) -> Result<u32> {
    if value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(DataParserError::InvalidImageSize { field, value })
    }
}

/// A batch of cameras sharing one set of intrinsics.
#[derive(Debug, Clone, PartialEq)]
pub struct Cameras {
    camera_to_worlds: Vec<DAffine3>,
    intrinsics: Intrinsics,
    camera_type: CameraType,
}

impl Cameras {
    /// Create a batch from camera-to-world transforms in frame order.
    pub fn new(camera_to_worlds: Vec<DAffine3>, intrinsics: Intrinsics) -> Self {
        Self {
            camera_to_worlds,
            intrinsics,
            camera_type: CameraType::Perspective,
        }
    }

    /// Number of cameras in the batch.
    pub fn len(&self) -> usize {
        self.camera_to_worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camera_to_worlds.is_empty()
    }

    /// 3x4 camera-to-world transforms, one per frame.
    pub fn camera_to_worlds(&self) -> &[DAffine3] {
        &self.camera_to_worlds
    }

    /// Row-major 3x4 block of camera `index`.
    pub fn camera_to_world_rows(&self, index: usize) -> Option<[[f64; 4]; 3]> {
        self.camera_to_worlds.get(index).map(rows_3x4)
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn camera_type(&self) -> CameraType {
        self.camera_type
    }

    /// Camera centers in world space.
    pub fn origins(&self) -> Vec<DVec3> {
        self.camera_to_worlds.iter().map(|c2w| c2w.translation).collect()
    }
}
