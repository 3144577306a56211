//! Dataparser outputs and the polarization dataset parser.

use crate::cameras::{Cameras, Intrinsics};
use crate::config::{PolarizationDataParserConfig, Split};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::pose::{camera_to_world, materialize_pose};
use crate::scene_box::SceneBox;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the training pipeline needs from a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DataparserOutputs {
    /// Image paths, one per camera, in manifest order.
    pub image_filenames: Vec<PathBuf>,
    pub cameras: Cameras,
    pub scene_box: SceneBox,
}

impl DataparserOutputs {
    /// Number of frames in the outputs.
    pub fn len(&self) -> usize {
        self.image_filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_filenames.is_empty()
    }
}

/// A dataset format that can produce [`DataparserOutputs`].
pub trait DataParser {
    /// Load the dataset and build outputs for `split`.
    fn get_dataparser_outputs(&self, split: Split) -> Result<DataparserOutputs>;
}

/// Parser for polarization captures described by a `transforms.json` manifest.
#[derive(Debug, Clone)]
pub struct PolarizationDataParser {
    config: PolarizationDataParserConfig,
}

impl PolarizationDataParser {
    pub fn new(config: PolarizationDataParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolarizationDataParserConfig {
        &self.config
    }

    /// Assemble outputs from an already loaded manifest.
    ///
    /// Fails on the first malformed frame; nothing partial is returned.
    pub fn outputs_from_manifest(&self, manifest: &Manifest) -> Result<DataparserOutputs> {
        let mut image_filenames = Vec::with_capacity(manifest.frames.len());
        let mut camera_to_worlds = Vec::with_capacity(manifest.frames.len());

        for (i, frame) in manifest.frames.iter().enumerate() {
            let pose = materialize_pose(i, &frame.transform_matrix)?;
            camera_to_worlds.push(camera_to_world(pose));
            image_filenames.push(resolve_image_path(&self.config.data, &frame.file_path));
        }

        let cameras = Cameras::new(camera_to_worlds, Intrinsics::from_manifest(manifest)?);
        let scene_box = SceneBox::cube(self.config.scene_scale);

        Ok(DataparserOutputs {
            image_filenames,
            cameras,
            scene_box,
        })
    }
}

impl DataParser for PolarizationDataParser {
    // Every split currently receives all frames.
    #[tracing::instrument(skip_all, fields(data = %self.config.data.display(), split = %split))]
    fn get_dataparser_outputs(&self, split: Split) -> Result<DataparserOutputs> {
        let manifest = Manifest::load(&self.config.data)?;
        let outputs = self.outputs_from_manifest(&manifest)?;

        info!(
            "Loaded {} frames for {} split (scene box +/-{})",
            outputs.len(),
            split,
            self.config.scene_scale
        );
        Ok(outputs)
    }
}

fn resolve_image_path(data_dir: &Path, file_path: &Path) -> PathBuf {
    if file_path.is_absolute() {
        file_path.to_path_buf()
    } else {
        data_dir.join(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataParserError;
    use crate::manifest::MANIFEST_FILE_NAME;
    use glam::DVec3;
    use serde_json::{Value as JsonValue, json};
    use std::fs;

    fn pose(tx: f64, ty: f64, tz: f64) -> JsonValue {
        json!([
            [0.0, 0.0, 1.0, tx],
            [1.0, 0.0, 0.0, ty],
            [0.0, 1.0, 0.0, tz],
            [0.0, 0.0, 0.0, 1.0]
        ])
    }

    fn write_manifest(dir: &Path, frames: JsonValue) {
        let manifest = json!({
            "fl_x": 1000,
            "fl_y": 1000,
            "cx": 612.0,
            "cy": 512.0,
            "h": 1024,
            "w": 1224,
            "frames": frames
        });
        fs::write(dir.join(MANIFEST_FILE_NAME), manifest.to_string()).unwrap();
    }

    fn parser_for(dir: &Path, scene_scale: f64) -> PolarizationDataParser {
        PolarizationDataParserConfig::with_data(dir)
            .with_scene_scale(scene_scale)
            .setup()
            .unwrap()
    }

    #[test]
    fn test_outputs_preserve_frame_order() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            json!([
                { "file_path": "images/c.png", "transform_matrix": pose(3.0, 0.0, 0.0) },
                { "file_path": "images/a.png", "transform_matrix": pose(1.0, 0.0, 0.0) },
                { "file_path": "images/b.png", "transform_matrix": pose(2.0, 0.0, 0.0) }
            ]),
        );

        let outputs = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap();

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs.cameras.len(), 3);
        assert_eq!(
            outputs.image_filenames,
            vec![
                dir.path().join("images/c.png"),
                dir.path().join("images/a.png"),
                dir.path().join("images/b.png"),
            ]
        );
        let xs: Vec<f64> = outputs.cameras.origins().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_pose_block_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            json!([{ "file_path": "f.png", "transform_matrix": pose(0.5, -1.25, 4.0) }]),
        );

        let outputs = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap();

        assert_eq!(
            outputs.cameras.camera_to_world_rows(0).unwrap(),
            [
                [0.0, 0.0, 1.0, 0.5],
                [1.0, 0.0, 0.0, -1.25],
                [0.0, 1.0, 0.0, 4.0],
            ]
        );
    }

    #[test]
    fn test_intrinsics_and_scene_box() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            json!([{ "file_path": "f.png", "transform_matrix": pose(0.0, 0.0, 0.0) }]),
        );

        let outputs = parser_for(dir.path(), 2.0)
            .get_dataparser_outputs(Split::Val)
            .unwrap();

        let intrinsics = outputs.cameras.intrinsics();
        assert_eq!(intrinsics.fx, 1000.0);
        assert_eq!(intrinsics.fy, 1000.0);
        assert_eq!(intrinsics.cx, 612.0);
        assert_eq!(intrinsics.cy, 512.0);
        assert_eq!(intrinsics.width, 1224);
        assert_eq!(intrinsics.height, 1024);

        assert_eq!(outputs.scene_box.min, DVec3::new(-2.0, -2.0, -2.0));
        assert_eq!(outputs.scene_box.max, DVec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_empty_frame_list() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), json!([]));

        let outputs = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap();
        assert!(outputs.is_empty());
        assert!(outputs.cameras.is_empty());
    }

    #[test]
    fn test_malformed_pose_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            json!([
                { "file_path": "ok.png", "transform_matrix": pose(0.0, 0.0, 0.0) },
                { "file_path": "bad.png", "transform_matrix": [[1.0, 0.0, 0.0, 0.0]] }
            ]),
        );

        let err = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap_err();
        assert!(matches!(
            err,
            DataParserError::MalformedPose { frame: 1, rows: 1, .. }
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap_err();

        assert!(matches!(err, DataParserError::ManifestNotFound { .. }));
        assert!(
            err.to_string()
                .contains(&dir.path().join(MANIFEST_FILE_NAME).display().to_string())
        );
    }

    #[test]
    fn test_absolute_image_path_kept() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("elsewhere/img.png");
        write_manifest(
            dir.path(),
            json!([{ "file_path": absolute, "transform_matrix": pose(0.0, 0.0, 0.0) }]),
        );

        let outputs = parser_for(dir.path(), 1.0)
            .get_dataparser_outputs(Split::Train)
            .unwrap();
        assert_eq!(outputs.image_filenames, vec![absolute]);
    }

    #[test]
    fn test_setup_rejects_invalid_config() {
        let result = PolarizationDataParserConfig::with_data("unused")
            .with_scene_scale(-1.0)
            .setup();
        assert!(matches!(result, Err(DataParserError::InvalidConfig(_))));
    }
}
