//! Pose materialization from the manifest's nested arrays.

use crate::error::{DataParserError, Result};
use glam::{DAffine3, DMat4};

/// Build a 4x4 matrix from a row-major nested array.
///
/// Only the top-left 4x4 block is read; extra rows and columns are ignored.
/// `frame` is the manifest index, reported on error.
pub fn materialize_pose(frame: usize, rows: &[Vec<f64>]) -> Result<DMat4> {
    let head = &rows[..rows.len().min(4)];
    let shortest = head.iter().map(Vec::len).min().unwrap_or(0);
    if head.len() < 4 || shortest < 4 {
        return Err(DataParserError::MalformedPose {
            frame,
            rows: rows.len(),
            cols: shortest,
        });
    }

    // glam is column-major
    let mut cols = [[0.0; 4]; 4];
    for (r, row) in head.iter().enumerate() {
        for (c, value) in row.iter().take(4).enumerate() {
            cols[c][r] = *value;
        }
    }
    Ok(DMat4::from_cols_array_2d(&cols))
}

/// Slice a 4x4 pose down to its 3x4 camera-to-world block.
pub fn camera_to_world(pose: DMat4) -> DAffine3 {
    DAffine3::from_mat4(pose)
}

/// Row-major view of a 3x4 camera-to-world transform.
pub fn rows_3x4(transform: &DAffine3) -> [[f64; 4]; 3] {
    let m = DMat4::from(*transform);
    [m.row(0).to_array(), m.row(1).to_array(), m.row(2).to_array()]
}
