//! Prism Application
//!
//! Loads a polarization dataset through the dataparser and reports what the
//! training pipeline would receive.

mod app;
mod errors;

use app::{AppBuilder, AppConfig, Overrides};
use clap::Parser;
use prism_data::{CenterMethod, OrientationMethod, Split};
use std::path::PathBuf;

/// Prism - Polarization Dataset Loader
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file with `logging` and `dataparser` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing transforms.json
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// How much to scale the camera origins by
    #[arg(long)]
    scale_factor: Option<f64>,

    /// How much to downscale images
    #[arg(long)]
    downscale_factor: Option<u32>,

    /// How much to scale the region of interest by
    #[arg(long)]
    scene_scale: Option<f64>,

    /// Orientation method (pca, up, vertical, none)
    #[arg(long)]
    orientation_method: Option<OrientationMethod>,

    /// Center method (poses, focus, none)
    #[arg(long)]
    center_method: Option<CenterMethod>,

    /// Scale poses to fit in a +/- 1 bounding box
    #[arg(long)]
    auto_scale_poses: Option<bool>,

    /// Fraction of images used for training
    #[arg(long)]
    train_split_fraction: Option<f64>,

    /// Scale applied to depth values to get meters
    #[arg(long)]
    depth_unit_scale_factor: Option<f64>,

    /// Split to load (train, val, test)
    #[arg(short, long, default_value = "train")]
    split: Split,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            data: self.data.clone(),
            scale_factor: self.scale_factor,
            downscale_factor: self.downscale_factor,
            scene_scale: self.scene_scale,
            orientation_method: self.orientation_method,
            center_method: self.center_method,
            auto_scale_poses: self.auto_scale_poses,
            train_split_fraction: self.train_split_fraction,
            depth_unit_scale_factor: self.depth_unit_scale_factor,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Application error: {}", e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    let result = AppBuilder::new()
        .with_config(config)
        .with_overrides(args.overrides())
        .with_split(args.split)
        .run();

    match result {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("Application error: {}", e);
            std::process::exit(1);
        }
    }
}
