use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fundus-prep",
    version,
    about = "Crop and augment fundus image datasets"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write a JSON report of every file's outcome to this path
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crop images to their bright fundus region and record the margins
    Crop(CropArgs),
    /// Copy images forward and add rotated and zoomed variants
    Augment(AugmentArgs),
}

#[derive(Debug, Args)]
pub struct CropArgs {
    /// Directory of source images
    #[arg(short, long, default_value = "csdi_datasets/original_images")]
    pub input_dir: PathBuf,

    /// Directory for cropped images, created if absent
    #[arg(short, long, default_value = "csdi_datasets/croped_images")]
    pub output_dir: PathBuf,

    /// Extra pixels kept around the detected region
    #[arg(short, long, default_value_t = 0)]
    pub padding: u32,

    /// Path of the crop table
    #[arg(short, long, default_value = "crop_info.csv")]
    pub csv_path: PathBuf,
}

#[derive(Debug, Args)]
pub struct AugmentArgs {
    /// Directory of cropped images
    #[arg(short, long, default_value = "csdi_datasets/croped_images")]
    pub input_dir: PathBuf,

    /// Directory for copies and variants, created if absent
    #[arg(short, long, default_value = "csdi_datasets/croped_augmented_images")]
    pub output_dir: PathBuf,

    /// Largest rotation in degrees (at least 5)
    #[arg(long, default_value_t = 15.0)]
    pub rotation_range: f64,

    /// Smallest zoom factor
    #[arg(long, default_value_t = 1.05)]
    pub zoom_min: f64,

    /// Largest zoom factor
    #[arg(long, default_value_t = 1.17)]
    pub zoom_max: f64,

    /// File listing validation images to leave out, one name per line
    #[arg(long)]
    pub exclude_list: Option<PathBuf>,

    /// Seed for reproducible variants
    #[arg(long)]
    pub seed: Option<u64>,
}
