use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fundus_prep_core::{
    augment_directory, crop_directory, AugmentConfig, BatchReport, CropConfig, ExclusionSet,
};

use super::args::{AugmentArgs, CliArgs, Command, CropArgs};
use super::errors::AppError;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_crop(args: &CropArgs) -> Result<BatchReport, AppError> {
    let config = CropConfig::with_padding(args.padding);
    let run = crop_directory(&args.input_dir, &args.output_dir, &args.csv_path, &config)?;
    Ok(run.report)
}

fn load_exclusions(args: &AugmentArgs) -> Result<ExclusionSet, AppError> {
    let Some(path) = &args.exclude_list else {
        debug!("No exclusion list given, every image is eligible");
        return Ok(ExclusionSet::new());
    };
    let exclusions =
        ExclusionSet::from_list_file(path).map_err(|source| AppError::ExclusionList {
            path: path.clone(),
            source,
        })?;
    info!(
        "Loaded {} excluded filenames from {}",
        exclusions.len(),
        path.display()
    );
    Ok(exclusions)
}

fn run_augment(args: &AugmentArgs) -> Result<BatchReport, AppError> {
    let exclusions = load_exclusions(args)?;
    let config = AugmentConfig {
        rotation_range: args.rotation_range,
        zoom_range: (args.zoom_min, args.zoom_max),
        ..AugmentConfig::default()
    };

    let report = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            augment_directory(&args.input_dir, &args.output_dir, &config, &exclusions, &mut rng)?
        }
        None => augment_directory(
            &args.input_dir,
            &args.output_dir,
            &config,
            &exclusions,
            &mut rand::rng(),
        )?,
    };
    Ok(report)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(args.verbose);

    let report = match &args.command {
        Command::Crop(crop) => run_crop(crop)?,
        Command::Augment(augment) => run_augment(augment)?,
    };

    if let Some(path) = &args.report {
        report.write_json(path)?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}
