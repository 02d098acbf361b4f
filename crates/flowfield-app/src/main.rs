//! FlowField - orientation field estimation and flow-field rendering.
//!
//! Reads an image, estimates the per-pixel flow direction and writes the
//! image with a sparse vector overlay.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{FlowFieldConfig, Overrides};
use flowfield_orientation::OrientationEstimator;
use flowfield_viz::{
    draw_flow_field, load_grayscale, load_rgb, orientation_to_luma, sample_flow_field, save_luma,
    save_rgb, write_json_file,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowfield")]
#[command(about = "Estimate per-pixel flow direction and plot it as a vector field")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path of the rendered flow-field image.
    #[arg(long, default_value = "flow_field_image.png")]
    out: PathBuf,

    /// JSON file with `orientation` and `overlay` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Standard deviation of the initial Gaussian blur.
    #[arg(long)]
    smooth_sigma: Option<f64>,

    /// Standard deviation of the structure-field averaging window.
    #[arg(long)]
    sum_sigma: Option<f64>,

    /// Distance in pixels between drawn vectors.
    #[arg(long)]
    stride: Option<usize>,

    /// Also write the orientation field as a grayscale map.
    #[arg(long)]
    orientation_map: Option<PathBuf>,

    /// Also write the sampled vectors as JSON.
    #[arg(long)]
    samples_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = FlowFieldConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply(Overrides {
            smooth_sigma: cli.smooth_sigma,
            sum_sigma: cli.sum_sigma,
            stride: cli.stride,
        });
    config.validate()?;
    info!(
        smooth_sigma = config.orientation.smooth_sigma,
        sum_sigma = config.orientation.sum_sigma,
        stride = config.overlay.stride,
        "Configuration loaded"
    );

    let gray = load_grayscale(&cli.image)?;
    let color = load_rgb(&cli.image)?;
    info!(
        path = %cli.image.display(),
        width = gray.width(),
        height = gray.height(),
        "Image loaded"
    );

    let estimator = OrientationEstimator::new(config.orientation)?;
    let start = Instant::now();
    let orientation = estimator
        .estimate(&gray)
        .with_context(|| format!("Orientation estimation failed for {}", cli.image.display()))?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Orientation field estimated"
    );

    let rendered = draw_flow_field(&color, &orientation, &config.overlay)?;
    save_rgb(&rendered, &cli.out)?;
    info!(path = %cli.out.display(), "Flow field written");

    if let Some(path) = &cli.orientation_map {
        save_luma(&orientation_to_luma(&orientation), path)?;
        info!(path = %path.display(), "Orientation map written");
    }

    if let Some(path) = &cli.samples_json {
        let samples = sample_flow_field(&orientation, config.overlay.stride)?;
        write_json_file(path, &samples)?;
        info!(path = %path.display(), samples = samples.len(), "Samples written");
    }

    Ok(())
}
