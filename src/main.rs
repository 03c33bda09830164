//! nifti1-reader - Decode and inspect single-file NIfTI-1 volumes.
//!
//! This binary loads a file, decodes it and prints what it found.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nifti1_reader::{
    config::{Config, OutputFormat},
    decode, load_file, DecodedImage, FormatError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {}", config.path.display(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), FormatError> {
    let bytes = load_file(&config.path, config.chunk_size).await?;
    debug!(size = bytes.len(), "Loaded file");

    let image = decode(&bytes)?;

    let stats = if config.stats {
        Some(SampleStats::from_samples(&image.scaled_samples()?))
    } else {
        None
    };

    match config.output {
        OutputFormat::Text => print_text(config, &image, stats.as_ref()),
        OutputFormat::Json => print_json(config, &image, stats.as_ref()),
    }

    Ok(())
}

// =============================================================================
// Sample Statistics
// =============================================================================

struct SampleStats {
    count: usize,
    min: f64,
    max: f64,
    mean: f64,
}

impl SampleStats {
    fn from_samples(samples: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        for &s in samples {
            min = min.min(s);
            max = max.max(s);
            sum += s;
        }

        let mean = if samples.is_empty() {
            f64::NAN
        } else {
            sum / samples.len() as f64
        };

        SampleStats {
            count: samples.len(),
            min,
            max,
            mean,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn print_text(config: &Config, image: &DecodedImage<'_>, stats: Option<&SampleStats>) {
    let desc = &image.descriptor;
    let extents = desc.extents();
    let spacing = [desc.dx, desc.dy, desc.dz, desc.dt, desc.du, desc.dv, desc.dw];

    if config.header {
        println!("{}", image.header);
        println!();
    }

    println!("File:        {}", config.path.display());
    println!("Byte order:  {}", desc.byte_order);
    println!("Rank:        {}", desc.rank);
    println!(
        "Dimensions:  {}",
        extents[..desc.rank]
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" x ")
    );
    println!(
        "Spacing:     {}",
        spacing[..desc.rank]
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" x ")
    );
    println!(
        "Data type:   {} (code {}, {} bytes/voxel)",
        desc.data_type.map(|dt| dt.name()).unwrap_or("unrecognized"),
        desc.datatype,
        desc.nbyper
    );
    println!("Voxels:      {}", desc.nvox);
    println!(
        "Payload:     {} bytes at offset {}",
        image.voxels.len(),
        image.voxels.offset()
    );
    match desc.scaling() {
        Some((slope, intercept)) => {
            println!("Scaling:     {} * value + {}", slope, intercept)
        }
        None => println!("Scaling:     none"),
    }
    let transforms = desc.transforms();
    if !transforms.is_empty() {
        println!(
            "Transforms:  {}",
            transforms
                .iter()
                .map(|(name, code)| format!("{} {:?}", name, code))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !desc.descrip.is_empty() {
        println!("Description: {}", desc.descrip);
    }

    if let Some(stats) = stats {
        println!();
        println!("Samples:     {}", stats.count);
        println!("Min:         {}", stats.min);
        println!("Max:         {}", stats.max);
        println!("Mean:        {}", stats.mean);
    }
}

fn print_json(config: &Config, image: &DecodedImage<'_>, stats: Option<&SampleStats>) {
    let mut json = serde_json::json!({
        "path": config.path.display().to_string(),
        "descriptor": image.descriptor,
        "payload": {
            "offset": image.voxels.offset(),
            "length": image.voxels.len(),
        },
    });

    if config.header {
        let fields: serde_json::Map<String, serde_json::Value> = image
            .header
            .fields()
            .into_iter()
            .map(|(name, _, value)| (name.to_string(), serde_json::Value::String(value)))
            .collect();
        json["header"] = serde_json::Value::Object(fields);
    }

    if let Some(stats) = stats {
        json["stats"] = serde_json::json!({
            "count": stats.count,
            "min": stats.min,
            "max": stats.max,
            "mean": stats.mean,
        });
    }

    match serde_json::to_string_pretty(&json) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "nifti1_reader=debug"
    } else {
        "nifti1_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
