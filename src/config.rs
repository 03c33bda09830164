//! Configuration for the `nifti1-reader` command.
//!
//! Options come from command-line arguments via clap, with `NIFTI_`-prefixed
//! environment variables as fallbacks:
//!
//! - `NIFTI_CHUNK_SIZE` - Bytes fetched per loader task (default: 8192)
//! - `NIFTI_OUTPUT` - `text` or `json` (default: text)
//!
//! # Example
//!
//! ```ignore
//! use nifti1_reader::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! println!("Reading {}", config.path.display());
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::io::DEFAULT_CHUNK_SIZE;

// =============================================================================
// Default Values
// =============================================================================

/// Largest accepted chunk size (64MB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// CLI Arguments
// =============================================================================

/// How the decoded image is printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Image descriptor as JSON
    Json,
}

/// nifti1-reader - Decode and inspect single-file NIfTI-1 volumes.
///
/// Loads the file in parallel chunks, detects its byte order, validates the
/// header and reports the image geometry and voxel payload.
#[derive(Parser, Debug, Clone)]
#[command(name = "nifti1-reader")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to a `.nii` file.
    pub path: PathBuf,

    // =========================================================================
    // Loading
    // =========================================================================
    /// Bytes fetched by each loader task.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "NIFTI_CHUNK_SIZE")]
    pub chunk_size: usize,

    // =========================================================================
    // Output
    // =========================================================================
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "NIFTI_OUTPUT")]
    pub output: OutputFormat,

    /// Print every raw header field.
    #[arg(long, default_value_t = false)]
    pub header: bool,

    /// Print min/max/mean of the rescaled samples.
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("A path to a NIfTI file is required".to_string());
        }

        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(format!(
                "chunk_size must be between 1 byte and {}MB",
                MAX_CHUNK_SIZE / (1024 * 1024)
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
