//! # nifti1-reader
//!
//! A decoder for single-file NIfTI-1 neuroimaging volumes.
//!
//! The decoder works on a fully loaded byte buffer. It detects the file's byte
//! order, validates the 348-byte header, derives an image descriptor and hands
//! back the voxel payload as a view into the caller's buffer, without copying.
//!
//! ## Features
//!
//! - **Byte order detection**: Probes `dim[0]` under both orders
//! - **Byte-exact headers**: Field-by-field decoding and re-encoding
//! - **Zero-copy payload**: [`VoxelSlice`] borrows from the input buffer
//! - **Parallel loading**: Files are fetched in fixed-size chunks on tokio tasks
//!
//! ## Architecture
//!
//! - [`io`] - Range readers and the chunked file loader
//! - [`mod@format`] - NIfTI-1 header, validation, descriptor and voxel access
//! - [`config`] - CLI configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use nifti1_reader::{decode, load_file, DEFAULT_CHUNK_SIZE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = load_file("brain.nii", DEFAULT_CHUNK_SIZE).await?;
//!     let image = decode(&bytes)?;
//!
//!     println!("{} voxels, {}", image.descriptor.nvox, image.descriptor.byte_order);
//!     println!("payload: {} bytes at {}", image.voxels.len(), image.voxels.offset());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{Config, OutputFormat, MAX_CHUNK_SIZE};
pub use error::{FormatError, IoError, NiftiError};
pub use format::nifti::{
    decode, payload_length, rescale_samples, text_field, validate_header, validate_header_report,
    voxel_offset, ByteOrder, DataType, DecodedImage, ImageDescriptor, NiftiHeader, SpatialUnits,
    TemporalUnits, ValidationError, ValidationResult, VoxelSlice, XformCode, HEADER_BLOCK_SIZE,
    HEADER_SIZE, MAGIC_FILE_PAIR, MAGIC_SINGLE_FILE, MAX_RANK,
};
pub use io::{load_file, read_all_chunked, FileRangeReader, RangeReader, DEFAULT_CHUNK_SIZE};
