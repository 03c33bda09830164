//! NIfTI-1 decoder.
//!
//! This module turns an in-memory single-file NIfTI-1 (`.nii`) into a typed
//! header, an image descriptor and a zero-copy view of the voxel payload.
//!
//! # Key Concepts
//!
//! - **Byte order**: NIfTI-1 has no endianness marker. The decoder probes
//!   `dim[0]` under little-endian, then big-endian, and uses whichever gives a
//!   rank in `1..=7`. The same order applies to the voxel payload.
//!
//! - **Header block**: the 348-byte header is followed by a 4-byte extension
//!   flag. Voxel data never starts before byte 352, whatever `vox_offset`
//!   claims.
//!
//! - **Single-file storage only**: headers with the two-file magic `"ni1\0"`
//!   are rejected.

mod codes;
mod decode;
mod header;
mod image;
mod validation;
mod voxels;

pub use codes::{DataType, SpatialUnits, TemporalUnits, XformCode};
pub use decode::{decode, DecodedImage};
pub use header::{
    text_field, ByteOrder, NiftiHeader, HEADER_BLOCK_SIZE, HEADER_SIZE, MAGIC_FILE_PAIR,
    MAGIC_SINGLE_FILE, MAX_RANK,
};
pub use image::ImageDescriptor;
pub use validation::{validate_header, validate_header_report, ValidationError, ValidationResult};
pub use voxels::{payload_length, rescale_samples, voxel_offset, VoxelSlice};
