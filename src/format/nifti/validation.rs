//! NIfTI-1 header validation.
//!
//! Decoding only probes `dim[0]`; this module checks the rest of what a
//! single-file NIfTI-1 header must satisfy before its payload can be located.
//!
//! # Supported Subset
//!
//! - **Header size**: exactly 348 bytes (NIfTI-2's 540 is rejected)
//! - **Storage**: single file, magic `"n+1\0"` (the `"ni1\0"` pair is rejected)
//! - **Data type**: anything except `DT_UNKNOWN` and `DT_BINARY`
//!
//! Every check runs; the first failing one is the reported cause. Suspicious
//! but decodable values are collected as warnings.

use crate::error::NiftiError;

use super::codes::DataType;
use super::header::{NiftiHeader, HEADER_BLOCK_SIZE, HEADER_SIZE, MAGIC_SINGLE_FILE};

// =============================================================================
// Validation Result
// =============================================================================

/// Result of validating a NIfTI-1 header.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the header can be decoded further
    pub is_valid: bool,

    /// Validation errors in check order (empty if valid)
    pub errors: Vec<ValidationError>,

    /// Non-fatal issues
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result.
    pub fn ok() -> Self {
        ValidationResult {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Convert to a NiftiError if invalid.
    ///
    /// Returns the first error, or Ok(()) if valid.
    pub fn into_result(self) -> Result<(), NiftiError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

/// A specific validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// sizeof_hdr is not 348
    HeaderSize {
        /// The sizeof_hdr value found
        found: i32,
    },

    /// Magic does not denote single-file storage
    StorageMode {
        /// The magic bytes found
        magic: [u8; 4],
    },

    /// Data type cannot be materialized as fixed-width samples
    DataType {
        /// The datatype code found
        code: i16,
    },
}

impl From<ValidationError> for NiftiError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::HeaderSize { found } => NiftiError::UnsupportedHeaderSize(found),
            ValidationError::StorageMode { magic } => NiftiError::UnsupportedStorageMode(magic),
            ValidationError::DataType { code } => NiftiError::InvalidDataType(code),
        }
    }
}

// =============================================================================
// Header Validation
// =============================================================================

/// Validate a decoded header, collecting every error and warning.
pub fn validate_header_report(header: &NiftiHeader) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if header.sizeof_hdr != HEADER_SIZE as i32 {
        result.add_error(ValidationError::HeaderSize {
            found: header.sizeof_hdr,
        });
    }

    if header.magic != MAGIC_SINGLE_FILE {
        result.add_error(ValidationError::StorageMode {
            magic: header.magic,
        });
    }

    let datatype = DataType::from_i16(header.datatype);
    if matches!(datatype, Some(DataType::Unknown | DataType::Binary)) {
        result.add_error(ValidationError::DataType {
            code: header.datatype,
        });
    }

    match datatype {
        None => result.add_warning(format!("unrecognized datatype code {}", header.datatype)),
        Some(dt) if dt.is_supported() && i32::from(dt.bits_per_voxel()) != i32::from(header.bitpix) =>
        {
            result.add_warning(format!(
                "bitpix {} does not match datatype {} ({} bits)",
                header.bitpix,
                dt.name(),
                dt.bits_per_voxel()
            ));
        }
        _ => {}
    }

    if header.vox_offset.is_nan() || header.vox_offset < HEADER_BLOCK_SIZE as f32 {
        result.add_warning(format!(
            "vox_offset {} is below {}, voxel data assumed to start at {}",
            header.vox_offset, HEADER_BLOCK_SIZE, HEADER_BLOCK_SIZE
        ));
    }

    if header.has_plausible_rank() {
        let rank = header.dim[0] as usize;
        for (axis, &extent) in header.dim.iter().enumerate().take(rank + 1).skip(1) {
            if extent <= 0 {
                result.add_warning(format!(
                    "dim[{}] is {} within rank {}, treated as 1",
                    axis, extent, rank
                ));
            }
        }
    }

    result
}

/// Validate a decoded header.
///
/// # Errors
/// The first failing check, in order:
/// - `UnsupportedHeaderSize` if `sizeof_hdr != 348`
/// - `UnsupportedStorageMode` if `magic != "n+1\0"`
/// - `InvalidDataType` if `datatype` is unknown or binary
pub fn validate_header(header: &NiftiHeader) -> Result<(), NiftiError> {
    validate_header_report(header).into_result()
}

// =============================================================================
// Tests
// =============================================================================
