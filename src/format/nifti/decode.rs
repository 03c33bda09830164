//! End-to-end decoding of an in-memory NIfTI-1 file.

use tracing::{debug, warn};

use crate::error::NiftiError;

use super::header::NiftiHeader;
use super::image::ImageDescriptor;
use super::validation::validate_header_report;
use super::voxels::VoxelSlice;

/// A decoded NIfTI-1 file borrowing its voxel payload from the input buffer.
#[derive(Debug, Clone)]
pub struct DecodedImage<'a> {
    /// The raw header record
    pub header: NiftiHeader,
    /// Derived image description
    pub descriptor: ImageDescriptor,
    /// View of the voxel payload
    pub voxels: VoxelSlice<'a>,
}

impl<'a> DecodedImage<'a> {
    /// Samples as f64 with the header's rescaling applied.
    ///
    /// Scaling is skipped when `scl_slope` is 0.
    ///
    /// # Errors
    /// - `UnsupportedSampleType` if the datatype has no scalar representation
    pub fn scaled_samples(&self) -> Result<Vec<f64>, NiftiError> {
        let data_type = self
            .descriptor
            .data_type
            .ok_or(NiftiError::UnsupportedSampleType(self.descriptor.datatype))?;

        let mut samples = self.voxels.to_f64(data_type)?;
        if let Some((slope, intercept)) = self.descriptor.scaling() {
            for sample in &mut samples {
                *sample = slope * *sample + intercept;
            }
        }
        Ok(samples)
    }
}

/// Decode a complete single-file NIfTI-1 buffer.
///
/// Runs byte-order detection, header validation, descriptor construction
/// and payload location in that order. The first failure ends decoding; there
/// is no partial result.
///
/// # Errors
/// - `HeaderTooShort` / `IndeterminateByteOrder` from header decoding
/// - `UnsupportedHeaderSize` / `UnsupportedStorageMode` / `InvalidDataType`
///   from validation
/// - `TruncatedPayload` if the buffer ends before the voxel data does
pub fn decode(buffer: &[u8]) -> Result<DecodedImage<'_>, NiftiError> {
    let (header, byte_order) = NiftiHeader::parse(buffer)?;
    debug!(byte_order = %byte_order, rank = header.dim[0], "Found byte order");

    let report = validate_header_report(&header);
    for warning in &report.warnings {
        warn!("NIfTI header: {}", warning);
    }
    report.into_result()?;
    debug!(datatype = header.datatype, bitpix = header.bitpix, "Header is valid");

    let descriptor = ImageDescriptor::from_header(&header, byte_order);
    let voxels = VoxelSlice::locate(buffer, &header, &descriptor)?;
    debug!(
        offset = voxels.offset(),
        length = voxels.len(),
        nvox = descriptor.nvox,
        "Located voxel payload"
    );

    Ok(DecodedImage {
        header,
        descriptor,
        voxels,
    })
}
