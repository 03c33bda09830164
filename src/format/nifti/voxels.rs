//! Voxel payload location and sample access.
//!
//! The payload of a single-file NIfTI-1 starts at `vox_offset` (never before
//! byte 352) and spans `nx * ny * nz * nt * nu * bitpix / 8` bytes. It is
//! exposed as a borrowed [`VoxelSlice`]; nothing here copies the payload
//! except the explicit sample conversions.

use crate::error::NiftiError;

use super::codes::DataType;
use super::header::{ByteOrder, NiftiHeader, HEADER_BLOCK_SIZE};
use super::image::ImageDescriptor;

// =============================================================================
// Offset and Length
// =============================================================================

/// Byte offset of the voxel payload.
///
/// `vox_offset` values below 352 (and NaN) are non-conformant and replaced by
/// 352, the end of the header block.
pub fn voxel_offset(header: &NiftiHeader) -> u64 {
    if header.vox_offset >= HEADER_BLOCK_SIZE as f32 {
        header.vox_offset as u64
    } else {
        HEADER_BLOCK_SIZE as u64
    }
}

/// Length of the voxel payload in bytes.
///
/// `nvox * bitpix / 8`, where the descriptor's `nvox` covers nx, ny, nz and
/// the time (dim[4]) and component (dim[5]) axes when declared positive.
/// Saturates instead of overflowing.
pub fn payload_length(header: &NiftiHeader, descriptor: &ImageDescriptor) -> u64 {
    let bytes_per_voxel = (header.bitpix.max(0) / 8) as u64;
    u64::try_from(descriptor.nvox)
        .unwrap_or(u64::MAX)
        .saturating_mul(bytes_per_voxel)
}

// =============================================================================
// VoxelSlice
// =============================================================================

/// Read-only view of the voxel payload inside the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelSlice<'a> {
    offset: usize,
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> VoxelSlice<'a> {
    /// Locate the voxel payload in `buffer`.
    ///
    /// # Errors
    /// - `TruncatedPayload` if `offset + length` exceeds the buffer. The
    ///   buffer is never clamped.
    pub fn locate(
        buffer: &'a [u8],
        header: &NiftiHeader,
        descriptor: &ImageDescriptor,
    ) -> Result<Self, NiftiError> {
        let offset = voxel_offset(header);
        let length = payload_length(header, descriptor);
        let size = buffer.len() as u64;

        let end = offset.saturating_add(length);
        if end > size {
            return Err(NiftiError::TruncatedPayload {
                offset,
                length,
                size,
            });
        }

        // end <= buffer.len(), so both fit in usize
        let (start, end) = (offset as usize, end as usize);
        Ok(VoxelSlice {
            offset: start,
            data: &buffer[start..end],
            byte_order: descriptor.byte_order,
        })
    }

    /// Offset of the payload within the original buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The payload bytes, borrowed from the original buffer.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Byte order of the samples.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Iterate the payload as 16-bit signed samples.
    ///
    /// A trailing odd byte is ignored.
    pub fn i16_samples(&self) -> impl Iterator<Item = i16> + 'a {
        let order = self.byte_order;
        self.data.chunks_exact(2).map(move |c| order.read_i16(c))
    }

    /// Rescale 16-bit signed samples with `slope * sample + intercept`.
    ///
    /// See [`rescale_samples`] for the zero-slope convention.
    pub fn rescaled_i16(&self, slope: f32, intercept: f32) -> Vec<f32> {
        rescale_samples(self.i16_samples(), slope, intercept)
    }

    /// Decode every sample as f64 according to `data_type`.
    ///
    /// # Errors
    /// - `UnsupportedSampleType` for complex, RGB, float128, binary and
    ///   unknown types
    pub fn to_f64(&self, data_type: DataType) -> Result<Vec<f64>, NiftiError> {
        let unsupported = NiftiError::UnsupportedSampleType(data_type.code());
        if !data_type.is_scalar() {
            return Err(unsupported);
        }

        let order = self.byte_order;
        let data = self.data;

        let samples = match data_type {
            DataType::UInt8 => data.iter().map(|&b| f64::from(b)).collect(),
            DataType::Int8 => data.iter().map(|&b| f64::from(b as i8)).collect(),
            DataType::Int16 => data
                .chunks_exact(2)
                .map(|c| f64::from(order.read_i16(c)))
                .collect(),
            DataType::UInt16 => data
                .chunks_exact(2)
                .map(|c| f64::from(order.read_u16(c)))
                .collect(),
            DataType::Int32 => data
                .chunks_exact(4)
                .map(|c| f64::from(order.read_i32(c)))
                .collect(),
            DataType::UInt32 => data
                .chunks_exact(4)
                .map(|c| f64::from(order.read_u32(c)))
                .collect(),
            DataType::Int64 => data
                .chunks_exact(8)
                .map(|c| order.read_u64(c) as i64 as f64)
                .collect(),
            DataType::UInt64 => data
                .chunks_exact(8)
                .map(|c| order.read_u64(c) as f64)
                .collect(),
            DataType::Float32 => data
                .chunks_exact(4)
                .map(|c| f64::from(order.read_f32(c)))
                .collect(),
            DataType::Float64 => data
                .chunks_exact(8)
                .map(|c| f64::from_bits(order.read_u64(c)))
                .collect(),
            _ => return Err(unsupported),
        };

        Ok(samples)
    }
}

// =============================================================================
// Rescaling
// =============================================================================

/// Apply `slope * sample + intercept` to 16-bit signed samples.
///
/// A slope of 0 means the file declares no rescaling: samples are converted
/// to f32 unchanged and the intercept is not applied.
pub fn rescale_samples<I>(samples: I, slope: f32, intercept: f32) -> Vec<f32>
where
    I: IntoIterator<Item = i16>,
{
    let samples = samples.into_iter();
    if slope == 0.0 {
        return samples.map(f32::from).collect();
    }
    samples
        .map(|s| slope * f32::from(s) + intercept)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
