//! NIfTI-1 code tables.
//!
//! This module defines the vocabulary carried by header code fields:
//! - Data type codes (`datatype`) that determine how voxels are stored
//! - Transform codes (`qform_code`, `sform_code`)
//! - Unit codes packed into `xyzt_units`
//!
//! Unrecognized values decode to `None`; callers keep the raw integer.

use serde::Serialize;

// =============================================================================
// Data Types
// =============================================================================

/// Voxel storage types (`DT_*` codes).
///
/// Each type has a fixed width in bits, which must agree with the header's
/// `bitpix` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum DataType {
    /// Unknown or unset
    Unknown = 0,
    /// 1 bit per voxel
    Binary = 1,
    UInt8 = 2,
    Int16 = 4,
    Int32 = 8,
    Float32 = 16,
    /// Pair of 32-bit floats
    Complex64 = 32,
    Float64 = 64,
    /// Three interleaved 8-bit channels
    Rgb24 = 128,
    Int8 = 256,
    UInt16 = 512,
    UInt32 = 768,
    Int64 = 1024,
    UInt64 = 1280,
    Float128 = 1536,
    /// Pair of 64-bit floats
    Complex128 = 1792,
    /// Pair of 128-bit floats
    Complex256 = 2048,
    /// Four interleaved 8-bit channels
    Rgba32 = 2304,
}

impl DataType {
    /// Create a DataType from its numeric code.
    ///
    /// Returns `None` for codes not defined by NIfTI-1.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(DataType::Unknown),
            1 => Some(DataType::Binary),
            2 => Some(DataType::UInt8),
            4 => Some(DataType::Int16),
            8 => Some(DataType::Int32),
            16 => Some(DataType::Float32),
            32 => Some(DataType::Complex64),
            64 => Some(DataType::Float64),
            128 => Some(DataType::Rgb24),
            256 => Some(DataType::Int8),
            512 => Some(DataType::UInt16),
            768 => Some(DataType::UInt32),
            1024 => Some(DataType::Int64),
            1280 => Some(DataType::UInt64),
            1536 => Some(DataType::Float128),
            1792 => Some(DataType::Complex128),
            2048 => Some(DataType::Complex256),
            2304 => Some(DataType::Rgba32),
            _ => None,
        }
    }

    /// The numeric `DT_*` code.
    #[inline]
    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Width of one voxel of this type in bits.
    pub const fn bits_per_voxel(self) -> u16 {
        match self {
            DataType::Unknown => 0,
            DataType::Binary => 1,
            DataType::UInt8 | DataType::Int8 => 8,
            DataType::Int16 | DataType::UInt16 => 16,
            DataType::Rgb24 => 24,
            DataType::Int32 | DataType::UInt32 | DataType::Float32 | DataType::Rgba32 => 32,
            DataType::Float64 | DataType::Complex64 | DataType::Int64 | DataType::UInt64 => 64,
            DataType::Float128 | DataType::Complex128 => 128,
            DataType::Complex256 => 256,
        }
    }

    /// Whether voxels of this type can be materialized as fixed-width samples.
    ///
    /// Unknown and binary data cannot.
    #[inline]
    pub const fn is_supported(self) -> bool {
        !matches!(self, DataType::Unknown | DataType::Binary)
    }

    /// Whether each voxel is a single real number with a native Rust type.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            DataType::UInt8
                | DataType::Int8
                | DataType::Int16
                | DataType::UInt16
                | DataType::Int32
                | DataType::UInt32
                | DataType::Int64
                | DataType::UInt64
                | DataType::Float32
                | DataType::Float64
        )
    }

    /// Get a human-readable name for the type.
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Unknown => "unknown",
            DataType::Binary => "binary",
            DataType::UInt8 => "uint8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Float32 => "float32",
            DataType::Complex64 => "complex64",
            DataType::Float64 => "float64",
            DataType::Rgb24 => "rgb24",
            DataType::Int8 => "int8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
            DataType::Float128 => "float128",
            DataType::Complex128 => "complex128",
            DataType::Complex256 => "complex256",
            DataType::Rgba32 => "rgba32",
        }
    }
}

// =============================================================================
// Transform Codes
// =============================================================================

/// Meaning of the qform/sform coordinate transforms (`NIFTI_XFORM_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum XformCode {
    /// Arbitrary coordinates; the transform is not set
    Unknown = 0,
    /// Scanner-based anatomical coordinates
    ScannerAnat = 1,
    /// Coordinates aligned to another file or to anatomical truth
    AlignedAnat = 2,
    /// Talairach-Tournoux atlas coordinates
    Talairach = 3,
    /// MNI 152 normalized coordinates
    Mni152 = 4,
}

impl XformCode {
    /// Create an XformCode from its numeric value.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(XformCode::Unknown),
            1 => Some(XformCode::ScannerAnat),
            2 => Some(XformCode::AlignedAnat),
            3 => Some(XformCode::Talairach),
            4 => Some(XformCode::Mni152),
            _ => None,
        }
    }

    /// Whether the transform is defined.
    #[inline]
    pub const fn is_set(self) -> bool {
        !matches!(self, XformCode::Unknown)
    }
}

// =============================================================================
// Units
// =============================================================================

/// Mask selecting the spatial unit bits of `xyzt_units`
pub const SPATIAL_UNITS_MASK: u8 = 0x07;

/// Mask selecting the temporal unit bits of `xyzt_units`
pub const TEMPORAL_UNITS_MASK: u8 = 0x38;

/// Units of pixdim[1..=3].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SpatialUnits {
    Unknown = 0,
    Meter = 1,
    Millimeter = 2,
    Micron = 3,
}

impl SpatialUnits {
    /// Extract the spatial units from a packed `xyzt_units` byte.
    pub fn from_xyzt(xyzt_units: u8) -> Option<Self> {
        match xyzt_units & SPATIAL_UNITS_MASK {
            0 => Some(SpatialUnits::Unknown),
            1 => Some(SpatialUnits::Meter),
            2 => Some(SpatialUnits::Millimeter),
            3 => Some(SpatialUnits::Micron),
            _ => None,
        }
    }
}

/// Units of pixdim[4].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TemporalUnits {
    Unknown = 0,
    Second = 8,
    Millisecond = 16,
    Microsecond = 24,
    Hertz = 32,
    Ppm = 40,
    /// Radians per second
    Rads = 48,
}

impl TemporalUnits {
    /// Extract the temporal units from a packed `xyzt_units` byte.
    pub fn from_xyzt(xyzt_units: u8) -> Option<Self> {
        match xyzt_units & TEMPORAL_UNITS_MASK {
            0 => Some(TemporalUnits::Unknown),
            8 => Some(TemporalUnits::Second),
            16 => Some(TemporalUnits::Millisecond),
            24 => Some(TemporalUnits::Microsecond),
            32 => Some(TemporalUnits::Hertz),
            40 => Some(TemporalUnits::Ppm),
            48 => Some(TemporalUnits::Rads),
            _ => None,
        }
    }
}
