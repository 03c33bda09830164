//! NIfTI-1 header decoding and encoding.
//!
//! The header is a fixed 348-byte record. Every field sits at a fixed offset
//! defined by the format, so it is read and written field-by-field rather than
//! by reinterpreting a Rust struct's memory layout.
//!
//! # Byte Order Detection
//!
//! NIfTI-1 stores no endianness marker. The convention is to decode as
//! little-endian, check that `dim[0]` (the rank) lies in `1..=7`, and retry
//! as big-endian otherwise.
//!
//! This is a heuristic. A header whose `dim[0]` happens to look valid under
//! the wrong order is decoded silently under that order.
//!
//! # Layout
//! ```text
//! Bytes   0-3:   sizeof_hdr (i32, must be 348)
//! Bytes  40-55:  dim[8] (i16)
//! Bytes  70-73:  datatype, bitpix (i16)
//! Bytes  76-107: pixdim[8] (f32)
//! Bytes 108-111: vox_offset (f32)
//! Bytes 344-347: magic ("n+1\0" or "ni1\0")
//! Bytes 348-351: extension flag (not part of the header record)
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::NiftiError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le};

// =============================================================================
// Constants
// =============================================================================

/// Size of the fixed NIfTI-1 header record in bytes
pub const HEADER_SIZE: usize = 348;

/// Size of the header block: the fixed header plus the 4-byte extension flag.
///
/// Voxel data in a single-file NIfTI-1 never starts before this offset.
pub const HEADER_BLOCK_SIZE: usize = 352;

/// Magic for single-file storage (header and voxels in one `.nii` file)
pub const MAGIC_SINGLE_FILE: [u8; 4] = *b"n+1\0";

/// Magic for the two-file `.hdr`/`.img` pair
pub const MAGIC_FILE_PAIR: [u8; 4] = *b"ni1\0";

/// Highest rank NIfTI-1 can express
pub const MAX_RANK: i16 = 7;

/// Field offsets within the 348-byte header.
mod offsets {
    pub const SIZEOF_HDR: usize = 0;
    pub const DATA_TYPE: usize = 4;
    pub const DB_NAME: usize = 14;
    pub const EXTENTS: usize = 32;
    pub const SESSION_ERROR: usize = 36;
    pub const REGULAR: usize = 38;
    pub const DIM_INFO: usize = 39;
    pub const DIM: usize = 40;
    pub const INTENT_P1: usize = 56;
    pub const INTENT_P2: usize = 60;
    pub const INTENT_P3: usize = 64;
    pub const INTENT_CODE: usize = 68;
    pub const DATATYPE: usize = 70;
    pub const BITPIX: usize = 72;
    pub const SLICE_START: usize = 74;
    pub const PIXDIM: usize = 76;
    pub const VOX_OFFSET: usize = 108;
    pub const SCL_SLOPE: usize = 112;
    pub const SCL_INTER: usize = 116;
    pub const SLICE_END: usize = 120;
    pub const SLICE_CODE: usize = 122;
    pub const XYZT_UNITS: usize = 123;
    pub const CAL_MAX: usize = 124;
    pub const CAL_MIN: usize = 128;
    pub const SLICE_DURATION: usize = 132;
    pub const TOFFSET: usize = 136;
    pub const GLMAX: usize = 140;
    pub const GLMIN: usize = 144;
    pub const DESCRIP: usize = 148;
    pub const AUX_FILE: usize = 228;
    pub const QFORM_CODE: usize = 252;
    pub const SFORM_CODE: usize = 254;
    pub const QUATERN_B: usize = 256;
    pub const QUATERN_C: usize = 260;
    pub const QUATERN_D: usize = 264;
    pub const QOFFSET_X: usize = 268;
    pub const QOFFSET_Y: usize = 272;
    pub const QOFFSET_Z: usize = 276;
    pub const SROW_X: usize = 280;
    pub const SROW_Y: usize = 296;
    pub const SROW_Z: usize = 312;
    pub const INTENT_NAME: usize = 328;
    pub const MAGIC: usize = 344;
}

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a NIfTI file.
///
/// One order applies to every multi-byte field in the header and to every
/// sample in the voxel payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// Least significant byte first
    LittleEndian,
    /// Most significant byte first
    BigEndian,
}

impl ByteOrder {
    /// Get a human-readable name for the byte order.
    pub const fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "little-endian",
            ByteOrder::BigEndian => "big-endian",
        }
    }

    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }

    /// Read an i16 from a byte slice using this byte order.
    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    /// Read an i32 from a byte slice using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Read an f32 from a byte slice using this byte order.
    ///
    /// The bit pattern is preserved exactly, including NaN payloads.
    #[inline]
    pub fn read_f32(self, bytes: &[u8]) -> f32 {
        f32::from_bits(self.read_u32(bytes))
    }

    /// Encode a u16 in this byte order.
    #[inline]
    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Encode a u32 in this byte order.
    #[inline]
    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Field Reader / Writer
// =============================================================================

/// Reads header fields at fixed offsets under one byte order.
struct FieldReader<'a> {
    bytes: &'a [u8],
    order: ByteOrder,
}

impl<'a> FieldReader<'a> {
    fn i16_at(&self, offset: usize) -> i16 {
        self.order.read_i16(&self.bytes[offset..offset + 2])
    }

    fn i32_at(&self, offset: usize) -> i32 {
        self.order.read_i32(&self.bytes[offset..offset + 4])
    }

    fn f32_at(&self, offset: usize) -> f32 {
        self.order.read_f32(&self.bytes[offset..offset + 4])
    }

    fn u8_at(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    fn bytes_at<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[offset..offset + N]);
        out
    }

    fn i16_array<const N: usize>(&self, offset: usize) -> [i16; N] {
        std::array::from_fn(|i| self.i16_at(offset + i * 2))
    }

    fn f32_array<const N: usize>(&self, offset: usize) -> [f32; N] {
        std::array::from_fn(|i| self.f32_at(offset + i * 4))
    }
}

/// Writes header fields at fixed offsets under one byte order.
struct FieldWriter {
    bytes: [u8; HEADER_SIZE],
    order: ByteOrder,
}

impl FieldWriter {
    fn i16_at(&mut self, offset: usize, value: i16) {
        let encoded = self.order.u16_bytes(value as u16);
        self.bytes[offset..offset + 2].copy_from_slice(&encoded);
    }

    fn i32_at(&mut self, offset: usize, value: i32) {
        let encoded = self.order.u32_bytes(value as u32);
        self.bytes[offset..offset + 4].copy_from_slice(&encoded);
    }

    fn f32_at(&mut self, offset: usize, value: f32) {
        let encoded = self.order.u32_bytes(value.to_bits());
        self.bytes[offset..offset + 4].copy_from_slice(&encoded);
    }

    fn u8_at(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    fn bytes_at(&mut self, offset: usize, value: &[u8]) {
        self.bytes[offset..offset + value.len()].copy_from_slice(value);
    }

    fn i16_array(&mut self, offset: usize, values: &[i16]) {
        for (i, v) in values.iter().enumerate() {
            self.i16_at(offset + i * 2, *v);
        }
    }

    fn f32_array(&mut self, offset: usize, values: &[f32]) {
        for (i, v) in values.iter().enumerate() {
            self.f32_at(offset + i * 4, *v);
        }
    }
}

// =============================================================================
// NiftiHeader
// =============================================================================

/// The NIfTI-1 header record, field-for-field as stored on disk.
///
/// Produced by [`NiftiHeader::parse`] and consumed by validation and
/// descriptor construction. Fields prefixed with Analyze-era names
/// (`data_type`, `db_name`, `extents`, `session_error`, `regular`, `glmax`,
/// `glmin`) are unused by NIfTI-1 but kept so re-encoding is byte-exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiftiHeader {
    /// Must be 348
    pub sizeof_hdr: i32,
    pub data_type: [u8; 10],
    pub db_name: [u8; 18],
    pub extents: i32,
    pub session_error: i16,
    pub regular: u8,
    /// MRI slice ordering (freq, phase and slice dims packed in 2 bits each)
    pub dim_info: u8,
    /// dim[0] is the rank, dim[1..=7] the extent per axis
    pub dim: [i16; 8],
    pub intent_p1: f32,
    pub intent_p2: f32,
    pub intent_p3: f32,
    pub intent_code: i16,
    /// Voxel storage type (DT_* code)
    pub datatype: i16,
    /// Bits per voxel
    pub bitpix: i16,
    pub slice_start: i16,
    /// Grid spacing; the sign of pixdim[0] is qfac
    pub pixdim: [f32; 8],
    /// Byte offset of the voxel data in the file
    pub vox_offset: f32,
    pub scl_slope: f32,
    pub scl_inter: f32,
    pub slice_end: i16,
    pub slice_code: u8,
    /// Units of pixdim[1..=4]
    pub xyzt_units: u8,
    pub cal_max: f32,
    pub cal_min: f32,
    pub slice_duration: f32,
    pub toffset: f32,
    pub glmax: i32,
    pub glmin: i32,
    pub descrip: [u8; 80],
    pub aux_file: [u8; 24],
    pub qform_code: i16,
    pub sform_code: i16,
    pub quatern_b: f32,
    pub quatern_c: f32,
    pub quatern_d: f32,
    pub qoffset_x: f32,
    pub qoffset_y: f32,
    pub qoffset_z: f32,
    pub srow_x: [f32; 4],
    pub srow_y: [f32; 4],
    pub srow_z: [f32; 4],
    pub intent_name: [u8; 16],
    /// "n+1\0" for single-file storage, "ni1\0" for a file pair
    pub magic: [u8; 4],
}

impl Default for NiftiHeader {
    fn default() -> Self {
        NiftiHeader {
            sizeof_hdr: HEADER_SIZE as i32,
            data_type: [0; 10],
            db_name: [0; 18],
            extents: 0,
            session_error: 0,
            regular: 0,
            dim_info: 0,
            dim: [1, 1, 1, 1, 1, 1, 1, 1],
            intent_p1: 0.0,
            intent_p2: 0.0,
            intent_p3: 0.0,
            intent_code: 0,
            datatype: 0,
            bitpix: 0,
            slice_start: 0,
            pixdim: [1.0; 8],
            vox_offset: HEADER_BLOCK_SIZE as f32,
            scl_slope: 0.0,
            scl_inter: 0.0,
            slice_end: 0,
            slice_code: 0,
            xyzt_units: 0,
            cal_max: 0.0,
            cal_min: 0.0,
            slice_duration: 0.0,
            toffset: 0.0,
            glmax: 0,
            glmin: 0,
            descrip: [0; 80],
            aux_file: [0; 24],
            qform_code: 0,
            sform_code: 0,
            quatern_b: 0.0,
            quatern_c: 0.0,
            quatern_d: 0.0,
            qoffset_x: 0.0,
            qoffset_y: 0.0,
            qoffset_z: 0.0,
            srow_x: [0.0; 4],
            srow_y: [0.0; 4],
            srow_z: [0.0; 4],
            intent_name: [0; 16],
            magic: MAGIC_SINGLE_FILE,
        }
    }
}

impl NiftiHeader {
    /// Decode a header, detecting its byte order from `dim[0]`.
    ///
    /// Decodes as little-endian first. If `dim[0]` is outside `1..=7`, decodes
    /// again from the start of the buffer as big-endian. Only `dim[0]` is
    /// inspected here; the remaining checks belong to validation.
    ///
    /// # Errors
    /// - `HeaderTooShort` if `bytes` holds fewer than 348 bytes
    /// - `IndeterminateByteOrder` if `dim[0]` is implausible under both orders
    pub fn parse(bytes: &[u8]) -> Result<(Self, ByteOrder), NiftiError> {
        if bytes.len() < HEADER_SIZE {
            return Err(NiftiError::HeaderTooShort {
                required: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let little = Self::decode_with(bytes, ByteOrder::LittleEndian);
        if little.has_plausible_rank() {
            return Ok((little, ByteOrder::LittleEndian));
        }

        let big = Self::decode_with(bytes, ByteOrder::BigEndian);
        if big.has_plausible_rank() {
            return Ok((big, ByteOrder::BigEndian));
        }

        Err(NiftiError::IndeterminateByteOrder {
            little_endian: little.dim[0],
            big_endian: big.dim[0],
        })
    }

    /// Decode a header under a known byte order.
    ///
    /// Pure and total for any input of at least 348 bytes; no field is
    /// checked.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`HEADER_SIZE`].
    pub fn decode_with(bytes: &[u8], order: ByteOrder) -> Self {
        let r = FieldReader { bytes, order };

        NiftiHeader {
            sizeof_hdr: r.i32_at(offsets::SIZEOF_HDR),
            data_type: r.bytes_at(offsets::DATA_TYPE),
            db_name: r.bytes_at(offsets::DB_NAME),
            extents: r.i32_at(offsets::EXTENTS),
            session_error: r.i16_at(offsets::SESSION_ERROR),
            regular: r.u8_at(offsets::REGULAR),
            dim_info: r.u8_at(offsets::DIM_INFO),
            dim: r.i16_array(offsets::DIM),
            intent_p1: r.f32_at(offsets::INTENT_P1),
            intent_p2: r.f32_at(offsets::INTENT_P2),
            intent_p3: r.f32_at(offsets::INTENT_P3),
            intent_code: r.i16_at(offsets::INTENT_CODE),
            datatype: r.i16_at(offsets::DATATYPE),
            bitpix: r.i16_at(offsets::BITPIX),
            slice_start: r.i16_at(offsets::SLICE_START),
            pixdim: r.f32_array(offsets::PIXDIM),
            vox_offset: r.f32_at(offsets::VOX_OFFSET),
            scl_slope: r.f32_at(offsets::SCL_SLOPE),
            scl_inter: r.f32_at(offsets::SCL_INTER),
            slice_end: r.i16_at(offsets::SLICE_END),
            slice_code: r.u8_at(offsets::SLICE_CODE),
            xyzt_units: r.u8_at(offsets::XYZT_UNITS),
            cal_max: r.f32_at(offsets::CAL_MAX),
            cal_min: r.f32_at(offsets::CAL_MIN),
            slice_duration: r.f32_at(offsets::SLICE_DURATION),
            toffset: r.f32_at(offsets::TOFFSET),
            glmax: r.i32_at(offsets::GLMAX),
            glmin: r.i32_at(offsets::GLMIN),
            descrip: r.bytes_at(offsets::DESCRIP),
            aux_file: r.bytes_at(offsets::AUX_FILE),
            qform_code: r.i16_at(offsets::QFORM_CODE),
            sform_code: r.i16_at(offsets::SFORM_CODE),
            quatern_b: r.f32_at(offsets::QUATERN_B),
            quatern_c: r.f32_at(offsets::QUATERN_C),
            quatern_d: r.f32_at(offsets::QUATERN_D),
            qoffset_x: r.f32_at(offsets::QOFFSET_X),
            qoffset_y: r.f32_at(offsets::QOFFSET_Y),
            qoffset_z: r.f32_at(offsets::QOFFSET_Z),
            srow_x: r.f32_array(offsets::SROW_X),
            srow_y: r.f32_array(offsets::SROW_Y),
            srow_z: r.f32_array(offsets::SROW_Z),
            intent_name: r.bytes_at(offsets::INTENT_NAME),
            magic: r.bytes_at(offsets::MAGIC),
        }
    }

    /// Encode the header into its 348-byte on-disk form.
    ///
    /// Inverse of [`NiftiHeader::decode_with`]: for any buffer `b`,
    /// `decode_with(b, o).to_bytes(o) == b[..348]`.
    pub fn to_bytes(&self, order: ByteOrder) -> [u8; HEADER_SIZE] {
        let mut w = FieldWriter {
            bytes: [0u8; HEADER_SIZE],
            order,
        };

        w.i32_at(offsets::SIZEOF_HDR, self.sizeof_hdr);
        w.bytes_at(offsets::DATA_TYPE, &self.data_type);
        w.bytes_at(offsets::DB_NAME, &self.db_name);
        w.i32_at(offsets::EXTENTS, self.extents);
        w.i16_at(offsets::SESSION_ERROR, self.session_error);
        w.u8_at(offsets::REGULAR, self.regular);
        w.u8_at(offsets::DIM_INFO, self.dim_info);
        w.i16_array(offsets::DIM, &self.dim);
        w.f32_at(offsets::INTENT_P1, self.intent_p1);
        w.f32_at(offsets::INTENT_P2, self.intent_p2);
        w.f32_at(offsets::INTENT_P3, self.intent_p3);
        w.i16_at(offsets::INTENT_CODE, self.intent_code);
        w.i16_at(offsets::DATATYPE, self.datatype);
        w.i16_at(offsets::BITPIX, self.bitpix);
        w.i16_at(offsets::SLICE_START, self.slice_start);
        w.f32_array(offsets::PIXDIM, &self.pixdim);
        w.f32_at(offsets::VOX_OFFSET, self.vox_offset);
        w.f32_at(offsets::SCL_SLOPE, self.scl_slope);
        w.f32_at(offsets::SCL_INTER, self.scl_inter);
        w.i16_at(offsets::SLICE_END, self.slice_end);
        w.u8_at(offsets::SLICE_CODE, self.slice_code);
        w.u8_at(offsets::XYZT_UNITS, self.xyzt_units);
        w.f32_at(offsets::CAL_MAX, self.cal_max);
        w.f32_at(offsets::CAL_MIN, self.cal_min);
        w.f32_at(offsets::SLICE_DURATION, self.slice_duration);
        w.f32_at(offsets::TOFFSET, self.toffset);
        w.i32_at(offsets::GLMAX, self.glmax);
        w.i32_at(offsets::GLMIN, self.glmin);
        w.bytes_at(offsets::DESCRIP, &self.descrip);
        w.bytes_at(offsets::AUX_FILE, &self.aux_file);
        w.i16_at(offsets::QFORM_CODE, self.qform_code);
        w.i16_at(offsets::SFORM_CODE, self.sform_code);
        w.f32_at(offsets::QUATERN_B, self.quatern_b);
        w.f32_at(offsets::QUATERN_C, self.quatern_c);
        w.f32_at(offsets::QUATERN_D, self.quatern_d);
        w.f32_at(offsets::QOFFSET_X, self.qoffset_x);
        w.f32_at(offsets::QOFFSET_Y, self.qoffset_y);
        w.f32_at(offsets::QOFFSET_Z, self.qoffset_z);
        w.f32_array(offsets::SROW_X, &self.srow_x);
        w.f32_array(offsets::SROW_Y, &self.srow_y);
        w.f32_array(offsets::SROW_Z, &self.srow_z);
        w.bytes_at(offsets::INTENT_NAME, &self.intent_name);
        w.bytes_at(offsets::MAGIC, &self.magic);

        w.bytes
    }

    /// Whether `dim[0]` is a rank NIfTI-1 can express.
    #[inline]
    pub fn has_plausible_rank(&self) -> bool {
        (1..=MAX_RANK).contains(&self.dim[0])
    }

    /// Every header field as `(name, type, value)`, in on-disk order.
    pub fn fields(&self) -> Vec<(&'static str, &'static str, String)> {
        vec![
            ("sizeof_hdr", "i32", self.sizeof_hdr.to_string()),
            ("data_type", "[u8; 10]", format!("{:?}", self.data_type)),
            ("db_name", "[u8; 18]", format!("{:?}", self.db_name)),
            ("extents", "i32", self.extents.to_string()),
            ("session_error", "i16", self.session_error.to_string()),
            ("regular", "u8", self.regular.to_string()),
            ("dim_info", "u8", self.dim_info.to_string()),
            ("dim", "[i16; 8]", format!("{:?}", self.dim)),
            ("intent_p1", "f32", self.intent_p1.to_string()),
            ("intent_p2", "f32", self.intent_p2.to_string()),
            ("intent_p3", "f32", self.intent_p3.to_string()),
            ("intent_code", "i16", self.intent_code.to_string()),
            ("datatype", "i16", self.datatype.to_string()),
            ("bitpix", "i16", self.bitpix.to_string()),
            ("slice_start", "i16", self.slice_start.to_string()),
            ("pixdim", "[f32; 8]", format!("{:?}", self.pixdim)),
            ("vox_offset", "f32", self.vox_offset.to_string()),
            ("scl_slope", "f32", self.scl_slope.to_string()),
            ("scl_inter", "f32", self.scl_inter.to_string()),
            ("slice_end", "i16", self.slice_end.to_string()),
            ("slice_code", "u8", self.slice_code.to_string()),
            ("xyzt_units", "u8", self.xyzt_units.to_string()),
            ("cal_max", "f32", self.cal_max.to_string()),
            ("cal_min", "f32", self.cal_min.to_string()),
            ("slice_duration", "f32", self.slice_duration.to_string()),
            ("toffset", "f32", self.toffset.to_string()),
            ("glmax", "i32", self.glmax.to_string()),
            ("glmin", "i32", self.glmin.to_string()),
            ("descrip", "[u8; 80]", format!("{:?}", text_field(&self.descrip))),
            ("aux_file", "[u8; 24]", format!("{:?}", text_field(&self.aux_file))),
            ("qform_code", "i16", self.qform_code.to_string()),
            ("sform_code", "i16", self.sform_code.to_string()),
            ("quatern_b", "f32", self.quatern_b.to_string()),
            ("quatern_c", "f32", self.quatern_c.to_string()),
            ("quatern_d", "f32", self.quatern_d.to_string()),
            ("qoffset_x", "f32", self.qoffset_x.to_string()),
            ("qoffset_y", "f32", self.qoffset_y.to_string()),
            ("qoffset_z", "f32", self.qoffset_z.to_string()),
            ("srow_x", "[f32; 4]", format!("{:?}", self.srow_x)),
            ("srow_y", "[f32; 4]", format!("{:?}", self.srow_y)),
            ("srow_z", "[f32; 4]", format!("{:?}", self.srow_z)),
            (
                "intent_name",
                "[u8; 16]",
                format!("{:?}", text_field(&self.intent_name)),
            ),
            ("magic", "[u8; 4]", format!("{:?}", self.magic)),
        ]
    }
}

impl fmt::Display for NiftiHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, ty, value)) in self.fields().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {} {} = {}", i, name, ty, value)?;
        }
        Ok(())
    }
}

/// Interpret a NUL-padded character field as text.
///
/// Stops at the first NUL; invalid UTF-8 is replaced rather than rejected.
pub fn text_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

// =============================================================================
// Tests
// =============================================================================
