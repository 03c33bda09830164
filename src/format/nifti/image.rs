//! Image descriptor derived from a validated NIfTI-1 header.

use serde::Serialize;

use super::codes::{DataType, SpatialUnits, TemporalUnits, XformCode};
use super::header::{text_field, ByteOrder, NiftiHeader};

/// Consumer-facing description of a NIfTI-1 image.
///
/// Built once per file by [`ImageDescriptor::from_header`]. Extents are taken
/// from dim[1..=7] as stored, whatever the rank; a non-positive extent is 1 so
/// that products over the extents never collapse to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    /// Number of meaningful axes (dim[0])
    pub rank: usize,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub nt: usize,
    pub nu: usize,
    pub nv: usize,
    pub nw: usize,
    /// dim[] exactly as stored
    pub dim: [i16; 8],
    /// Number of voxels in the payload, nx * ny * nz * nt * nu
    pub nvox: usize,
    /// Bytes per voxel, bitpix / 8
    pub nbyper: usize,
    /// Raw datatype code
    pub datatype: i16,
    /// Decoded datatype, `None` for unrecognized codes
    pub data_type: Option<DataType>,

    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub dt: f64,
    pub du: f64,
    pub dv: f64,
    pub dw: f64,
    /// pixdim[] widened to f64
    pub pixdim: [f64; 8],
    /// Orientation handedness, -1 when pixdim[0] < 0, otherwise 1
    pub qfac: f64,

    pub scl_slope: f64,
    pub scl_inter: f64,
    pub cal_min: f64,
    pub cal_max: f64,

    pub qform_code: i16,
    pub sform_code: i16,
    pub qform: Option<XformCode>,
    pub sform: Option<XformCode>,
    pub quatern_b: f64,
    pub quatern_c: f64,
    pub quatern_d: f64,
    pub qoffset_x: f64,
    pub qoffset_y: f64,
    pub qoffset_z: f64,
    pub srow_x: [f64; 4],
    pub srow_y: [f64; 4],
    pub srow_z: [f64; 4],

    /// Axis indices (1, 2, 3, or 0 if unset) unpacked from dim_info
    pub freq_dim: u8,
    pub phase_dim: u8,
    pub slice_dim: u8,

    pub slice_code: u8,
    pub slice_start: i16,
    pub slice_end: i16,
    pub slice_duration: f64,
    pub toffset: f64,

    pub xyz_units: Option<SpatialUnits>,
    pub time_units: Option<TemporalUnits>,

    pub intent_code: i16,
    pub intent_p1: f64,
    pub intent_p2: f64,
    pub intent_p3: f64,
    pub intent_name: String,
    pub descrip: String,
    pub aux_file: String,

    /// Byte order of the header, reused for the voxel payload
    pub byte_order: ByteOrder,
}

impl ImageDescriptor {
    /// Build a descriptor from a validated header and the byte order it was
    /// decoded with.
    ///
    /// Total: performs no checks beyond those already done by validation.
    pub fn from_header(header: &NiftiHeader, byte_order: ByteOrder) -> Self {
        let rank = header.dim[0].clamp(0, 7) as usize;
        let extent = |axis: usize| -> usize {
            match header.dim[axis] {
                n if n > 0 => n as usize,
                _ => 1,
            }
        };
        let nx = extent(1);
        let ny = extent(2);
        let nz = extent(3);
        let nt = extent(4);
        let nu = extent(5);
        let nv = extent(6);
        let nw = extent(7);

        // The stored payload spans the first five axes
        let nvox = [nx, ny, nz, nt, nu]
            .iter()
            .fold(1usize, |acc, &n| acc.saturating_mul(n));

        let pixdim = header.pixdim.map(f64::from);
        let spacing = |axis: usize| pixdim[axis].abs();

        ImageDescriptor {
            rank,
            nx,
            ny,
            nz,
            nt,
            nu,
            nv,
            nw,
            dim: header.dim,
            nvox,
            nbyper: (header.bitpix.max(0) / 8) as usize,
            datatype: header.datatype,
            data_type: DataType::from_i16(header.datatype),

            dx: spacing(1),
            dy: spacing(2),
            dz: spacing(3),
            dt: spacing(4),
            du: spacing(5),
            dv: spacing(6),
            dw: spacing(7),
            pixdim,
            qfac: if header.pixdim[0] < 0.0 { -1.0 } else { 1.0 },

            scl_slope: f64::from(header.scl_slope),
            scl_inter: f64::from(header.scl_inter),
            cal_min: f64::from(header.cal_min),
            cal_max: f64::from(header.cal_max),

            qform_code: header.qform_code,
            sform_code: header.sform_code,
            qform: XformCode::from_i16(header.qform_code),
            sform: XformCode::from_i16(header.sform_code),
            quatern_b: f64::from(header.quatern_b),
            quatern_c: f64::from(header.quatern_c),
            quatern_d: f64::from(header.quatern_d),
            qoffset_x: f64::from(header.qoffset_x),
            qoffset_y: f64::from(header.qoffset_y),
            qoffset_z: f64::from(header.qoffset_z),
            srow_x: header.srow_x.map(f64::from),
            srow_y: header.srow_y.map(f64::from),
            srow_z: header.srow_z.map(f64::from),

            freq_dim: header.dim_info & 0x03,
            phase_dim: (header.dim_info >> 2) & 0x03,
            slice_dim: (header.dim_info >> 4) & 0x03,

            slice_code: header.slice_code,
            slice_start: header.slice_start,
            slice_end: header.slice_end,
            slice_duration: f64::from(header.slice_duration),
            toffset: f64::from(header.toffset),

            xyz_units: SpatialUnits::from_xyzt(header.xyzt_units),
            time_units: TemporalUnits::from_xyzt(header.xyzt_units),

            intent_code: header.intent_code,
            intent_p1: f64::from(header.intent_p1),
            intent_p2: f64::from(header.intent_p2),
            intent_p3: f64::from(header.intent_p3),
            intent_name: text_field(&header.intent_name),
            descrip: text_field(&header.descrip),
            aux_file: text_field(&header.aux_file),

            byte_order,
        }
    }

    /// Extents nx..nw as an array indexed from axis 1.
    pub fn extents(&self) -> [usize; 7] {
        [self.nx, self.ny, self.nz, self.nt, self.nu, self.nv, self.nw]
    }

    /// Linear rescaling to apply to stored samples, `None` when slope is 0.
    pub fn scaling(&self) -> Option<(f64, f64)> {
        if self.scl_slope == 0.0 {
            None
        } else {
            Some((self.scl_slope, self.scl_inter))
        }
    }

    /// The coordinate transforms the file defines, qform first.
    ///
    /// Unknown (0) and unrecognized codes are left out.
    pub fn transforms(&self) -> Vec<(&'static str, XformCode)> {
        [("qform", self.qform), ("sform", self.sform)]
            .into_iter()
            .filter_map(|(name, code)| code.filter(|c| c.is_set()).map(|c| (name, c)))
            .collect()
    }
}
