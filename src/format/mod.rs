//! Format decoders for volumetric image files.
//!
//! Only single-file NIfTI-1 is supported. The decoders operate on a buffer
//! that is already fully in memory; see [`crate::io`] for loading one.

pub mod nifti;

pub use nifti::{decode, ByteOrder, DecodedImage, ImageDescriptor, NiftiHeader, VoxelSlice};
