//! Test utilities for integration tests.
//!
//! This module provides a request-tracking mock reader and helpers for
//! building synthetic NIfTI-1 files in either byte order.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use nifti1_reader::error::IoError;
use nifti1_reader::io::RangeReader;
use nifti1_reader::{ByteOrder, NiftiHeader, HEADER_BLOCK_SIZE};

// =============================================================================
// Mock Range Reader with Request Tracking
// =============================================================================

/// A mock range reader that tracks all read requests.
pub struct TrackingMockReader {
    data: Bytes,
    identifier: String,
    request_count: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<(u64, usize)>>>,
}

impl TrackingMockReader {
    pub fn new(data: Vec<u8>, identifier: impl Into<String>) -> Self {
        Self {
            data: Bytes::from(data),
            identifier: identifier.into(),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub async fn get_requests(&self) -> Vec<(u64, usize)> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl RangeReader for TrackingMockReader {
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push((offset, len));

        let start = offset as usize;
        let end = start + len;
        if end > self.data.len() {
            return Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size: self.data.len() as u64,
            });
        }
        Ok(self.data.slice(start..end))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// NIfTI Builders
// =============================================================================

/// Header for an int16 volume with the given dim[] and vox_offset 352.
pub fn int16_header(dim: [i16; 8]) -> NiftiHeader {
    NiftiHeader {
        dim,
        datatype: 4,
        bitpix: 16,
        pixdim: [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        vox_offset: HEADER_BLOCK_SIZE as f32,
        ..NiftiHeader::default()
    }
}

/// Encode int16 samples in the given byte order.
pub fn encode_i16(samples: &[i16], order: ByteOrder) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|s| match order {
            ByteOrder::LittleEndian => s.to_le_bytes(),
            ByteOrder::BigEndian => s.to_be_bytes(),
        })
        .collect()
}

/// Build a complete single-file NIfTI: header, zeroed extension flag,
/// padding up to vox_offset, then the payload.
pub fn create_nifti(header: &NiftiHeader, order: ByteOrder, payload: &[u8]) -> Vec<u8> {
    let data_start = if header.vox_offset >= HEADER_BLOCK_SIZE as f32 {
        header.vox_offset as usize
    } else {
        HEADER_BLOCK_SIZE
    };

    let mut bytes = header.to_bytes(order).to_vec();
    bytes.resize(data_start, 0);
    bytes.extend_from_slice(payload);
    bytes
}

/// The minimal 2x2x2 int16 volume holding samples 0..8.
pub fn create_minimal_nifti(order: ByteOrder) -> Vec<u8> {
    let header = int16_header([3, 2, 2, 2, 0, 0, 0, 0]);
    let samples: Vec<i16> = (0..8).collect();
    create_nifti(&header, order, &encode_i16(&samples, order))
}

/// Write bytes to a new temporary file.
pub fn write_temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
