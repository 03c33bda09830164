//! Chunked loading integration tests.
//!
//! Tests verify:
//! - Chunk planning (count, sizes, disjoint offsets)
//! - Byte-exact reassembly regardless of task completion order
//! - Loading real files from disk and decoding the result
//! - Error propagation for missing files and bad chunk sizes

use std::sync::Arc;

use nifti1_reader::{
    decode, load_file, read_all_chunked, ByteOrder, FileRangeReader, FormatError, IoError,
    NiftiHeader, RangeReader, DEFAULT_CHUNK_SIZE,
};

use super::test_utils::{
    create_minimal_nifti, create_nifti, encode_i16, int16_header, write_temp_file,
    TrackingMockReader,
};

// =============================================================================
// Chunk Planning Tests
// =============================================================================

#[tokio::test]
async fn test_chunk_count_and_ranges() {
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let reader = Arc::new(TrackingMockReader::new(data.clone(), "mem://volume.nii"));

    let loaded = read_all_chunked(Arc::clone(&reader), DEFAULT_CHUNK_SIZE)
        .await
        .unwrap();
    assert_eq!(&loaded[..], &data[..]);

    // 20000 = 8192 + 8192 + 3616
    assert_eq!(reader.request_count(), 3);

    let mut requests = reader.get_requests().await;
    requests.sort();
    assert_eq!(requests, vec![(0, 8192), (8192, 8192), (16384, 3616)]);
}

#[tokio::test]
async fn test_exact_multiple_of_chunk_size() {
    let data = vec![7u8; 4 * 1024];
    let reader = Arc::new(TrackingMockReader::new(data, "mem://exact"));

    let loaded = read_all_chunked(Arc::clone(&reader), 1024).await.unwrap();
    assert_eq!(loaded.len(), 4096);
    assert_eq!(reader.request_count(), 4);
}

#[tokio::test]
async fn test_single_chunk_when_smaller_than_chunk_size() {
    let file = create_minimal_nifti(ByteOrder::LittleEndian);
    let reader = Arc::new(TrackingMockReader::new(file.clone(), "mem://small"));

    let loaded = read_all_chunked(Arc::clone(&reader), DEFAULT_CHUNK_SIZE)
        .await
        .unwrap();
    assert_eq!(&loaded[..], &file[..]);
    assert_eq!(reader.get_requests().await, vec![(0, file.len())]);
}

#[tokio::test]
async fn test_empty_resource_issues_no_reads() {
    let reader = Arc::new(TrackingMockReader::new(Vec::new(), "mem://empty"));

    let loaded = read_all_chunked(Arc::clone(&reader), 16).await.unwrap();
    assert!(loaded.is_empty());
    assert_eq!(reader.request_count(), 0);
}

#[tokio::test]
async fn test_zero_chunk_size_rejected() {
    let reader = Arc::new(TrackingMockReader::new(vec![0u8; 16], "mem://zero"));

    let result = read_all_chunked(Arc::clone(&reader), 0).await;
    assert!(matches!(result, Err(IoError::InvalidChunkSize(0))));
    assert_eq!(reader.request_count(), 0);
}

// =============================================================================
// File Loading Tests
// =============================================================================

#[tokio::test]
async fn test_load_file_is_byte_exact_for_odd_chunk_sizes() {
    let header = int16_header([4, 5, 6, 7, 3, 0, 0, 0]);
    let samples: Vec<i16> = (0..630).map(|i| (i * 37 % 1000 - 500) as i16).collect();
    let file = create_nifti(
        &header,
        ByteOrder::BigEndian,
        &encode_i16(&samples, ByteOrder::BigEndian),
    );
    let temp = write_temp_file(&file);

    for chunk_size in [1, 3, 100, 351, 352, 4096, DEFAULT_CHUNK_SIZE] {
        let loaded = load_file(temp.path(), chunk_size).await.unwrap();
        assert_eq!(&loaded[..], &file[..], "chunk size {}", chunk_size);
    }
}

#[tokio::test]
async fn test_load_then_decode() {
    let header = NiftiHeader {
        scl_slope: 2.0,
        scl_inter: -1.0,
        ..int16_header([3, 4, 4, 2, 0, 0, 0, 0])
    };
    let samples: Vec<i16> = (0..32).collect();
    let file = create_nifti(
        &header,
        ByteOrder::LittleEndian,
        &encode_i16(&samples, ByteOrder::LittleEndian),
    );
    let temp = write_temp_file(&file);

    let bytes = load_file(temp.path(), 64).await.unwrap();
    let image = decode(&bytes).unwrap();

    assert_eq!(image.descriptor.nvox, 32);
    assert_eq!(image.descriptor.byte_order, ByteOrder::LittleEndian);

    let scaled = image.scaled_samples().unwrap();
    assert_eq!(scaled.len(), 32);
    assert_eq!(scaled[0], -1.0);
    assert_eq!(scaled[31], 61.0);
}

#[tokio::test]
async fn test_file_reader_reports_size() {
    let file = create_minimal_nifti(ByteOrder::BigEndian);
    let temp = write_temp_file(&file);

    let reader = FileRangeReader::open(temp.path()).await.unwrap();
    assert_eq!(reader.size(), file.len() as u64);

    let header = reader.read_exact_at(0, 348).await.unwrap();
    let (_, order) = NiftiHeader::parse(&header).unwrap();
    assert_eq!(order, ByteOrder::BigEndian);
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_file(dir.path().join("missing.nii"), DEFAULT_CHUNK_SIZE).await;

    assert!(matches!(result, Err(IoError::NotFound(_))));
}

#[tokio::test]
async fn test_truncated_file_fails_decode_not_load() {
    let file = create_minimal_nifti(ByteOrder::LittleEndian);
    let temp = write_temp_file(&file[..360]);

    let bytes = load_file(temp.path(), 128).await.unwrap();
    assert_eq!(bytes.len(), 360);

    let err: FormatError = decode(&bytes).unwrap_err().into();
    assert!(err.to_string().contains("352"));
}
