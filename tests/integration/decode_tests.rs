//! Decoding integration tests.
//!
//! Tests verify:
//! - Byte order detection for little-endian and big-endian files
//! - Header validation through the public decode entry point
//! - Voxel payload location and truncation handling
//! - Rescaling of int16 samples

use nifti1_reader::{
    decode, rescale_samples, validate_header, ByteOrder, DataType, NiftiError, NiftiHeader,
    HEADER_SIZE, MAGIC_FILE_PAIR,
};

use super::test_utils::{create_minimal_nifti, create_nifti, encode_i16, int16_header};

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_little_endian_round_trip() {
    let header = int16_header([4, 3, 4, 5, 6, 1, 1, 1]);
    let bytes = header.to_bytes(ByteOrder::LittleEndian);

    let (decoded, order) = NiftiHeader::parse(&bytes).unwrap();
    assert_eq!(order, ByteOrder::LittleEndian);
    assert_eq!(decoded, header);
}

#[test]
fn test_big_endian_round_trip() {
    let header = int16_header([4, 3, 4, 5, 6, 1, 1, 1]);
    let bytes = header.to_bytes(ByteOrder::BigEndian);

    let (decoded, order) = NiftiHeader::parse(&bytes).unwrap();
    assert_eq!(order, ByteOrder::BigEndian);
    assert_eq!(decoded, header);
}

#[test]
fn test_both_byte_orders_produce_equivalent_results() {
    let le = create_minimal_nifti(ByteOrder::LittleEndian);
    let be = create_minimal_nifti(ByteOrder::BigEndian);
    assert_ne!(le, be);

    let le_image = decode(&le).unwrap();
    let be_image = decode(&be).unwrap();

    assert_eq!(le_image.header, be_image.header);
    assert_eq!(le_image.descriptor.nvox, be_image.descriptor.nvox);
    assert_eq!(
        le_image.voxels.i16_samples().collect::<Vec<_>>(),
        be_image.voxels.i16_samples().collect::<Vec<_>>()
    );
}

#[test]
fn test_implausible_rank_under_both_orders() {
    for rank in [0, 8, 100, -1] {
        let header = int16_header([rank, 2, 2, 2, 0, 0, 0, 0]);
        let file = create_nifti(&header, ByteOrder::LittleEndian, &[0u8; 16]);

        assert!(
            matches!(decode(&file), Err(NiftiError::IndeterminateByteOrder { .. })),
            "rank {}",
            rank
        );
    }
}

#[test]
fn test_short_buffer() {
    let file = create_minimal_nifti(ByteOrder::LittleEndian);

    assert_eq!(
        decode(&file[..HEADER_SIZE - 1]).unwrap_err(),
        NiftiError::HeaderTooShort {
            required: HEADER_SIZE,
            actual: HEADER_SIZE - 1
        }
    );
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_header_size_rejected_regardless_of_other_fields() {
    let header = NiftiHeader {
        sizeof_hdr: 540,
        ..int16_header([3, 2, 2, 2, 0, 0, 0, 0])
    };
    assert_eq!(
        validate_header(&header),
        Err(NiftiError::UnsupportedHeaderSize(540))
    );

    let file = create_nifti(&header, ByteOrder::BigEndian, &[0u8; 16]);
    assert_eq!(
        decode(&file).unwrap_err(),
        NiftiError::UnsupportedHeaderSize(540)
    );
}

#[test]
fn test_two_file_magic_rejected() {
    let header = NiftiHeader {
        magic: MAGIC_FILE_PAIR,
        ..int16_header([3, 2, 2, 2, 0, 0, 0, 0])
    };
    let file = create_nifti(&header, ByteOrder::LittleEndian, &[0u8; 16]);

    assert_eq!(
        decode(&file).unwrap_err(),
        NiftiError::UnsupportedStorageMode(*b"ni1\0")
    );
}

#[test]
fn test_binary_datatype_rejected() {
    let header = NiftiHeader {
        datatype: 1,
        bitpix: 1,
        ..int16_header([3, 2, 2, 2, 0, 0, 0, 0])
    };
    let file = create_nifti(&header, ByteOrder::LittleEndian, &[0u8; 16]);

    assert_eq!(decode(&file).unwrap_err(), NiftiError::InvalidDataType(1));
}

// =============================================================================
// Descriptor Tests
// =============================================================================

#[test]
fn test_voxel_count_matches_extents() {
    for dim in [
        [3, 2, 3, 4, 0, 0, 0, 0],
        [4, 2, 3, 4, 5, 0, 0, 0],
        [5, 2, 3, 4, 5, 6, 1, 1],
        [5, 7, 1, 9, 1, 3, 1, 1],
        [3, 2, 2, 2, 5, 0, 0, 0],
        [3, 2, 3, 2, 4, 3, 0, 0],
        [4, 3, 2, 2, 2, 6, 0, 0],
    ] {
        let header = int16_header(dim);
        let nt = dim[4].max(1) as usize;
        let nu = dim[5].max(1) as usize;
        let expected = dim[1] as usize * dim[2] as usize * dim[3] as usize * nt * nu;

        let file = create_nifti(&header, ByteOrder::LittleEndian, &vec![0u8; expected * 2]);
        let image = decode(&file).unwrap();

        assert_eq!(image.descriptor.nvox, expected, "dim {:?}", dim);
        assert_eq!(image.voxels.len(), expected * 2, "dim {:?}", dim);
    }
}

#[test]
fn test_voxel_count_agrees_with_payload_when_rank_is_low() {
    let header = int16_header([3, 2, 2, 2, 5, 0, 0, 0]);
    let samples: Vec<i16> = (0..40).collect();
    let file = create_nifti(
        &header,
        ByteOrder::LittleEndian,
        &encode_i16(&samples, ByteOrder::LittleEndian),
    );

    let image = decode(&file).unwrap();
    assert_eq!(image.descriptor.nt, 5);
    assert_eq!(image.descriptor.nvox, 40);
    assert_eq!(
        image.voxels.len(),
        image.descriptor.nvox * image.descriptor.nbyper
    );
    assert_eq!(image.scaled_samples().unwrap().len(), image.descriptor.nvox);
}

#[test]
fn test_descriptor_records_datatype_and_order() {
    let header = NiftiHeader {
        datatype: 16,
        bitpix: 32,
        pixdim: [1.0, 0.5, 0.5, 2.0, 1.0, 1.0, 1.0, 1.0],
        ..int16_header([3, 2, 2, 1, 0, 0, 0, 0])
    };
    let file = create_nifti(&header, ByteOrder::BigEndian, &[0u8; 16]);

    let image = decode(&file).unwrap();
    assert_eq!(image.descriptor.data_type, Some(DataType::Float32));
    assert_eq!(image.descriptor.nbyper, 4);
    assert_eq!(image.descriptor.dz, 2.0);
    assert_eq!(image.descriptor.byte_order, ByteOrder::BigEndian);
}

// =============================================================================
// Voxel Slice Tests
// =============================================================================

#[test]
fn test_minimal_volume_end_to_end() {
    let file = create_minimal_nifti(ByteOrder::LittleEndian);
    assert_eq!(file.len(), 352 + 16);

    let image = decode(&file).unwrap();
    assert_eq!(image.descriptor.nvox, 8);
    assert_eq!(image.voxels.offset(), 352);
    assert_eq!(image.voxels.len(), 16);
    assert_eq!(image.voxels.as_bytes(), &file[352..]);
}

#[test]
fn test_low_vox_offset_overridden() {
    let header = NiftiHeader {
        vox_offset: 0.0,
        ..int16_header([3, 2, 1, 1, 0, 0, 0, 0])
    };
    let payload = encode_i16(&[11, 22], ByteOrder::LittleEndian);
    let file = create_nifti(&header, ByteOrder::LittleEndian, &payload);

    let image = decode(&file).unwrap();
    assert_eq!(image.voxels.offset(), 352);
    assert_eq!(image.voxels.i16_samples().collect::<Vec<_>>(), vec![11, 22]);
}

#[test]
fn test_vox_offset_500() {
    let header = NiftiHeader {
        vox_offset: 500.0,
        ..int16_header([3, 2, 1, 1, 0, 0, 0, 0])
    };
    let payload = encode_i16(&[-1, 1], ByteOrder::BigEndian);
    let file = create_nifti(&header, ByteOrder::BigEndian, &payload);
    assert_eq!(file.len(), 504);

    let image = decode(&file).unwrap();
    assert_eq!(image.voxels.offset(), 500);
    assert_eq!(image.voxels.i16_samples().collect::<Vec<_>>(), vec![-1, 1]);
}

#[test]
fn test_truncated_payload() {
    let file = create_minimal_nifti(ByteOrder::LittleEndian);

    assert_eq!(
        decode(&file[..file.len() - 1]).unwrap_err(),
        NiftiError::TruncatedPayload {
            offset: 352,
            length: 16,
            size: 367
        }
    );
}

#[test]
fn test_trailing_bytes_not_included() {
    let mut file = create_minimal_nifti(ByteOrder::LittleEndian);
    file.extend_from_slice(&[0xEE; 32]);

    let image = decode(&file).unwrap();
    assert_eq!(image.voxels.len(), 16);
}

// =============================================================================
// Rescaling Tests
// =============================================================================

#[test]
fn test_rescale_formula() {
    assert_eq!(rescale_samples([-3i16], 2.0, 1.0), vec![-5.0]);
}

#[test]
fn test_rescale_skipped_for_zero_slope() {
    let header = NiftiHeader {
        scl_slope: 0.0,
        scl_inter: 50.0,
        ..int16_header([3, 2, 2, 2, 0, 0, 0, 0])
    };
    let samples = [-4i16, -3, -2, -1, 0, 1, 2, 3];
    let file = create_nifti(
        &header,
        ByteOrder::LittleEndian,
        &encode_i16(&samples, ByteOrder::LittleEndian),
    );

    let image = decode(&file).unwrap();
    let expected: Vec<f32> = samples.iter().map(|&s| f32::from(s)).collect();
    assert_eq!(image.voxels.rescaled_i16(header.scl_slope, header.scl_inter), expected);

    let scaled = image.scaled_samples().unwrap();
    assert_eq!(scaled[0], -4.0);
    assert_eq!(scaled[7], 3.0);
}

#[test]
fn test_scaled_samples_big_endian() {
    let header = NiftiHeader {
        scl_slope: 0.5,
        scl_inter: 10.0,
        ..int16_header([3, 2, 1, 1, 0, 0, 0, 0])
    };
    let file = create_nifti(
        &header,
        ByteOrder::BigEndian,
        &encode_i16(&[4, -4], ByteOrder::BigEndian),
    );

    let image = decode(&file).unwrap();
    assert_eq!(image.scaled_samples().unwrap(), vec![12.0, 8.0]);
}
