use thiserror::Error;

/// I/O errors that can occur when loading a file into memory
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Error reported by the local filesystem
    #[error("Local I/O error: {0}")]
    Local(String),

    /// Chunk size must be non-zero
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    /// A chunk worker panicked or was cancelled
    #[error("Chunk worker failed: {0}")]
    Worker(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Local(err.to_string())
    }
}

/// Errors that can occur when decoding a NIfTI-1 buffer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NiftiError {
    /// Buffer cannot hold a complete header
    #[error("Header too short: need at least {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// dim[0] is outside [1, 7] under both byte orders
    #[error(
        "Indeterminate byte order: dim[0] is {little_endian} as little-endian and {big_endian} as big-endian, expected 1..=7"
    )]
    IndeterminateByteOrder { little_endian: i16, big_endian: i16 },

    /// sizeof_hdr is not 348
    #[error("Unsupported header size: expected 348, got {0}")]
    UnsupportedHeaderSize(i32),

    /// Magic is not "n+1\0" (header and data in one file)
    #[error("Unsupported storage mode: magic is {0:?}, only single-file \"n+1\\0\" is supported")]
    UnsupportedStorageMode([u8; 4]),

    /// Datatype is DT_UNKNOWN or DT_BINARY
    #[error("Invalid voxel data type: {0}")]
    InvalidDataType(i16),

    /// Voxel payload extends past the end of the buffer
    #[error("Truncated payload: {length} bytes at offset {offset} exceed buffer of {size} bytes")]
    TruncatedPayload { offset: u64, length: u64, size: u64 },

    /// Datatype has no fixed-width scalar representation
    #[error("Unsupported sample type: datatype {0} cannot be decoded as scalar samples")]
    UnsupportedSampleType(i16),
}

/// Errors surfaced by the end-to-end load-and-decode path
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// NIfTI decoding error
    #[error("NIfTI error: {0}")]
    Nifti(#[from] NiftiError),
}
