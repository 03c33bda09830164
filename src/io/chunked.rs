use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tokio::task::JoinSet;
use tracing::debug;

use super::{FileRangeReader, RangeReader};
use crate::error::IoError;

/// Default chunk size: 8KB
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Read an entire resource into memory using one task per chunk.
///
/// The resource is split into `ceil(size / chunk_size)` disjoint ranges. Each
/// range is fetched on its own task and copied into its slot of a single
/// preallocated buffer once every task has finished. The first failing task
/// fails the whole load; the remaining tasks are aborted when the set drops.
///
/// # Errors
/// - `InvalidChunkSize` if `chunk_size` is zero
/// - `Worker` if a task panicked
/// - Any error returned by the underlying reader
pub async fn read_all_chunked<R: RangeReader + 'static>(
    reader: Arc<R>,
    chunk_size: usize,
) -> Result<Bytes, IoError> {
    if chunk_size == 0 {
        return Err(IoError::InvalidChunkSize(chunk_size));
    }

    let size = reader.size();
    let len = usize::try_from(size).map_err(|_| {
        IoError::Local(format!(
            "{} is too large to load into memory ({} bytes)",
            reader.identifier(),
            size
        ))
    })?;

    if len == 0 {
        return Ok(Bytes::new());
    }

    let chunk_count = len.div_ceil(chunk_size);
    debug!(
        resource = reader.identifier(),
        size = len,
        chunk_size,
        chunk_count,
        "Loading resource in chunks"
    );

    let mut workers = JoinSet::new();
    for index in 0..chunk_count {
        let reader = Arc::clone(&reader);
        let start = index * chunk_size;
        let chunk_len = chunk_size.min(len - start);

        workers.spawn(async move {
            let bytes = reader.read_exact_at(start as u64, chunk_len).await?;
            Ok::<_, IoError>((start, chunk_len, bytes))
        });
    }

    let mut buffer = vec![0u8; len];
    while let Some(joined) = workers.join_next().await {
        let (start, chunk_len, bytes) = joined.map_err(|e| IoError::Worker(e.to_string()))??;

        if bytes.len() != chunk_len {
            return Err(IoError::Local(format!(
                "short read from {}: expected {} bytes at offset {}, got {}",
                reader.identifier(),
                chunk_len,
                start,
                bytes.len()
            )));
        }

        buffer[start..start + chunk_len].copy_from_slice(&bytes);
    }

    Ok(Bytes::from(buffer))
}

/// Open a local file and read it fully with [`read_all_chunked`].
pub async fn load_file(path: impl AsRef<Path>, chunk_size: usize) -> Result<Bytes, IoError> {
    let reader = FileRangeReader::open(path).await?;
    debug!(path = %reader.path().display(), size = reader.size(), "Opened file");
    read_all_chunked(Arc::new(reader), chunk_size).await
}
