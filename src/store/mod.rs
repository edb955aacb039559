pub mod dir_store;
pub mod memory;
pub mod protos;
pub mod record;

use thiserror::Error;
use tracing::debug;

use crate::sample::{Sample, SAMPLE_LEN};

pub use dir_store::DirStore;
pub use memory::MemoryStore;
pub use record::{decode_record, encode_record, StoreRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store '{path}': {reason}")]
    Open { path: String, reason: String },
    #[error("no record for key {0}")]
    NotFound(String),
    #[error("failed to read record {key}: {source}")]
    Read { key: String, source: std::io::Error },
    #[error("failed to write record {key}: {source}")]
    Write { key: String, source: std::io::Error },
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("failed to decode record: {0}")]
    Decode(#[source] protobuf::Error),
    #[error("failed to encode record: {0}")]
    Encode(#[source] protobuf::Error),
    #[error("sample index {0} out of range (max {MAX_SAMPLE_INDEX})")]
    IndexOutOfRange(u32),
    #[error("invalid image size: expected {SAMPLE_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Key-value store of serialized sample records.
///
/// Only lookup is needed by the pipeline; how records are persisted is up to
/// the implementation.
pub trait SampleStore {
    /// Raw record bytes for `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Largest index that still fits in an eight-digit key.
pub const MAX_SAMPLE_INDEX: u32 = 99_999_999;

/// Store key for a sample index: eight zero-padded decimal digits.
pub fn sample_key(index: u32) -> Result<String, StoreError> {
    if index > MAX_SAMPLE_INDEX {
        return Err(StoreError::IndexOutOfRange(index));
    }
    Ok(format!("{:08}", index))
}

/// A sample fetched from a store, with its label when the record has one.
#[derive(Debug, Clone)]
pub struct StoredSample {
    pub sample: Sample,
    pub label: Option<i32>,
}

/// Fetches and validates the sample stored under `index`.
///
/// The record's image payload must be exactly `SAMPLE_LEN` bytes.
pub fn lookup_sample<S: SampleStore + ?Sized>(store: &S, index: u32) -> Result<StoredSample, StoreError> {
    let key = sample_key(index)?;
    let raw = store.get(&key)?.ok_or_else(|| StoreError::NotFound(key.clone()))?;
    let StoreRecord { pixels, label } = decode_record(&raw)?;
    let sample = Sample::from_bytes(&pixels).map_err(|_| StoreError::InvalidLength(pixels.len()))?;
    debug!(key = %key, ?label, "loaded sample from store");
    Ok(StoredSample { sample, label })
}
