use pensum_core::ProgressRecord;

use crate::repository::StorageError;

/// Serializes the record into its JSON payload.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode(record: &ProgressRecord) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decodes a stored payload, substituting the empty record for anything
/// unreadable.
///
/// Recovery happens at whole-payload granularity: bad JSON, a wrong shape or
/// an unknown state literal all yield the empty record rather than an error.
#[must_use]
pub fn decode(payload: &str) -> ProgressRecord {
    serde_json::from_str(payload).unwrap_or_default()
}
