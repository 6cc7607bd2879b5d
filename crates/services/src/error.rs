//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `CourseStateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseStateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
