#![forbid(unsafe_code)]

pub mod model;
pub mod stats;

pub use model::{
    Catalog, CatalogError, CatalogFile, CompletionState, Course, CourseDraft, CourseError,
    CourseId, Curriculum, ParseCompletionStateError, ProgressRecord,
};
pub use stats::{RemainingTerms, Statistics, compute_statistics};
