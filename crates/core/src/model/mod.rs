mod catalog;
mod course;
mod progress;
mod state;

pub use catalog::{Catalog, CatalogError, CatalogFile, Curriculum};
pub use course::{Course, CourseDraft, CourseError, CourseId};
pub use progress::ProgressRecord;
pub use state::{CompletionState, ParseCompletionStateError};
