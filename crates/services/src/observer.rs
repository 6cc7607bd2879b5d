use pensum_core::{CompletionState, CourseId, Statistics};

/// Outbound notification contract for progress changes.
///
/// Observers are told about committed changes only, state first, statistics
/// second. Implementations render or mirror; they must not call back into
/// the service.
pub trait ProgressObserver: Send + Sync {
    /// A course's completion state changed.
    fn state_changed(&self, course_id: &CourseId, state: CompletionState);

    /// The statistics block was recomputed.
    fn statistics_changed(&self, statistics: &Statistics);
}
