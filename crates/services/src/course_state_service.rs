use std::sync::Arc;

use pensum_core::{
    Catalog, CompletionState, Course, CourseId, ProgressRecord, RemainingTerms, Statistics,
    compute_statistics,
};
use storage::repository::ProgressRepository;

use crate::error::CourseStateError;
use crate::observer::ProgressObserver;

//
// ─── STATE CHANGE ──────────────────────────────────────────────────────────────
//

/// Outcome of a committed state mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub course_id: CourseId,
    pub previous: CompletionState,
    pub state: CompletionState,
    pub statistics: Statistics,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Single mutation entry point for the student's progress.
///
/// Owns the authoritative in-memory record and writes it through to the
/// repository before committing, so a failed save leaves the record
/// untouched. Statistics are derived on demand from the record and the
/// catalog; there is no separate per-course mirror to drift out of sync.
pub struct CourseStateService {
    catalog: Arc<Catalog>,
    repo: Arc<dyn ProgressRepository>,
    record: ProgressRecord,
    total_career_credits: u32,
    remaining_terms: RemainingTerms,
    observers: Vec<Arc<dyn ProgressObserver>>,
}

impl CourseStateService {
    /// Build the service over a catalog, seeding the record from storage.
    ///
    /// # Errors
    ///
    /// Returns `CourseStateError::Storage` if the record cannot be read.
    pub async fn load(
        catalog: Arc<Catalog>,
        total_career_credits: u32,
        repo: Arc<dyn ProgressRepository>,
    ) -> Result<Self, CourseStateError> {
        let record = repo.load().await?;

        Ok(Self {
            catalog,
            repo,
            record,
            total_career_credits,
            remaining_terms: RemainingTerms::default(),
            observers: Vec::new(),
        })
    }

    /// Register an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: Arc<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    /// Set a course to a specific state.
    ///
    /// Unknown ids are tolerated: the call returns `Ok(None)` and nothing is
    /// persisted or announced. Otherwise the updated record is persisted
    /// first, then committed and announced. Setting the current state again
    /// still persists and notifies.
    ///
    /// # Errors
    ///
    /// Returns `CourseStateError::Storage` if the save fails; the in-memory
    /// record is left unchanged.
    pub async fn set_state(
        &mut self,
        id: &CourseId,
        state: CompletionState,
    ) -> Result<Option<StateChange>, CourseStateError> {
        if !self.catalog.contains(id) {
            return Ok(None);
        }

        let previous = self.record.get(id);

        let mut updated = self.record.clone();
        updated.set(id.clone(), state);
        self.repo.save(&updated).await?;
        self.record = updated;

        let statistics = self.statistics();
        for observer in &self.observers {
            observer.state_changed(id, state);
        }
        for observer in &self.observers {
            observer.statistics_changed(&statistics);
        }

        Ok(Some(StateChange {
            course_id: id.clone(),
            previous,
            state,
            statistics,
        }))
    }

    /// Advance a course one step in the fixed state cycle.
    ///
    /// # Errors
    ///
    /// Returns `CourseStateError::Storage` if the save fails.
    pub async fn cycle(&mut self, id: &CourseId) -> Result<Option<StateChange>, CourseStateError> {
        let next = self.record.get(id).successor();
        self.set_state(id, next).await
    }

    /// Put a course back to not taken.
    ///
    /// # Errors
    ///
    /// Returns `CourseStateError::Storage` if the save fails.
    pub async fn reset(&mut self, id: &CourseId) -> Result<Option<StateChange>, CourseStateError> {
        self.set_state(id, CompletionState::NotTaken).await
    }

    /// Update the remaining-terms input and announce the new statistics.
    ///
    /// Terms are advisory display input and are not persisted.
    pub fn set_remaining_terms(&mut self, terms: RemainingTerms) -> Statistics {
        self.remaining_terms = terms;

        let statistics = self.statistics();
        for observer in &self.observers {
            observer.statistics_changed(&statistics);
        }
        statistics
    }

    /// Current statistics block, derived on demand.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        compute_statistics(
            &self.catalog,
            &self.record,
            self.remaining_terms,
            self.total_career_credits,
        )
    }

    /// The recorded state of one course, `NotTaken` when unrecorded.
    #[must_use]
    pub fn state_of(&self, id: &CourseId) -> CompletionState {
        self.record.get(id)
    }

    /// Every catalog course paired with its current state, in catalog order.
    pub fn course_states(&self) -> impl Iterator<Item = (&Course, CompletionState)> {
        self.catalog
            .courses()
            .iter()
            .map(|course| (course, self.record.get(course.id())))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn remaining_terms(&self) -> RemainingTerms {
        self.remaining_terms
    }

    #[must_use]
    pub fn total_career_credits(&self) -> u32 {
        self.total_career_credits
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
