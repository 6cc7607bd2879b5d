use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::course::CourseId;
use crate::model::state::CompletionState;

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// The student's recorded completion state per course.
///
/// This mapping is the single source of truth for progress and the persisted
/// payload shape. A course absent from the record is `NotTaken`; setting a
/// state stores it explicitly, including `NotTaken`. Ids that no longer match
/// any catalog course may remain in the record; readers iterate the catalog,
/// so such entries are inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    states: BTreeMap<CourseId, CompletionState>,
}

impl ProgressRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded state for a course, `NotTaken` when absent.
    #[must_use]
    pub fn get(&self, id: &CourseId) -> CompletionState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Records a state, also when it equals the default.
    pub fn set(&mut self, id: CourseId, state: CompletionState) {
        self.states.insert(id, state);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Recorded entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, CompletionState)> {
        self.states.iter().map(|(id, state)| (id, *state))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_course_reads_as_not_taken() {
        let record = ProgressRecord::new();
        assert_eq!(
            record.get(&CourseId::new("MAT101")),
            CompletionState::NotTaken
        );
        assert!(record.is_empty());
    }

    #[test]
    fn set_stores_the_default_state_explicitly() {
        let mut record = ProgressRecord::new();
        record.set(CourseId::new("MAT101"), CompletionState::NotTaken);

        assert_eq!(record.len(), 1);
        assert_eq!(
            record.get(&CourseId::new("MAT101")),
            CompletionState::NotTaken
        );
    }

    #[test]
    fn set_overwrites_a_previous_state() {
        let mut record = ProgressRecord::new();
        let id = CourseId::new("MAT101");

        record.set(id.clone(), CompletionState::InProgress);
        record.set(id.clone(), CompletionState::Approved);

        assert_eq!(record.get(&id), CompletionState::Approved);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn iter_yields_entries_in_key_order() {
        let mut record = ProgressRecord::new();
        record.set(CourseId::new("B"), CompletionState::Approved);
        record.set(CourseId::new("A"), CompletionState::InProgress);

        let ids: Vec<&str> = record.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
