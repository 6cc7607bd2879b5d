use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::course::{Course, CourseDraft, CourseError, CourseId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate course id `{0}`")]
    DuplicateCourseId(CourseId),

    #[error("total career credits must be > 0")]
    InvalidTotalCredits,

    #[error(transparent)]
    Course(#[from] CourseError),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The fixed, ordered list of courses making up a career plan.
///
/// The catalog is immutable once built; it carries no progress state of its
/// own. An empty catalog is allowed and degrades all sums to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Creates a catalog from validated courses, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCourseId` if two courses share an id.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for course in &courses {
            if !seen.insert(course.id().clone()) {
                return Err(CatalogError::DuplicateCourseId(course.id().clone()));
            }
        }

        Ok(Self { courses })
    }

    /// Validates drafts in order and builds the catalog from the results.
    ///
    /// # Errors
    ///
    /// Returns the first draft's `CourseError`, or `DuplicateCourseId`.
    pub fn from_drafts(drafts: Vec<CourseDraft>) -> Result<Self, CatalogError> {
        let courses = drafts
            .into_iter()
            .map(CourseDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(courses)
    }

    // Accessors
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &CourseId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct academic levels, ascending.
    #[must_use]
    pub fn levels(&self) -> Vec<u32> {
        let levels: BTreeSet<u32> = self.courses.iter().map(Course::level).collect();
        levels.into_iter().collect()
    }

    /// Courses at one level, in catalog order.
    pub fn courses_at_level(&self, level: u32) -> impl Iterator<Item = &Course> {
        self.courses
            .iter()
            .filter(move |course| course.level() == level)
    }
}

//
// ─── CATALOG FILE ──────────────────────────────────────────────────────────────
//

/// Deserialized shape of the external curriculum definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub total_career_credits: u32,
    pub courses: Vec<CourseDraft>,
}

impl CatalogFile {
    /// Validate the file contents into a usable curriculum.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidTotalCredits` if the career total is
    /// zero, plus every error `Catalog::from_drafts` can produce.
    pub fn validate(self) -> Result<Curriculum, CatalogError> {
        if self.total_career_credits == 0 {
            return Err(CatalogError::InvalidTotalCredits);
        }

        let catalog = Catalog::from_drafts(self.courses)?;

        Ok(Curriculum {
            catalog,
            total_career_credits: self.total_career_credits,
        })
    }
}

/// A validated catalog together with the career credit total it counts toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    pub catalog: Catalog,
    pub total_career_credits: u32,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, level: u32, credits: u32) -> Course {
        Course::new(id, format!("Course {id}"), level, credits, None).unwrap()
    }

    #[test]
    fn catalog_preserves_course_order() {
        let catalog =
            Catalog::new(vec![course("B", 1, 3), course("A", 1, 4), course("C", 2, 5)]).unwrap();

        let ids: Vec<&str> = catalog
            .courses()
            .iter()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![course("A", 1, 3), course("A", 2, 4)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCourseId(CourseId::new("A")));
    }

    #[test]
    fn catalog_allows_empty() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.levels().is_empty());
    }

    #[test]
    fn catalog_get_and_contains() {
        let catalog = Catalog::new(vec![course("A", 1, 3)]).unwrap();

        assert!(catalog.contains(&CourseId::new("A")));
        assert!(!catalog.contains(&CourseId::new("Z")));
        assert_eq!(
            catalog.get(&CourseId::new("A")).map(Course::credits),
            Some(3)
        );
        assert_eq!(catalog.get(&CourseId::new("Z")), None);
    }

    #[test]
    fn levels_are_distinct_and_ascending() {
        let catalog = Catalog::new(vec![
            course("A", 3, 3),
            course("B", 1, 4),
            course("C", 3, 5),
            course("D", 2, 2),
        ])
        .unwrap();

        assert_eq!(catalog.levels(), vec![1, 2, 3]);
    }

    #[test]
    fn courses_at_level_keeps_catalog_order() {
        let catalog = Catalog::new(vec![
            course("A", 1, 3),
            course("B", 2, 4),
            course("C", 1, 5),
        ])
        .unwrap();

        let ids: Vec<&str> = catalog
            .courses_at_level(1)
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn from_drafts_propagates_course_errors() {
        let drafts = vec![CourseDraft {
            id: "A".into(),
            name: "  ".into(),
            level: 1,
            credits: 3,
            syllabus: None,
        }];

        let err = Catalog::from_drafts(drafts).unwrap_err();
        assert_eq!(err, CatalogError::Course(CourseError::EmptyName));
    }

    #[test]
    fn catalog_file_rejects_zero_total() {
        let file = CatalogFile {
            total_career_credits: 0,
            courses: Vec::new(),
        };

        let err = file.validate().unwrap_err();
        assert_eq!(err, CatalogError::InvalidTotalCredits);
    }

    #[test]
    fn catalog_file_validates_into_curriculum() {
        let file = CatalogFile {
            total_career_credits: 150,
            courses: vec![CourseDraft {
                id: "MAT101".into(),
                name: "Calculus I".into(),
                level: 1,
                credits: 6,
                syllabus: None,
            }],
        };

        let curriculum = file.validate().unwrap();
        assert_eq!(curriculum.total_career_credits, 150);
        assert_eq!(curriculum.catalog.len(), 1);
        assert!(curriculum.catalog.contains(&CourseId::new("MAT101")));
    }
}
