use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course id cannot be empty")]
    EmptyId,

    #[error("course name cannot be empty")]
    EmptyName,

    #[error("course level must be > 0")]
    InvalidLevel,

    #[error("course credits must be > 0")]
    InvalidCredits,

    #[error("syllabus link is not a valid URL")]
    InvalidSyllabusUrl,
}

//
// ─── COURSE ID ─────────────────────────────────────────────────────────────────
//

/// Unique identifier for a Course within a curriculum.
///
/// Serializes as the bare string; it is the key of the persisted state
/// mapping.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Creates a new `CourseId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// Unvalidated course definition as read from a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseDraft {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub credits: u32,
    #[serde(default)]
    pub syllabus: Option<String>,
}

impl CourseDraft {
    /// Validate the draft into a course entity.
    ///
    /// Trims id and name; an empty or whitespace-only syllabus link
    /// normalizes to `None`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the id or name is empty, the level or the
    /// credits are zero, or the syllabus link does not parse as a URL.
    pub fn validate(self) -> Result<Course, CourseError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(CourseError::EmptyId);
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(CourseError::EmptyName);
        }

        if self.level == 0 {
            return Err(CourseError::InvalidLevel);
        }
        if self.credits == 0 {
            return Err(CourseError::InvalidCredits);
        }

        let syllabus = self
            .syllabus
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(|link| Url::parse(link).map_err(|_| CourseError::InvalidSyllabusUrl))
            .transpose()?;

        Ok(Course {
            id: CourseId::new(id),
            name: name.to_owned(),
            level: self.level,
            credits: self.credits,
            syllabus,
        })
    }
}

/// A single course of the career plan.
///
/// Courses are immutable catalog entries; the student's progress lives in the
/// state record, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    level: u32,
    credits: u32,
    syllabus: Option<Url>,
}

impl Course {
    /// Creates a new Course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` under the same rules as `CourseDraft::validate`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        credits: u32,
        syllabus: Option<String>,
    ) -> Result<Self, CourseError> {
        CourseDraft {
            id: id.into(),
            name: name.into(),
            level,
            credits,
            syllabus,
        }
        .validate()
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn credits(&self) -> u32 {
        self.credits
    }

    #[must_use]
    pub fn syllabus(&self) -> Option<&Url> {
        self.syllabus.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_new_happy_path() {
        let course = Course::new(
            "MAT101",
            "Calculus I",
            1,
            6,
            Some("https://example.edu/mat101.pdf".into()),
        )
        .unwrap();

        assert_eq!(course.id().as_str(), "MAT101");
        assert_eq!(course.name(), "Calculus I");
        assert_eq!(course.level(), 1);
        assert_eq!(course.credits(), 6);
        assert_eq!(
            course.syllabus().map(Url::as_str),
            Some("https://example.edu/mat101.pdf")
        );
    }

    #[test]
    fn course_trims_id_and_name() {
        let course = Course::new("  FIS200  ", "  Physics II  ", 2, 4, None).unwrap();

        assert_eq!(course.id().as_str(), "FIS200");
        assert_eq!(course.name(), "Physics II");
    }

    #[test]
    fn course_rejects_empty_id() {
        let err = Course::new("   ", "Algebra", 1, 5, None).unwrap_err();
        assert_eq!(err, CourseError::EmptyId);
    }

    #[test]
    fn course_rejects_empty_name() {
        let err = Course::new("ALG1", "  ", 1, 5, None).unwrap_err();
        assert_eq!(err, CourseError::EmptyName);
    }

    #[test]
    fn course_rejects_zero_level() {
        let err = Course::new("ALG1", "Algebra", 0, 5, None).unwrap_err();
        assert_eq!(err, CourseError::InvalidLevel);
    }

    #[test]
    fn course_rejects_zero_credits() {
        let err = Course::new("ALG1", "Algebra", 1, 0, None).unwrap_err();
        assert_eq!(err, CourseError::InvalidCredits);
    }

    #[test]
    fn course_rejects_invalid_syllabus_url() {
        let err = Course::new("ALG1", "Algebra", 1, 5, Some("not a url".into())).unwrap_err();
        assert_eq!(err, CourseError::InvalidSyllabusUrl);
    }

    #[test]
    fn course_filters_blank_syllabus() {
        let course = Course::new("ALG1", "Algebra", 1, 5, Some("   ".into())).unwrap();
        assert_eq!(course.syllabus(), None);
    }

    #[test]
    fn course_id_display() {
        let id = CourseId::new("QUI301");
        assert_eq!(id.to_string(), "QUI301");
    }
}
