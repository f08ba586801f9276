use crate::model::{Assignment, Category, CategoryId, Course, CourseGradeMap, GradeCell, Student};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// IPC error code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::Db(_) => "db_query_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveGradeError {
    #[error("no gradebook for course {0}")]
    GradebookNotFound(String),

    #[error("assignment not found: {0}")]
    AssignmentNotFound(String),

    #[error("student not found: {0}")]
    StudentNotFound(String),

    #[error("invalid grade {grade:?}: {reason}")]
    InvalidGrade { grade: String, reason: &'static str },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// Roster, gradebook definitions and raw grades for a course.
///
/// Each call is independently consistent; nothing ties two calls to the same
/// snapshot.
pub trait GradeStore {
    fn fetch_course(&self, course_id: &str) -> Result<Course, StoreError>;

    fn fetch_roster(&self, course_id: &str) -> Result<Vec<Student>, StoreError>;

    /// Column order as the gradebook defines it.
    fn fetch_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, StoreError>;

    fn fetch_categories(&self, course_id: &str) -> Result<Vec<Category>, StoreError>;

    fn fetch_grade_cell(
        &self,
        course_id: &str,
        assignment_id: &str,
        student_id: &str,
    ) -> Result<Option<GradeCell>, StoreError>;

    /// Every stored cell for the course, in no particular order.
    fn fetch_grade_cells(&self, course_id: &str) -> Result<Vec<GradeCell>, StoreError>;

    fn fetch_calculated_course_grades(&self, course_id: &str)
        -> Result<CourseGradeMap, StoreError>;

    fn fetch_entered_course_grades(&self, course_id: &str) -> Result<CourseGradeMap, StoreError>;

    /// categoryId -> average percent for one student.
    fn fetch_category_averages(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<HashMap<CategoryId, f64>, StoreError>;

    fn save_grade(
        &self,
        course_id: &str,
        assignment_id: &str,
        student_id: &str,
        grade: &str,
        comment: Option<&str>,
    ) -> Result<(), SaveGradeError>;

    fn save_entered_course_grade(
        &self,
        course_id: &str,
        student_id: &str,
        grade: &str,
    ) -> Result<(), StoreError>;
}
