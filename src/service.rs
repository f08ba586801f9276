use crate::config::GradebookOptions;
use crate::matrix::{build_matrix, build_matrix_parallel, MatrixRequest};
use crate::model::{Assignment, CategorySummary, CourseGradeMap, GradeCell, Student, StudentGradeRow};
use crate::resolve::resolve_course_grades;
use crate::store::{GradeStore, StoreError};
use crate::summary::{summarize_categories, SummaryRequest};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeMatrix {
    pub assignments: Vec<Assignment>,
    pub rows: Vec<StudentGradeRow>,
}

/// `student` is `None` only for a course that has no gradebook yet.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student: Option<Student>,
    pub course_grade: Option<String>,
    pub course_grade_released: bool,
    pub categories: Vec<CategorySummary>,
}

/// Request-scoped view of one store. Holds no state of its own.
pub struct Gradebook<'a, S: GradeStore + ?Sized> {
    store: &'a S,
    options: &'a GradebookOptions,
}

impl<'a, S: GradeStore + ?Sized> Gradebook<'a, S> {
    pub fn new(store: &'a S, options: &'a GradebookOptions) -> Self {
        Self { store, options }
    }

    /// Resolved course grades, or an empty map if either source is unavailable.
    pub fn course_grades(&self, course_id: &str) -> CourseGradeMap {
        let calculated = match self.store.fetch_calculated_course_grades(course_id) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(course_id, error = %e, "calculated course grades unavailable");
                return CourseGradeMap::new();
            }
        };
        let entered = match self.store.fetch_entered_course_grades(course_id) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(course_id, error = %e, "entered course grades unavailable");
                return CourseGradeMap::new();
            }
        };
        resolve_course_grades(&calculated, &entered)
    }

    /// Full roster x assignments grid. A course with no gradebook yields an
    /// empty matrix.
    pub fn grade_matrix(&self, course_id: &str) -> Result<GradeMatrix, StoreError> {
        let students = match self.store.fetch_roster(course_id) {
            Ok(v) => v,
            Err(e) if e.is_not_found() => {
                tracing::warn!(course_id, "no gradebook for course");
                return Ok(GradeMatrix::default());
            }
            Err(e) => return Err(e),
        };
        let assignments = self.store.fetch_assignments(course_id)?;
        let course_grades = self.course_grades(course_id);

        let mut cells: HashMap<(String, String), GradeCell> = HashMap::new();
        for cell in self.store.fetch_grade_cells(course_id)? {
            cells.insert(
                (cell.student_id.clone(), cell.assignment_id.clone()),
                cell,
            );
        }
        let lookup = |student_id: &str, assignment_id: &str| {
            cells
                .get(&(student_id.to_string(), assignment_id.to_string()))
                .cloned()
        };

        let req = MatrixRequest {
            students: &students,
            assignments: &assignments,
            course_grades: &course_grades,
        };
        let threshold = self.options.parallel_rows;
        let rows = if threshold > 0 && students.len() >= threshold {
            tracing::debug!(course_id, rows = students.len(), "building matrix in parallel");
            build_matrix_parallel(&req, lookup)
        } else {
            build_matrix(&req, lookup)
        };

        Ok(GradeMatrix { assignments, rows })
    }

    /// Category-grouped view of one student's grades. A course with no
    /// gradebook yields an empty summary; an unknown student in an existing
    /// course is `NotFound`.
    pub fn student_summary(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<StudentSummary, StoreError> {
        let (course, roster) = match self
            .store
            .fetch_course(course_id)
            .and_then(|c| Ok((c, self.store.fetch_roster(course_id)?)))
        {
            Ok(v) => v,
            Err(e) if e.is_not_found() => {
                tracing::warn!(course_id, student_id, "no gradebook for course");
                return Ok(StudentSummary::default());
            }
            Err(e) => return Err(e),
        };
        let student = roster
            .into_iter()
            .find(|s| s.id == student_id)
            .ok_or_else(|| StoreError::not_found("student", student_id))?;
        let assignments = self.store.fetch_assignments(course_id)?;
        let categories = self.store.fetch_categories(course_id)?;
        let course_grades = self.course_grades(course_id);

        let mut cells: HashMap<String, GradeCell> = HashMap::new();
        for a in &assignments {
            if let Some(cell) = self.store.fetch_grade_cell(course_id, &a.id, student_id)? {
                cells.insert(a.id.clone(), cell);
            }
        }

        let students = [student];
        let req = MatrixRequest {
            students: &students,
            assignments: &assignments,
            course_grades: &course_grades,
        };
        let rows = build_matrix(&req, |_, assignment_id| cells.get(assignment_id).cloned());
        let Some(row) = rows.into_iter().next() else {
            return Err(StoreError::not_found("student", student_id));
        };

        let averages = self
            .store
            .fetch_category_averages(course_id, student_id)
            .unwrap_or_else(|e| {
                tracing::warn!(course_id, error = %e, "category averages unavailable");
                HashMap::new()
            });

        let categories = summarize_categories(&SummaryRequest {
            row: &row,
            assignments: &assignments,
            categories: &categories,
            category_averages: &averages,
            no_due_date_label: &self.options.no_due_date_label,
        });

        Ok(StudentSummary {
            student: Some(row.student),
            course_grade: row.course_grade,
            course_grade_released: course.course_grade_displayed,
            categories,
        })
    }

    /// `false` on any store rejection; the failure is logged, not retried.
    pub fn save_grade(
        &self,
        course_id: &str,
        assignment_id: &str,
        student_id: &str,
        grade: &str,
        comment: Option<&str>,
    ) -> bool {
        match self
            .store
            .save_grade(course_id, assignment_id, student_id, grade, comment)
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(course_id, assignment_id, student_id, error = %e, "saving grade failed");
                false
            }
        }
    }

    pub fn override_course_grade(
        &self,
        course_id: &str,
        student_id: &str,
        grade: &str,
    ) -> Result<(), StoreError> {
        self.store
            .save_entered_course_grade(course_id, student_id, grade)
    }
}
