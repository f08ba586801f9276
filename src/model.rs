use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

pub type StudentId = String;
pub type AssignmentId = String;
pub type CategoryId = String;
pub type Grade = String;

/// studentId -> course grade (letter or score string).
pub type CourseGradeMap = HashMap<StudentId, Grade>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub course_grade_displayed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub name: String,
    /// `None` lands in the uncategorized bucket.
    pub category_name: Option<String>,
    pub points: f64,
    pub extra_credit: bool,
    pub counted: bool,
    pub released: bool,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Fraction in 0..=1, `None` when the category is unweighted.
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCell {
    pub student_id: StudentId,
    pub assignment_id: AssignmentId,
    pub grade: Option<String>,
    pub comment: Option<String>,
}

impl GradeCell {
    /// A grade that is present and not just whitespace.
    pub fn graded_value(&self) -> Option<&str> {
        self.grade.as_deref().filter(|g| !g.trim().is_empty())
    }
}

/// One column of a matrix row. `cell` is `None` for ungraded work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCell {
    pub assignment_id: AssignmentId,
    pub cell: Option<GradeCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGradeRow {
    pub student: Student,
    /// Same length and order as the assignment list the row was built from.
    pub grades: Vec<RowCell>,
    pub course_grade: Option<Grade>,
}

impl StudentGradeRow {
    pub fn cell(&self, assignment_id: &str) -> Option<&GradeCell> {
        self.grades
            .iter()
            .find(|c| c.assignment_id == assignment_id)
            .and_then(|c| c.cell.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

impl CategoryKey {
    pub fn for_assignment(a: &Assignment) -> Self {
        match &a.category_name {
            Some(name) => CategoryKey::Named(name.clone()),
            None => CategoryKey::Uncategorized,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CategoryKey::Named(name) => name,
            CategoryKey::Uncategorized => UNCATEGORIZED_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub assignment_id: AssignmentId,
    pub name: String,
    pub grade: Option<String>,
    pub comment: String,
    pub extra_credit: bool,
    pub not_counted: bool,
    pub not_released: bool,
    pub due_date: Option<NaiveDate>,
    pub due_date_label: String,
    /// Points possible, only set when the student has a grade.
    pub out_of: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub key: CategoryKey,
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub average_score: Option<f64>,
    pub average: Option<String>,
    pub weight: Option<String>,
    pub assignments: Vec<AssignmentSummary>,
}
