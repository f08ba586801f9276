use crate::model::{Assignment, CourseGradeMap, GradeCell, RowCell, Student, StudentGradeRow};
use rayon::prelude::*;

/// Inputs for one matrix assembly. All slices are taken in caller order.
#[derive(Debug, Clone, Copy)]
pub struct MatrixRequest<'a> {
    pub students: &'a [Student],
    pub assignments: &'a [Assignment],
    pub course_grades: &'a CourseGradeMap,
}

fn build_row<F>(req: &MatrixRequest<'_>, student: &Student, lookup: &F) -> StudentGradeRow
where
    F: Fn(&str, &str) -> Option<GradeCell>,
{
    let grades = req
        .assignments
        .iter()
        .map(|a| RowCell {
            assignment_id: a.id.clone(),
            cell: lookup(&student.id, &a.id),
        })
        .collect();

    StudentGradeRow {
        student: student.clone(),
        grades,
        course_grade: req.course_grades.get(&student.id).cloned(),
    }
}

/// One row per student in roster order, one cell per assignment in column
/// order. `lookup(student_id, assignment_id)` returning `None` is ungraded
/// work, not an error.
pub fn build_matrix<F>(req: &MatrixRequest<'_>, lookup: F) -> Vec<StudentGradeRow>
where
    F: Fn(&str, &str) -> Option<GradeCell>,
{
    req.students
        .iter()
        .map(|s| build_row(req, s, &lookup))
        .collect()
}

/// Same result as [`build_matrix`], rows computed on the rayon pool.
/// Indexed collect keeps roster order.
pub fn build_matrix_parallel<F>(req: &MatrixRequest<'_>, lookup: F) -> Vec<StudentGradeRow>
where
    F: Fn(&str, &str) -> Option<GradeCell> + Sync,
{
    req.students
        .par_iter()
        .map(|s| build_row(req, s, &lookup))
        .collect()
}
