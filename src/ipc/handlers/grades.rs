use crate::db::SqliteGradeStore;
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_str, require_db, required_raw_str, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::service::Gradebook;
use serde_json::json;

fn grades_save(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let assignment_id = required_str(req, "assignmentId")?;
    let student_id = required_str(req, "studentId")?;
    let grade = required_raw_str(req, "grade")?;
    let comment = optional_str(req, "comment");

    let store = SqliteGradeStore::new(conn);
    let saved = Gradebook::new(&store, &state.options).save_grade(
        &course_id,
        &assignment_id,
        &student_id,
        &grade,
        comment.as_deref(),
    );
    Ok(json!({ "saved": saved }))
}

fn course_grades_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let store = SqliteGradeStore::new(conn);
    let grades = Gradebook::new(&store, &state.options).course_grades(&course_id);
    Ok(json!({ "courseGrades": grades }))
}

fn course_grades_override(
    state: &AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let student_id = required_str(req, "studentId")?;
    // Stored verbatim: a blank override is kept and simply never wins.
    let grade = required_raw_str(req, "grade")?;

    let store = SqliteGradeStore::new(conn);
    Gradebook::new(&store, &state.options).override_course_grade(
        &course_id,
        &student_id,
        &grade,
    )?;
    Ok(json!({ "ok": true }))
}

fn matrix_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let store = SqliteGradeStore::new(conn);
    let matrix = Gradebook::new(&store, &state.options).grade_matrix(&course_id)?;
    Ok(json!(matrix))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "grades.save" => grades_save(state, req),
        "courseGrades.get" => course_grades_get(state, req),
        "courseGrades.override" => course_grades_override(state, req),
        "matrix.get" => matrix_get(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
