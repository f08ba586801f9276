use crate::db::SqliteGradeStore;
use crate::ipc::error::ok;
use crate::ipc::helpers::{insert_err, optional_str, require_db, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::GradeStore;
use serde_json::json;

fn students_list(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let students = SqliteGradeStore::new(conn).fetch_roster(&course_id)?;
    Ok(json!({ "students": students }))
}

fn students_create(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let display_name = required_str(req, "displayName")?;
    let student_id = optional_str(req, "studentId");

    let student_id = SqliteGradeStore::new(conn)
        .create_student(&course_id, student_id.as_deref(), &display_name)
        .map_err(|e| insert_err("students", e))?;
    Ok(json!({ "studentId": student_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => students_list(state, req),
        "students.create" => students_create(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
