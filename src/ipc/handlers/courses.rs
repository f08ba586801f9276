use crate::db::SqliteGradeStore;
use crate::ipc::error::ok;
use crate::ipc::helpers::{insert_err, optional_bool, require_db, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn courses_list(state: &AppState, _req: &Request) -> Result<serde_json::Value, HandlerErr> {
    // No workspace yet means no courses, not an error.
    let Some(conn) = state.db.as_ref() else {
        return Ok(json!({ "courses": [] }));
    };
    let courses = SqliteGradeStore::new(conn).list_courses()?;
    Ok(json!({ "courses": courses }))
}

fn courses_create(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let name = required_str(req, "name")?;
    let displayed = optional_bool(req, "courseGradeDisplayed", true)?;
    let course_id = SqliteGradeStore::new(conn)
        .create_course(&name, displayed)
        .map_err(|e| insert_err("courses", e))?;
    tracing::info!(course_id = %course_id, "course created");
    Ok(json!({ "courseId": course_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "courses.list" => courses_list(state, req),
        "courses.create" => courses_create(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
