use crate::db::SqliteGradeStore;
use crate::ipc::error::ok;
use crate::ipc::helpers::{require_db, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::service::Gradebook;
use serde_json::json;

fn summary_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let student_id = required_str(req, "studentId")?;
    let store = SqliteGradeStore::new(conn);
    let summary = Gradebook::new(&store, &state.options).student_summary(&course_id, &student_id)?;
    Ok(json!(summary))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "summary.get" => Some(match summary_get(state, req) {
            Ok(v) => ok(&req.id, v),
            Err(e) => e.response(&req.id),
        }),
        _ => None,
    }
}
