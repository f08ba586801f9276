use crate::db::{NewAssignment, SqliteGradeStore};
use crate::ipc::error::ok;
use crate::ipc::helpers::{
    insert_err, optional_bool, optional_f64, optional_str, require_db, required_str, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::store::GradeStore;
use chrono::NaiveDate;
use serde_json::json;

fn categories_list(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let categories = SqliteGradeStore::new(conn).fetch_categories(&course_id)?;
    Ok(json!({ "categories": categories }))
}

fn categories_create(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let name = required_str(req, "name")?;
    let weight = optional_f64(req, "weight")?;
    if let Some(w) = weight {
        if !(0.0..=1.0).contains(&w) {
            return Err(HandlerErr {
                code: "bad_params",
                message: "weight must be a fraction between 0 and 1".to_string(),
                details: Some(json!({ "weight": w })),
            });
        }
    }

    let category_id = SqliteGradeStore::new(conn)
        .create_category(&course_id, &name, weight)
        .map_err(|e| insert_err("categories", e))?;
    Ok(json!({ "categoryId": category_id }))
}

fn assignments_list(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let assignments = SqliteGradeStore::new(conn).fetch_assignments(&course_id)?;
    Ok(json!({ "assignments": assignments }))
}

fn parse_due_date(req: &Request) -> Result<Option<NaiveDate>, HandlerErr> {
    let Some(raw) = optional_str(req, "dueDate") else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| HandlerErr {
            code: "bad_params",
            message: "dueDate must be YYYY-MM-DD".to_string(),
            details: Some(json!({ "dueDate": raw })),
        })
}

fn assignments_create(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let conn = require_db(state)?;
    let course_id = required_str(req, "courseId")?;
    let name = required_str(req, "name")?;
    let Some(points) = optional_f64(req, "points")? else {
        return Err(HandlerErr::bad_params("missing points"));
    };
    if points < 0.0 {
        return Err(HandlerErr {
            code: "bad_params",
            message: "points must be >= 0".to_string(),
            details: Some(json!({ "points": points })),
        });
    }
    let category_name = optional_str(req, "categoryName");

    let new = NewAssignment {
        name: &name,
        category_name: category_name.as_deref(),
        points,
        extra_credit: optional_bool(req, "extraCredit", false)?,
        counted: optional_bool(req, "counted", true)?,
        released: optional_bool(req, "released", true)?,
        due_date: parse_due_date(req)?,
    };
    let assignment_id = SqliteGradeStore::new(conn)
        .create_assignment(&course_id, &new)
        .map_err(|e| insert_err("assignments", e))?;
    Ok(json!({ "assignmentId": assignment_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "categories.list" => categories_list(state, req),
        "categories.create" => categories_create(state, req),
        "assignments.list" => assignments_list(state, req),
        "assignments.create" => assignments_create(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
