use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::store::StoreError;
use rusqlite::Connection;
use serde_json::json;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<StoreError> for HandlerErr {
    fn from(e: StoreError) -> Self {
        let details = match &e {
            StoreError::NotFound { entity, id } => Some(json!({ "entity": entity, "id": id })),
            StoreError::Db(_) => None,
        };
        Self {
            code: e.code(),
            message: e.to_string(),
            details,
        }
    }
}

pub fn require_db(state: &AppState) -> Result<&Connection, HandlerErr> {
    state.db.as_ref().ok_or_else(|| HandlerErr {
        code: "no_workspace",
        message: "select a workspace first".to_string(),
        details: None,
    })
}

pub fn required_str(req: &Request, key: &str) -> Result<String, HandlerErr> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(HandlerErr::bad_params(format!("missing {}", key))),
    }
}

/// Present-but-possibly-empty string, e.g. a grade that clears a cell.
pub fn required_raw_str(req: &Request, key: &str) -> Result<String, HandlerErr> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn optional_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

pub fn optional_bool(req: &Request, key: &str, default: bool) -> Result<bool, HandlerErr> {
    match req.params.get(key) {
        None => Ok(default),
        Some(v) if v.is_null() => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a boolean", key))),
    }
}

pub fn optional_f64(req: &Request, key: &str) -> Result<Option<f64>, HandlerErr> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a number", key))),
    }
}

/// Missing parents stay `not_found`; anything else is reported against `table`.
pub fn insert_err(table: &'static str, e: StoreError) -> HandlerErr {
    match e {
        StoreError::NotFound { .. } => HandlerErr::from(e),
        StoreError::Db(e) => HandlerErr {
            code: "db_insert_failed",
            message: e.to_string(),
            details: Some(json!({ "table": table })),
        },
    }
}
