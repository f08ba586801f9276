use crate::config::GradebookOptions;
use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub options: GradebookOptions,
}

impl AppState {
    pub fn new(options: GradebookOptions) -> Self {
        Self {
            workspace: None,
            db: None,
            options,
        }
    }
}
