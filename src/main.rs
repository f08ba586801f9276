mod calc;
mod config;
mod db;
mod format;
mod ipc;
mod matrix;
mod model;
mod resolve;
mod service;
mod store;
mod summary;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let cfg = config::Config::parse();

    // stdout carries the protocol; logs must stay on stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::new(&cfg.log_filter))
        .init();

    let mut state = ipc::AppState::new(cfg.gradebook_options());
    if let Some(path) = cfg.workspace.as_deref() {
        if let Err(e) = ipc::select_workspace(&mut state, path) {
            tracing::error!(workspace = %path.display(), error = ?e, "failed to open startup workspace");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                ipc::err("", "bad_json", e.to_string(), None)
            }
        };
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    tracing::debug!("stdin drained, exiting");
}
