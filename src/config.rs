use crate::format::DEFAULT_NO_DUE_DATE_LABEL;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PARALLEL_ROWS: usize = 256;

/// Gradebook sidecar: JSON requests on stdin, one response per line on stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "gradebookd")]
#[command(version)]
pub struct Config {
    /// Workspace directory to open at startup
    #[arg(long, env = "GRADEBOOKD_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Tracing filter directive (logs go to stderr)
    #[arg(long = "log", env = "GRADEBOOKD_LOG", default_value = "gradebookd=info")]
    pub log_filter: String,

    /// Roster size at which the full grade matrix is built in parallel (0 = never)
    #[arg(long, env = "GRADEBOOKD_PARALLEL_ROWS", default_value_t = DEFAULT_PARALLEL_ROWS)]
    pub parallel_rows: usize,

    /// Label shown for assignments without a due date
    #[arg(long, env = "GRADEBOOKD_NO_DUE_DATE_LABEL", default_value = DEFAULT_NO_DUE_DATE_LABEL)]
    pub no_due_date_label: String,
}

impl Config {
    pub fn gradebook_options(&self) -> GradebookOptions {
        GradebookOptions {
            parallel_rows: self.parallel_rows,
            no_due_date_label: self.no_due_date_label.clone(),
        }
    }
}

/// Knobs the request handlers pass down to [`crate::service::Gradebook`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradebookOptions {
    pub parallel_rows: usize,
    pub no_due_date_label: String,
}

impl Default for GradebookOptions {
    fn default() -> Self {
        Self {
            parallel_rows: DEFAULT_PARALLEL_ROWS,
            no_due_date_label: DEFAULT_NO_DUE_DATE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cfg = Config::try_parse_from(["gradebookd"]).expect("parse");
        assert_eq!(cfg.log_filter, "gradebookd=info");
        assert_eq!(cfg.gradebook_options(), GradebookOptions::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "gradebookd",
            "--workspace",
            "/tmp/gb",
            "--parallel-rows",
            "0",
            "--no-due-date-label",
            "n/a",
        ])
        .expect("parse");
        assert_eq!(cfg.workspace, Some(PathBuf::from("/tmp/gb")));
        let opts = cfg.gradebook_options();
        assert_eq!(opts.parallel_rows, 0);
        assert_eq!(opts.no_due_date_label, "n/a");
    }
}
