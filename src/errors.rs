//! Error types shared by the collector, the outline store and the overview builder
//!
//! Every per-repository failure is one of the first four variants. The overview
//! builder turns those into warnings so that one broken repository never stops
//! the rest of a pass.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    /// The path is not inside any git work tree.
    #[error("not a git repository: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    /// `git` could not be spawned or exited with a non-zero status.
    #[error("`{command}` failed{}: {stderr}", code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    ExternalTool {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A line of `git branch -vv` output did not have the expected shape.
    #[error("unexpected output on line {line_number}: {line:?}")]
    UnexpectedOutput { line_number: usize, line: String },

    /// An ahead/behind count was present but not a valid non-negative integer.
    #[error("malformed {field} count {text:?} in line {line:?}")]
    MalformedNumber {
        field: &'static str,
        text: String,
        line: String,
    },

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("failed to parse outline at line {line_number}: {message}")]
    OutlineParse { line_number: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OverviewResult<T> = Result<T, OverviewError>;
