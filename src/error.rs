use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the quiz from running.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to open log file {}: {source}", path.display())]
    Logging { path: PathBuf, source: io::Error },
}
