use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::QuizError;

/// Send diagnostics to `path`, if one is given.
///
/// The terminal belongs to the UI, so without a file nothing is installed
/// and events are dropped.
pub fn init(path: Option<&Path>) -> Result<(), QuizError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| QuizError::Logging {
        path: path.to_path_buf(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
