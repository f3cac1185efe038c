use std::io;
use std::path::PathBuf;

use multiselect::MultiSelectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("could not read fixture {}: {source}", .path.display())]
    FixtureRead { path: PathBuf, source: io::Error },

    #[error("invalid fixture: {0}")]
    FixtureParse(#[from] serde_json::Error),

    #[error(transparent)]
    Component(#[from] MultiSelectError),
}
