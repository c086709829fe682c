use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading snapshots or resolving configuration.
///
/// All of these are fatal at startup; the loader never keeps a partial dataset.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file {file:?} does not end in a day-month-year date: {reason}")]
    FilenameDate { file: String, reason: String },

    #[error("{} is not a valid snapshot: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{first:?} and {second:?} both hold the snapshot for {date}")]
    DuplicateDate {
        date: chrono::NaiveDate,
        first: String,
        second: String,
    },

    #[error("no snapshots loaded, pass both --from and --to to pick a range")]
    NoSnapshots,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to render json: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
