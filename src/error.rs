use std::{io, path::PathBuf};

use thiserror::Error;

/// No free cell is left to put a new entity on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on a {0}x{0} grid")]
    GridFull(i16),
}

/// High-score store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not resolve a data directory for the high score")]
    NoDataDir,
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score encoding: {0}")]
    Json(#[from] serde_json::Error),
}
