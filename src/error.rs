use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a game configuration cannot be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("{dimension} {value} is not a positive multiple of cell size {cell_size}")]
    MisalignedDimension {
        dimension: &'static str,
        value: u16,
        cell_size: u16,
    },
    #[error("initial length {length} does not fit on a grid with {rows} rows")]
    InitialLengthOutOfRange { length: u16, rows: u16 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Top-level failure of the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
