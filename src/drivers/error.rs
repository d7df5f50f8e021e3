use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("tensor length mismatch: engine expects {expected}, window provides {actual}")]
    TensorLengthMismatch { expected: usize, actual: usize },
    #[error("class count mismatch: expected {expected}, got {actual}")]
    ClassCountMismatch { expected: usize, actual: usize },
    #[error("{actions} indicator actions configured for only {classes} classes")]
    TooManyActions { actions: usize, classes: usize },
    #[error("sample source is not initialised")]
    SourceNotReady,
    #[error("sample source failed to initialise: {0}")]
    SourceInit(String),
}
