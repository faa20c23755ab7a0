use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("error parsing {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("could not find \"{0}\"; add the marker where generated docs should start")]
    MissingStartMarker(String),

    #[error("could not find \"{0}\"; add the end marker after the start marker")]
    MissingEndMarker(String),

    #[error("end marker \"{end}\" must come after start marker \"{start}\"")]
    MarkerOrder { start: String, end: String },

    #[error("formatter failed: {0}")]
    ExternalTool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, DocsError>;
