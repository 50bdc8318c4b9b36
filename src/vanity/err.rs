use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading config file {}: {}", path.display(), source)]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid record on line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("error decoding config: {0}")]
    Decode(#[from] csv::Error),
    #[error("import path {0:?} is listed more than once")]
    DuplicateImportPath(String),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound { path, source },
            _ => ConfigError::Unreadable { path, source },
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{field} {value:?} of {import_path:?} cannot appear in go-import metadata")]
    InvalidField {
        import_path: String,
        field: &'static str,
        value: String,
    },
}
