use thiserror::Error;

/// A package load that did not produce a fresh index.
///
/// Soft by contract: the library keeps whatever index it had before the
/// failed load, and cache scans simply skip libraries that never loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading package: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid application package: {0}")]
    Package(String),
    #[error("symbol manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<zip::result::ZipError> for LoadError {
    fn from(err: zip::result::ZipError) -> Self {
        LoadError::Package(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
