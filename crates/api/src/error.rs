use thiserror::Error;

/// Failures of a single navigation request.
///
/// Resolver timeouts and errors are deliberately absent: the protocol folds
/// them into a zero-candidate result so cleanup stays unconditional.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("no workspace folder is open")]
    NoWorkspace,
    #[error("workspace edit failed: {0}")]
    WorkspaceEdit(String),
    #[error("failed to open document: {0}")]
    OpenDocument(String),
    #[error("definition resolver error: {0}")]
    Resolver(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type NavResult<T> = std::result::Result<T, NavError>;
