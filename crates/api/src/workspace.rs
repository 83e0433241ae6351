use crate::error::NavResult;
use crate::models::{Position, TextRange};
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

/// Editor-mediated workspace edit surface.
///
/// Each primitive is one atomic edit and must be awaited to completion
/// before the next protocol step runs. There is deliberately no delete-file
/// primitive here: the navigation protocol truncates its scratch file and
/// must never delete it (see `alscope_proxy::protocol::RETAIN_SCRATCH_FILE`).
#[async_trait]
pub trait WorkspaceSurface: Send + Sync {
    /// Root of the open project, if any.
    fn root(&self) -> Option<PathBuf>;

    /// Create `document` with empty content, overwriting an existing file.
    async fn create_file(&self, document: &Url) -> NavResult<()>;

    /// Insert `text` at `position`.
    async fn insert(&self, document: &Url, position: Position, text: &str) -> NavResult<()>;

    /// Delete the text inside `range`.
    async fn delete_range(&self, document: &Url, range: TextRange) -> NavResult<()>;
}

/// Opens a document for display.
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    /// Open `document`, optionally revealing `range`.
    ///
    /// Must open in non-preview mode so the document is not silently
    /// replaced by the next preview the editor shows.
    async fn open(&self, document: &Url, range: Option<TextRange>) -> NavResult<()>;
}
