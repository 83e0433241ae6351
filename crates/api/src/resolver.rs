use crate::error::NavResult;
use crate::models::{Position, SymbolLocation};
use async_trait::async_trait;
use url::Url;

/// External "resolve definition at position" capability.
///
/// Providers are unreliable by contract: a call may fail, hang, or return
/// stale results. Callers are expected to bound the call with a timeout and
/// fold failures into "zero candidates".
#[async_trait]
pub trait DefinitionResolver: Send + Sync {
    /// Return every definition candidate for the symbol at `position`
    /// inside `document`. An empty result means "unknown symbol" and is
    /// not an error.
    async fn resolve_definition(
        &self,
        document: &Url,
        position: Position,
    ) -> NavResult<Vec<SymbolLocation>>;
}
