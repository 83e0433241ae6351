//! The synthesized-source navigation protocol.
//!
//! Steps run strictly in order: Prepare, Synthesize, Inject, Resolve,
//! Retract, Navigate. Once Inject succeeded, Retract is unconditional:
//! resolver failures, timeouts and cancellation all fold into a
//! zero-candidate result so the scratch file is always emptied again.

use crate::synth;
use alscope_api::{
    DefinitionResolver, DocumentOpener, NavError, NavResult, NavigationConfig, Notifier,
    ObjectType, Position, SymbolLocation, WorkspaceSurface,
};
use alscope_core::LibraryCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Directory under the workspace root holding the scratch file.
pub const SCRATCH_DIR: &str = ".allangtemp";
/// Fixed scratch file name; repeated runs reuse the same file.
pub const SCRATCH_FILE: &str = "tempal.al";

/// The scratch file is emptied but never deleted after a protocol run.
///
/// Deleting and immediately recreating the same path across repeated
/// invocations has crashed the external AL resolver process; truncation is
/// the supported mitigation. Keep this `true` unless that dependency is
/// replaced entirely.
pub const RETAIN_SCRATCH_FILE: bool = true;

const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(30);

/// One "go to definition" action, fully consumed by a single protocol run.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub object_type: ObjectType,
    pub target: NavigationTarget,
    /// Snapshot of [`NavigationConfig::enable_resolver_proxy`] at request
    /// construction time.
    pub proxy_enabled: bool,
}

#[derive(Debug, Clone)]
pub enum NavigationTarget {
    Id(u32),
    Name(String),
}

impl NavigationRequest {
    pub fn by_id(object_type: ObjectType, object_id: u32, config: &NavigationConfig) -> Self {
        Self {
            object_type,
            target: NavigationTarget::Id(object_id),
            proxy_enabled: config.enable_resolver_proxy,
        }
    }

    pub fn by_name(
        object_type: ObjectType,
        object_name: impl Into<String>,
        config: &NavigationConfig,
    ) -> Self {
        Self {
            object_type,
            target: NavigationTarget::Name(object_name.into()),
            proxy_enabled: config.enable_resolver_proxy,
        }
    }
}

/// What a completed (non-erroring) navigation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The resolver produced a definition and the document was opened.
    Opened(SymbolLocation),
    /// The previously indexed URI was opened directly (proxy disabled).
    OpenedIndexed(Url),
    /// The resolver had no candidate for the synthesized reference.
    NoDefinition,
    /// No cached library knows the requested (type, id); nothing was
    /// touched in the workspace.
    UnknownObject,
    /// Proxy disabled and no URI is indexed for the object.
    NotIndexed,
}

/// Drives definition navigation for objects the cache only knows by id.
pub struct NavigationProxy {
    cache: Arc<LibraryCache>,
    workspace: Arc<dyn WorkspaceSurface>,
    resolver: Arc<dyn DefinitionResolver>,
    opener: Arc<dyn DocumentOpener>,
    notifier: Arc<dyn Notifier>,
    /// Serializes Inject through Retract: concurrent requests share one
    /// scratch file, and one request's text must not be retracted by
    /// another's cleanup.
    scratch_lock: Mutex<()>,
    resolver_timeout: Duration,
}

impl NavigationProxy {
    pub fn new(
        cache: Arc<LibraryCache>,
        workspace: Arc<dyn WorkspaceSurface>,
        resolver: Arc<dyn DefinitionResolver>,
        opener: Arc<dyn DocumentOpener>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cache,
            workspace,
            resolver,
            opener,
            notifier,
            scratch_lock: Mutex::new(()),
            resolver_timeout: DEFAULT_RESOLVER_TIMEOUT,
        }
    }

    /// Bound the external resolver call; elapsed time counts as a
    /// zero-candidate result, not a hard error.
    pub fn with_resolver_timeout(mut self, timeout: Duration) -> Self {
        self.resolver_timeout = timeout;
        self
    }

    /// Execute one navigation request. Protocol errors are also surfaced
    /// through the notifier as non-blocking messages.
    pub async fn go_to_definition(
        &self,
        request: NavigationRequest,
        cancel: &CancellationToken,
    ) -> NavResult<NavigationOutcome> {
        let result = self.dispatch(request, cancel).await;
        if let Err(err) = &result {
            self.notifier.error(&err.to_string()).await;
        }
        result
    }

    async fn dispatch(
        &self,
        request: NavigationRequest,
        cancel: &CancellationToken,
    ) -> NavResult<NavigationOutcome> {
        if !request.proxy_enabled {
            return self.open_indexed(&request).await;
        }

        let object_name = match &request.target {
            NavigationTarget::Name(name) => name.clone(),
            NavigationTarget::Id(id) => {
                match self.cache.find_symbol_info(request.object_type, *id) {
                    Some(symbol) => symbol.symbol_name,
                    None => {
                        tracing::debug!(
                            object_type = %request.object_type,
                            object_id = id,
                            "object not present in any cached library"
                        );
                        return Ok(NavigationOutcome::UnknownObject);
                    }
                }
            }
        };

        self.resolve_by_reference(request.object_type, &object_name, cancel)
            .await
    }

    /// Proxy-disabled path: open the indexed preview URI without invoking
    /// the resolver. The URI index is keyed by id, so a bare name cannot
    /// be looked up here.
    async fn open_indexed(&self, request: &NavigationRequest) -> NavResult<NavigationOutcome> {
        let uri = match request.target {
            NavigationTarget::Id(id) => self.cache.find_object_uri(request.object_type, id),
            NavigationTarget::Name(_) => None,
        };

        let Some(uri) = uri else {
            tracing::debug!(
                object_type = %request.object_type,
                "no indexed uri for object, nothing to open"
            );
            return Ok(NavigationOutcome::NotIndexed);
        };

        self.notifier.progress(66, "Opening object definition").await;
        self.opener.open(&uri, None).await?;
        Ok(NavigationOutcome::OpenedIndexed(uri))
    }

    /// Steps Prepare through Navigate for a named object.
    async fn resolve_by_reference(
        &self,
        object_type: ObjectType,
        object_name: &str,
        cancel: &CancellationToken,
    ) -> NavResult<NavigationOutcome> {
        // Prepare
        let root = self.workspace.root().ok_or(NavError::NoWorkspace)?;
        let scratch_dir = root.join(SCRATCH_DIR);
        tokio::fs::create_dir_all(&scratch_dir).await.map_err(|e| {
            NavError::WorkspaceEdit(format!("cannot create {}: {e}", scratch_dir.display()))
        })?;
        let scratch_path = scratch_dir.join(SCRATCH_FILE);
        let scratch_uri = Url::from_file_path(&scratch_path).map_err(|_| {
            NavError::WorkspaceEdit(format!(
                "scratch path {} is not absolute",
                scratch_path.display()
            ))
        })?;

        self.notifier.progress(0, "Preparing object reference").await;

        // Synthesize
        let source = synth::object_reference(object_type, object_name);

        let candidates = {
            let _guard = self.scratch_lock.lock().await;

            // Inject; a failure here aborts with nothing to roll back.
            self.workspace.create_file(&scratch_uri).await?;
            self.workspace
                .insert(&scratch_uri, Position::new(0, 0), &source.text)
                .await?;

            self.notifier
                .progress(33, "Resolving object definition")
                .await;

            // Resolve
            let candidates = self
                .resolve_candidates(&scratch_uri, source.probe, cancel)
                .await;

            // Retract, unconditionally: the scratch file goes back to
            // empty but stays on disk (RETAIN_SCRATCH_FILE).
            self.workspace.delete_range(&scratch_uri, source.span).await?;

            candidates
        };

        // Navigate
        let Some(location) = candidates.into_iter().next() else {
            tracing::debug!(%object_type, object_name, "resolver returned no definition");
            return Ok(NavigationOutcome::NoDefinition);
        };

        self.notifier.progress(66, "Opening object definition").await;
        self.opener.open(&location.uri, Some(location.range)).await?;
        Ok(NavigationOutcome::Opened(location))
    }

    /// Resolver call bounded by timeout and cancellation. Every failure
    /// mode folds into "zero candidates" so the caller's retract step runs
    /// no matter what the resolver did.
    async fn resolve_candidates(
        &self,
        document: &Url,
        probe: Position,
        cancel: &CancellationToken,
    ) -> Vec<SymbolLocation> {
        let request = self.resolver.resolve_definition(document, probe);
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("navigation cancelled while resolving definition");
                Vec::new()
            }
            resolved = tokio::time::timeout(self.resolver_timeout, request) => match resolved {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "definition resolver failed");
                    Vec::new()
                }
                Err(_) => {
                    tracing::warn!(timeout = ?self.resolver_timeout, "definition resolver timed out");
                    Vec::new()
                }
            },
        }
    }
}
