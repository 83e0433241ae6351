//! Symbol index for one compiled application package.

use crate::error::{LoadError, Result};
use crate::package::{self, SymbolReference};
use alscope_api::{ObjectType, SymbolInfo};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tokio::sync::Mutex;
use url::Url;

/// Modification state of the backing file as of the last successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    fn of(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug, Clone)]
struct IndexedObject {
    symbol: SymbolInfo,
    uri: Url,
}

/// Immutable result of one successful load. Lookups read the current
/// snapshot; a reload builds a new one and swaps it in whole, so readers
/// never observe a partially rebuilt index.
#[derive(Debug, Default)]
struct LibraryState {
    fingerprint: Option<Fingerprint>,
    index: HashMap<(ObjectType, u32), IndexedObject>,
}

/// The parsed symbol index extracted from one package file.
///
/// Identity is the backing file path, fixed at construction. State changes
/// only through [`ObjectLibrary::load_from_file`].
pub struct ObjectLibrary {
    source_file_path: PathBuf,
    state: RwLock<Arc<LibraryState>>,
    /// At most one load per library at a time; a caller arriving mid-load
    /// waits here and then reuses the fresh index via the fingerprint check.
    load_lock: Mutex<()>,
    loads: AtomicU64,
}

impl ObjectLibrary {
    pub fn new(source_file_path: impl Into<PathBuf>) -> Self {
        Self {
            source_file_path: source_file_path.into(),
            state: RwLock::new(Arc::new(LibraryState::default())),
            load_lock: Mutex::new(()),
            loads: AtomicU64::new(0),
        }
    }

    pub fn source_file_path(&self) -> &Path {
        &self.source_file_path
    }

    /// Number of loads that actually rebuilt the index. Observable so
    /// callers (and tests) can tell a cache hit from a reload.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// Rebuild the index from the backing package file.
    ///
    /// A no-op when `force_reload` is false, a prior load succeeded and the
    /// file's modification state is unchanged. On failure the previous
    /// index stays intact, so callers keep stale data instead of losing
    /// everything on a transient read error.
    pub async fn load_from_file(&self, force_reload: bool) -> Result<()> {
        let _guard = self.load_lock.lock().await;

        let fingerprint = Fingerprint::of(&self.source_file_path)?;
        if !force_reload && self.snapshot().fingerprint == Some(fingerprint) {
            tracing::debug!(
                path = %self.source_file_path.display(),
                "package unchanged, keeping index"
            );
            return Ok(());
        }

        let path = self.source_file_path.clone();
        let reference = tokio::task::spawn_blocking(move || package::read_symbol_reference(&path))
            .await
            .map_err(|e| LoadError::Internal(e.to_string()))??;

        let state = Arc::new(build_state(&reference, fingerprint)?);
        let indexed = state.index.len();
        *self.write_state() = state;
        self.loads.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            path = %self.source_file_path.display(),
            objects = indexed,
            "loaded package symbols"
        );
        Ok(())
    }

    /// Pure lookup against the current snapshot, no I/O.
    pub fn find_uri(&self, object_type: ObjectType, object_id: u32) -> Option<Url> {
        self.snapshot()
            .index
            .get(&(object_type, object_id))
            .map(|object| object.uri.clone())
    }

    /// Pure lookup against the current snapshot, no I/O.
    pub fn find_symbol_info(&self, object_type: ObjectType, object_id: u32) -> Option<SymbolInfo> {
        self.snapshot()
            .index
            .get(&(object_type, object_id))
            .map(|object| object.symbol.clone())
    }

    /// Flat listing of every indexed object, ordered by category then id.
    pub fn object_listing(&self) -> Vec<SymbolInfo> {
        let snapshot = self.snapshot();
        let mut listing: Vec<SymbolInfo> = snapshot
            .index
            .values()
            .map(|object| object.symbol.clone())
            .collect();
        listing.sort_by_key(|symbol| (symbol.object_type.as_str(), symbol.object_id));
        listing
    }

    fn snapshot(&self) -> Arc<LibraryState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Arc<LibraryState>> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn build_state(reference: &SymbolReference, fingerprint: Fingerprint) -> Result<LibraryState> {
    let mut index = HashMap::new();
    for (object_type, entry) in reference.objects() {
        let uri = preview_uri(&reference.name, object_type, entry.id)?;
        index.insert(
            (object_type, entry.id),
            IndexedObject {
                symbol: SymbolInfo {
                    symbol_name: entry.name.clone(),
                    object_type,
                    object_id: entry.id,
                },
                uri,
            },
        );
    }
    Ok(LibraryState {
        fingerprint: Some(fingerprint),
        index,
    })
}

/// Synthetic identity of an object's preview document. This core only
/// indexes it; rendering is the editor-side preview provider's job.
fn preview_uri(package_name: &str, object_type: ObjectType, object_id: u32) -> Result<Url> {
    let mut uri = Url::parse("al-preview:///")
        .map_err(|e| LoadError::Internal(format!("preview uri base: {e}")))?;
    uri.set_path(&format!(
        "/{}/{}/{}",
        package_name,
        object_type.as_str(),
        object_id
    ));
    Ok(uri)
}
