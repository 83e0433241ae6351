//! Insertion-ordered cache of object libraries.

use crate::error::Result;
use crate::library::ObjectLibrary;
use alscope_api::{ObjectType, SymbolInfo};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use url::Url;

/// All object libraries known to the session, keyed by backing file path.
///
/// The map is insertion-ordered by first access, and that order is part of
/// the public contract: cross-library lookups return the first match in
/// insertion order, and a reload never changes a library's position.
#[derive(Default)]
pub struct LibraryCache {
    libraries: Mutex<IndexMap<PathBuf, Arc<ObjectLibrary>>>,
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached library for `path`, creating and loading it if
    /// absent, or reloading in place when `force_reload` is set.
    ///
    /// The slot is inserted before the load, so concurrent callers for the
    /// same path converge on one logical load (the second waits on the
    /// library's load lock and finds a fresh index). A failed load is a
    /// soft error: the entry stays cached with whatever index it had, and
    /// scans skip libraries that never loaded.
    pub async fn get_library(&self, path: &Path, force_reload: bool) -> Result<Arc<ObjectLibrary>> {
        let library = {
            let mut libraries = self.lock_libraries();
            libraries
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(ObjectLibrary::new(path)))
                .clone()
        };
        library.load_from_file(force_reload).await?;
        Ok(library)
    }

    /// First matching URI in library-insertion order.
    pub fn find_object_uri(&self, object_type: ObjectType, object_id: u32) -> Option<Url> {
        self.snapshot()
            .into_iter()
            .find_map(|library| library.find_uri(object_type, object_id))
    }

    /// First matching symbol in library-insertion order.
    pub fn find_symbol_info(&self, object_type: ObjectType, object_id: u32) -> Option<SymbolInfo> {
        self.snapshot()
            .into_iter()
            .find_map(|library| library.find_symbol_info(object_type, object_id))
    }

    /// Listing of the objects in one package, loading it on first access.
    pub async fn object_listing(
        &self,
        path: &Path,
        force_reload: bool,
    ) -> Result<Vec<SymbolInfo>> {
        let library = self.get_library(path, force_reload).await?;
        Ok(library.object_listing())
    }

    /// Backing file paths in insertion order.
    pub fn cached_paths(&self) -> Vec<PathBuf> {
        self.lock_libraries().keys().cloned().collect()
    }

    /// Snapshot of the ordered library list. Taken up front so lookups
    /// never hold the map lock while scanning (and never wait on a load of
    /// an unrelated path).
    fn snapshot(&self) -> Vec<Arc<ObjectLibrary>> {
        self.lock_libraries().values().cloned().collect()
    }

    fn lock_libraries(
        &self,
    ) -> std::sync::MutexGuard<'_, IndexMap<PathBuf, Arc<ObjectLibrary>>> {
        self.libraries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
