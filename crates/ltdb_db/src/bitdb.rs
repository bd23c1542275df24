//! Per-tile-type bit databases and their process-lifetime store.
//!
//! A bit database (`<root>/<family>/tiledata/<tiletype>/bits.db`) maps
//! configuration bit patterns to logical tile settings. Its bytes are
//! interpreted by downstream bitstream tooling; this layer only opens the file
//! once per tile type and shares the handle.

use crate::error::{DbError, DbResult};
use ltdb_common::TileLocator;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// An opened bit database for one tile type.
///
/// The handle is immutable once opened and is shared by every caller through
/// an [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBitDatabase {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl TileBitDatabase {
    /// Opens the bit database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::FileNotFound`] if the file does not exist, or
    /// [`DbError::Io`] if it cannot be read.
    pub fn open(path: &Path) -> DbResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| DbError::from_io(path, e))?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Wraps already-read database bytes.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// The file the database was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw database bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The database as text, or `None` if it is not valid UTF-8.
    pub fn contents(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Opens bit databases by path.
pub trait BitDatabaseLoader: Send + Sync {
    /// Opens the bit database at `path`.
    fn open(&self, path: &Path) -> DbResult<TileBitDatabase>;
}

/// Opens bit databases from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileBitDatabaseLoader;

impl BitDatabaseLoader for FileBitDatabaseLoader {
    fn open(&self, path: &Path) -> DbResult<TileBitDatabase> {
        TileBitDatabase::open(path)
    }
}

/// Process-lifetime store of opened bit databases, keyed by tile type.
///
/// Lookup and open happen under one lock, so each database is opened at most
/// once no matter how many threads request it concurrently. Handles are never
/// evicted or refreshed.
pub struct BitDatabaseStore {
    loader: Arc<dyn BitDatabaseLoader>,
    handles: Mutex<HashMap<TileLocator, Arc<TileBitDatabase>>>,
}

impl BitDatabaseStore {
    /// Creates an empty store that opens databases with `loader`.
    pub fn new(loader: Arc<dyn BitDatabaseLoader>) -> Self {
        Self {
            loader,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shared handle for `tile`, opening `path` on a miss.
    ///
    /// A failed open stores nothing. A loader that panics leaves the map
    /// untouched, so the lock is recovered rather than treated as poisoned.
    pub fn get_or_open(&self, tile: &TileLocator, path: &Path) -> DbResult<Arc<TileBitDatabase>> {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(db) = handles.get(tile) {
            tracing::trace!(tile = %tile, "bit database cache hit");
            return Ok(Arc::clone(db));
        }
        tracing::debug!(tile = %tile, path = %path.display(), "opening bit database");
        let db = Arc::new(self.loader.open(path)?);
        handles.insert(tile.clone(), Arc::clone(&db));
        Ok(db)
    }

    /// Number of opened databases.
    pub fn cached_len(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for BitDatabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitDatabaseStore")
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}
