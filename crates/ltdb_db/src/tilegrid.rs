//! Parsing and caching of per-device `tilegrid.json` files.
//!
//! The tilegrid maps tile names to their frame/bit window and the sites they
//! contain:
//!
//! ```text
//! {
//!   "R2C3:PLC2": {
//!     "cols": 48, "rows": 64, "start_bit": 128, "start_frame": 96,
//!     "type": "PLC2",
//!     "sites": [ { "name": "SLICE", "pos_col": 3, "pos_row": 2 } ]
//!   }
//! }
//! ```
//!
//! Parsed grids are kept for the life of the [`TilegridCache`]. [`TileInfo`]
//! values are derived from the cached grid on every request, stamped with the
//! caller's current [`ChipInfo`].

use crate::document::decode;
use crate::error::DbResult;
use indexmap::IndexMap;
use ltdb_common::{ChipInfo, DeviceLocator, SiteInfo, TileInfo};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Raw JSON structure for a tile entry deserialization.
#[derive(Debug, Clone, Deserialize)]
struct RawTile {
    cols: u32,
    rows: u32,
    start_bit: u32,
    start_frame: u32,
    #[serde(rename = "type")]
    tile_type: String,
    sites: Vec<RawSite>,
}

/// Raw JSON structure for a site entry deserialization.
#[derive(Debug, Clone, Deserialize)]
struct RawSite {
    name: String,
    pos_col: i32,
    pos_row: i32,
}

/// A parsed tilegrid document, in document order.
#[derive(Debug, Clone)]
pub struct ParsedTilegrid {
    tiles: IndexMap<String, RawTile>,
}

impl ParsedTilegrid {
    /// Parses a `tilegrid.json` document.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Schema`](crate::DbError::Schema) if any tile or site lacks a required field.
    pub fn from_document(doc: &Value, context: &str) -> DbResult<Self> {
        Ok(Self {
            tiles: decode(doc, context)?,
        })
    }

    /// Number of tiles in the grid.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Derives one [`TileInfo`] per tile, in document order.
    pub fn tiles(&self, chip: &ChipInfo) -> Vec<TileInfo> {
        self.tiles
            .iter()
            .map(|(name, raw)| TileInfo {
                family: chip.family.clone(),
                device: chip.name.clone(),
                max_row: chip.max_row,
                max_col: chip.max_col,
                col_bias: chip.col_bias,
                name: name.clone(),
                num_frames: raw.cols,
                bits_per_frame: raw.rows,
                bit_offset: raw.start_bit,
                frame_offset: raw.start_frame,
                tile_type: raw.tile_type.clone(),
                sites: raw
                    .sites
                    .iter()
                    .map(|s| SiteInfo {
                        site_type: s.name.clone(),
                        col: s.pos_col,
                        row: s.pos_row,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Process-lifetime cache of parsed tilegrids, keyed by device.
///
/// Lookup and insertion happen under one lock, so a grid is loaded at most
/// once per key even when several threads miss at the same time. Entries are
/// never evicted.
#[derive(Debug, Default)]
pub struct TilegridCache {
    grids: Mutex<HashMap<DeviceLocator, Arc<ParsedTilegrid>>>,
}

impl TilegridCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached grid for `locator`, calling `load` on a miss.
    ///
    /// `load` runs with the cache lock held. A failed load stores nothing, and
    /// a panicking one leaves the map untouched, so the lock is recovered
    /// rather than treated as poisoned.
    pub fn get_or_load<F>(&self, locator: &DeviceLocator, load: F) -> DbResult<Arc<ParsedTilegrid>>
    where
        F: FnOnce() -> DbResult<ParsedTilegrid>,
    {
        let mut grids = self.grids.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(grid) = grids.get(locator) {
            tracing::trace!(device = %locator, "tilegrid cache hit");
            return Ok(Arc::clone(grid));
        }
        let grid = Arc::new(load()?);
        grids.insert(locator.clone(), Arc::clone(&grid));
        Ok(grid)
    }

    /// Number of cached grids.
    pub fn cached_len(&self) -> usize {
        self.grids.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
