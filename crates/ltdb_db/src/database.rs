//! The database service object.
//!
//! [`Database`] owns everything that lives for the life of the process: the
//! parsed root document, the tilegrid cache and the bit database store. It is
//! `Send + Sync`; share it between threads with `&Database` or `Arc<Database>`.

use crate::bitdb::{BitDatabaseLoader, BitDatabaseStore, FileBitDatabaseLoader, TileBitDatabase};
use crate::catalog::DeviceCatalog;
use crate::document::{DocumentSource, JsonFileSource};
use crate::error::{DbError, DbResult};
use crate::globals::{decode_ecp5_globals, decode_machxo2_globals, GlobalsStyle};
use crate::tilegrid::{ParsedTilegrid, TilegridCache};
use ltdb_common::{
    ChipInfo, DeviceLocator, Ecp5GlobalsInfo, GlobalsInfo, MachXo2GlobalsInfo, TileInfo,
    TileLocator,
};
use ltdb_config::{resolve_database_root, LtdbConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the root document inside the database directory.
pub const DEVICES_FILE: &str = "devices.json";

/// An opened device database.
pub struct Database {
    root: PathBuf,
    catalog: DeviceCatalog,
    source: Arc<dyn DocumentSource>,
    tilegrids: TilegridCache,
    bitdbs: BitDatabaseStore,
}

impl Database {
    /// Opens the database rooted at `root`, reading `devices.json`.
    ///
    /// # Errors
    ///
    /// Fails if `devices.json` is missing, unreadable or malformed; no
    /// database is created in that case.
    pub fn load(root: impl AsRef<Path>) -> DbResult<Self> {
        Self::load_with(
            root,
            Arc::new(JsonFileSource),
            Arc::new(FileBitDatabaseLoader),
        )
    }

    /// Opens the database with custom document and bit database loaders.
    pub fn load_with(
        root: impl AsRef<Path>,
        source: Arc<dyn DocumentSource>,
        loader: Arc<dyn BitDatabaseLoader>,
    ) -> DbResult<Self> {
        let root = root.as_ref().to_path_buf();
        let devices_path = root.join(DEVICES_FILE);
        let catalog = DeviceCatalog::from_document(source.load(&devices_path)?)?;
        let device_count = catalog.devices()?.len();

        tracing::info!(
            root = %root.display(),
            families = catalog.families().len(),
            devices = device_count,
            "loaded device database"
        );

        Ok(Self {
            root,
            catalog,
            source,
            tilegrids: TilegridCache::new(),
            bitdbs: BitDatabaseStore::new(loader),
        })
    }

    /// Opens the database named by a configuration.
    ///
    /// The `LTDB_DATABASE` environment variable takes precedence over the
    /// configured root.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::FileNotFound`] if neither location exists, or any
    /// error from [`Database::load`].
    pub fn from_config(config: &LtdbConfig) -> DbResult<Self> {
        let root = resolve_database_root(Some(config.database.root.as_str())).ok_or_else(|| {
            DbError::FileNotFound {
                path: config.database.root_path(),
            }
        })?;
        Self::load(root)
    }

    /// The database root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The parsed root devices document.
    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// Finds the first device named `name`. See [`DeviceCatalog::find_device_by_name`].
    pub fn find_device_by_name(&self, name: &str) -> DbResult<DeviceLocator> {
        self.catalog.find_device_by_name(name)
    }

    /// Finds the device with ID code `idcode`. See [`DeviceCatalog::find_device_by_idcode`].
    pub fn find_device_by_idcode(&self, idcode: u32) -> DbResult<DeviceLocator> {
        self.catalog.find_device_by_idcode(idcode)
    }

    /// Extracts the chip geometry of `locator`.
    pub fn chip_info(&self, locator: &DeviceLocator) -> DbResult<ChipInfo> {
        self.catalog.chip_info(locator)
    }

    /// Lists every device, in document order.
    pub fn devices(&self) -> DbResult<Vec<DeviceLocator>> {
        self.catalog.devices()
    }

    fn device_dir(&self, locator: &DeviceLocator) -> PathBuf {
        self.root.join(&locator.family).join(&locator.device)
    }

    fn load_globals(&self, locator: &DeviceLocator) -> DbResult<(Value, String)> {
        let path = self.device_dir(locator).join("globals.json");
        let doc = self.source.load(&path)?;
        Ok((doc, path.display().to_string()))
    }

    /// Decodes the ECP5-style `globals.json` of `locator`.
    ///
    /// The file is read on every call.
    pub fn ecp5_globals(&self, locator: &DeviceLocator) -> DbResult<Ecp5GlobalsInfo> {
        let (doc, context) = self.load_globals(locator)?;
        decode_ecp5_globals(&doc, &context)
    }

    /// Decodes the MachXO2-style `globals.json` of `locator`.
    ///
    /// The file is read on every call.
    pub fn machxo2_globals(&self, locator: &DeviceLocator) -> DbResult<MachXo2GlobalsInfo> {
        let (doc, context) = self.load_globals(locator)?;
        decode_machxo2_globals(&doc, &context)
    }

    /// Decodes `globals.json` with the schema of the locator's family.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::UnsupportedFamily`] for a family with no known
    /// globals schema, otherwise the errors of the selected decoder.
    pub fn globals(&self, locator: &DeviceLocator) -> DbResult<GlobalsInfo> {
        let style =
            GlobalsStyle::for_family(&locator.family).ok_or_else(|| DbError::UnsupportedFamily {
                family: locator.family.clone(),
            })?;
        let (doc, context) = self.load_globals(locator)?;
        style.decode(&doc, &context)
    }

    /// Returns the tiles of `locator`, in tilegrid document order.
    ///
    /// The tilegrid file is read and parsed on the first request for a device
    /// and reused afterwards. Chip parameters are re-read from `devices.json`
    /// on every call and stamped onto each tile.
    pub fn device_tilegrid(&self, locator: &DeviceLocator) -> DbResult<Vec<TileInfo>> {
        let chip = self.chip_info(locator)?;
        let grid = self.tilegrids.get_or_load(locator, || {
            let path = self.device_dir(locator).join("tilegrid.json");
            tracing::debug!(device = %locator, path = %path.display(), "loading tilegrid");
            let doc = self.source.load(&path)?;
            ParsedTilegrid::from_document(&doc, &path.display().to_string())
        })?;
        Ok(grid.tiles(&chip))
    }

    /// Returns the shared bit database of a tile type, opening it on first use.
    pub fn tile_bitdata(&self, tile: &TileLocator) -> DbResult<Arc<TileBitDatabase>> {
        let path = self.bits_db_path(tile);
        self.bitdbs.get_or_open(tile, &path)
    }

    /// Path of the bit database for `tile`.
    pub fn bits_db_path(&self, tile: &TileLocator) -> PathBuf {
        self.root
            .join(&tile.family)
            .join("tiledata")
            .join(&tile.tiletype)
            .join("bits.db")
    }

    /// Number of tilegrids currently cached.
    pub fn cached_tilegrids(&self) -> usize {
        self.tilegrids.cached_len()
    }

    /// Number of bit databases currently open.
    pub fn cached_bitdbs(&self) -> usize {
        self.bitdbs.cached_len()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("root", &self.root)
            .field("tilegrids", &self.tilegrids)
            .field("bitdbs", &self.bitdbs)
            .finish_non_exhaustive()
    }
}
