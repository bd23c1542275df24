//! Read-only access to a Lattice FPGA device database.
//!
//! A [`Database`] is opened from a root directory containing `devices.json`.
//! It resolves devices by name or ID code, extracts chip geometry, decodes the
//! family-specific `globals.json`, and serves tilegrids and per-tile-type bit
//! databases through process-lifetime caches.
//!
//! # Database layout
//!
//! ```text
//! <root>/
//! ├── devices.json
//! └── ECP5/
//!     ├── LFE5U-25F/
//!     │   ├── globals.json
//!     │   └── tilegrid.json
//!     └── tiledata/
//!         └── PLC2/
//!             └── bits.db
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use ltdb_db::Database;
//!
//! # fn main() -> Result<(), ltdb_db::DbError> {
//! let db = Database::load("/path/to/database")?;
//! let device = db.find_device_by_idcode(0x4111_1043)?;
//! for tile in db.device_tilegrid(&device)? {
//!     let bits = db.tile_bitdata(&tile.locator())?;
//!     println!("{} -> {}", tile.name, bits.path().display());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod bitdb;
pub mod catalog;
pub mod database;
pub mod document;
pub mod error;
pub mod globals;
pub mod tilegrid;

pub use bitdb::{BitDatabaseLoader, BitDatabaseStore, FileBitDatabaseLoader, TileBitDatabase};
pub use catalog::DeviceCatalog;
pub use database::Database;
pub use document::{parse_document, DocumentSource, JsonFileSource};
pub use error::{DbError, DbResult, ErrorKind};
pub use globals::GlobalsStyle;
pub use tilegrid::{ParsedTilegrid, TilegridCache};

pub use ltdb_common::{
    ChipInfo, DeviceLocator, Ecp5GlobalsInfo, GlobalsInfo, MachXo2GlobalsInfo, SiteInfo, TileInfo,
    TileLocator,
};
