//! Shared data model for the Lattice device database access layer.
//!
//! This crate defines the value types handed out by [`ltdb_db`]: device and
//! tile-type locators, per-device chip geometry, tile layout entries, and the
//! two family-specific global routing models. Values are plain data; they own
//! no files or caches and are cheap to clone.
//!
//! [`ltdb_db`]: https://docs.rs/ltdb_db

#![warn(missing_docs)]

pub mod chip;
pub mod error;
pub mod globals;
pub mod idcode;
pub mod locator;
pub mod tile;

pub use chip::ChipInfo;
pub use error::ParseError;
pub use globals::{
    Ecp5GlobalsInfo, GlobalRegion, GlobalsInfo, LeftRightConn, MachXo2GlobalsInfo, MissingDccs,
    SpineSegment, TapDriver, TapSegment, TapSide,
};
pub use idcode::{format_idcode, parse_idcode};
pub use locator::{DeviceLocator, TileLocator};
pub use tile::{SiteInfo, TileInfo};
