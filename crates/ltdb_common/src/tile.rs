//! Tile layout entries derived from a device tilegrid.

use crate::error::ParseError;
use crate::locator::TileLocator;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_ROW_COL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"R(\d+)C(\d+)").unwrap());
static RE_TOP_BOTTOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_]*?([TB])(\d+)$").unwrap());
static RE_LEFT_RIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_]*?([LR])(\d+)$").unwrap());

/// A site (placement location) inside a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// The site type, taken from the site's `name` field (e.g., "SLICE").
    pub site_type: String,
    /// Column of the site in the device grid.
    pub col: i32,
    /// Row of the site in the device grid.
    pub row: i32,
}

/// One tile from a device tilegrid.
///
/// The chip-wide `max_row`, `max_col` and `col_bias` are stamped onto every
/// tile so that a tile can resolve its own grid position without the
/// surrounding [`ChipInfo`](crate::ChipInfo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    /// The family name.
    pub family: String,
    /// The device name.
    pub device: String,
    /// Highest tile row index of the device.
    pub max_row: i32,
    /// Highest tile column index of the device.
    pub max_col: i32,
    /// Column bias of the device.
    pub col_bias: i32,
    /// The tile name (e.g., "R2C3:PLC2").
    pub name: String,
    /// Number of frames the tile spans.
    pub num_frames: u32,
    /// Number of bits the tile occupies in each frame.
    pub bits_per_frame: u32,
    /// First bit of the tile within each frame.
    pub bit_offset: u32,
    /// First frame of the tile.
    pub frame_offset: u32,
    /// The tile type (e.g., "PLC2").
    pub tile_type: String,
    /// Sites contained in the tile, in document order.
    pub sites: Vec<SiteInfo>,
}

impl TileInfo {
    /// Returns the key of this tile's bit database.
    pub fn locator(&self) -> TileLocator {
        TileLocator::new(self.family.clone(), self.tile_type.clone())
    }

    /// Resolves the tile's `(row, col)` position from its name.
    ///
    /// Recognized forms, with any `:<type>` suffix ignored:
    ///
    /// - `R<r>C<c>` anywhere in the name: `(r, c - col_bias)`
    /// - `<prefix>T<c>` / `<prefix>B<c>`: top row `0` or bottom row `max_row`
    /// - `<prefix>L<r>` / `<prefix>R<r>`: left column `0` or right column `max_col`
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidTileName`] if no form matches or a number
    /// (before or after removing the column bias) does not fit in an `i32`.
    pub fn row_col(&self) -> Result<(i32, i32), ParseError> {
        let base = self.name.split(':').next().unwrap_or(&self.name);

        if let Some(caps) = RE_ROW_COL.captures(base) {
            let row = self.number(&caps[1])?;
            let col = self.number(&caps[2])?;
            return Ok((row, self.unbias(col)?));
        }

        if let Some(caps) = RE_TOP_BOTTOM.captures(base) {
            let col = self.unbias(self.number(&caps[2])?)?;
            let row = if &caps[1] == "T" { 0 } else { self.max_row };
            return Ok((row, col));
        }

        if let Some(caps) = RE_LEFT_RIGHT.captures(base) {
            let row = self.number(&caps[2])?;
            let col = if &caps[1] == "L" { 0 } else { self.max_col };
            return Ok((row, col));
        }

        Err(ParseError::InvalidTileName {
            name: self.name.clone(),
            reason: "no row/column designator".to_string(),
        })
    }

    fn unbias(&self, col: i32) -> Result<i32, ParseError> {
        col.checked_sub(self.col_bias)
            .ok_or_else(|| ParseError::InvalidTileName {
                name: self.name.clone(),
                reason: format!("column {col} out of range for bias {}", self.col_bias),
            })
    }

    fn number(&self, digits: &str) -> Result<i32, ParseError> {
        digits.parse().map_err(|e| ParseError::InvalidTileName {
            name: self.name.clone(),
            reason: format!("'{digits}': {e}"),
        })
    }
}
