//! Global clock routing models for the two supported family styles.
//!
//! ECP5-style devices describe their global network as quadrants, tap
//! segments and spine segments. MachXO2-style devices describe it as
//! left/right connections plus per-column up/down connections with branch
//! spans. The two schemas share nothing, so they are separate types joined
//! only by the [`GlobalsInfo`] tag.

use serde::{Deserialize, Serialize};

/// A named rectangular quadrant of an ECP5-style device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRegion {
    /// Quadrant name (e.g., "UL", "LR").
    pub name: String,
    /// First column.
    pub x0: i32,
    /// Last column.
    pub x1: i32,
    /// First row.
    pub y0: i32,
    /// Last row.
    pub y1: i32,
}

impl GlobalRegion {
    /// Returns `true` if the inclusive rectangle contains `(row, col)`.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.y0 && row <= self.y1 && col >= self.x0 && col <= self.x1
    }
}

/// A tap column and the column ranges it drives on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapSegment {
    /// The column of the tap, parsed from a `C<n>` key.
    pub tap_col: i32,
    /// First column driven to the left.
    pub lx0: i32,
    /// Last column driven to the left.
    pub lx1: i32,
    /// First column driven to the right.
    pub rx0: i32,
    /// Last column driven to the right.
    pub rx1: i32,
}

/// Which side of a tap column drives a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapSide {
    /// The tile lies in the tap's left range.
    Left,
    /// The tile lies in the tap's right range.
    Right,
}

/// The tap column driving a given tile, and from which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapDriver {
    /// The tap column.
    pub col: i32,
    /// The side of the tap the tile lies on.
    pub side: TapSide,
}

impl TapSegment {
    /// Returns the side of this tap that drives `col`, if any.
    pub fn side_for(&self, col: i32) -> Option<TapSide> {
        if col >= self.lx0 && col <= self.lx1 {
            Some(TapSide::Left)
        } else if col >= self.rx0 && col <= self.rx1 {
            Some(TapSide::Right)
        } else {
            None
        }
    }
}

/// The spine position feeding a tap column within one quadrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpineSegment {
    /// Two-character quadrant name, from the key prefix.
    pub quadrant: String,
    /// Tap column, from the key's numeric suffix.
    pub tap_col: i32,
    /// Row of the spine tile.
    pub spine_row: i32,
    /// Column of the spine tile.
    pub spine_col: i32,
}

/// Global routing topology of an ECP5-style device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ecp5GlobalsInfo {
    /// Quadrants, in document order.
    pub quadrants: Vec<GlobalRegion>,
    /// Tap segments, in document order.
    pub tapsegs: Vec<TapSegment>,
    /// Spine segments, in document order.
    pub spinesegs: Vec<SpineSegment>,
}

impl Ecp5GlobalsInfo {
    /// Returns the name of the first quadrant containing `(row, col)`.
    pub fn quadrant_at(&self, row: i32, col: i32) -> Option<&str> {
        self.quadrants
            .iter()
            .find(|q| q.contains(row, col))
            .map(|q| q.name.as_str())
    }

    /// Returns the tap driving column `col`.
    pub fn tap_driver(&self, col: i32) -> Option<TapDriver> {
        self.tapsegs.iter().find_map(|seg| {
            seg.side_for(col).map(|side| TapDriver {
                col: seg.tap_col,
                side,
            })
        })
    }

    /// Returns the `(row, col)` of the spine feeding `tap_col` in `quadrant`.
    pub fn spine_driver(&self, quadrant: &str, tap_col: i32) -> Option<(i32, i32)> {
        self.spinesegs
            .iter()
            .find(|s| s.quadrant == quadrant && s.tap_col == tap_col)
            .map(|s| (s.spine_row, s.spine_col))
    }
}

/// A left/right global connection of a MachXO2-style device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftRightConn {
    /// Connection name.
    pub name: String,
    /// Row the connection enters on.
    pub row: i32,
    /// Inclusive `(first, last)` row span.
    pub row_span: (i32, i32),
}

/// Rows whose DCC (dynamic clock control) indices are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDccs {
    /// The row.
    pub row: i32,
    /// DCC indices missing on that row.
    pub missing: Vec<i32>,
}

/// Global routing topology of a MachXO2-style device.
///
/// `ud_conns` and `branch_spans` are indexed by column and agree
/// element-for-element: `branch_spans[c][i]` is the span of global
/// `ud_conns[c][i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachXo2GlobalsInfo {
    /// Left/right connections, in document order.
    pub lr_conns: Vec<LeftRightConn>,
    /// Global ids with up/down connections, per column.
    pub ud_conns: Vec<Vec<i32>>,
    /// `(first, second)` branch spans, per column, parallel to `ud_conns`.
    pub branch_spans: Vec<Vec<(i32, i32)>>,
    /// Rows with missing DCCs, in document order.
    pub missing_dccs: Vec<MissingDccs>,
}

impl MachXo2GlobalsInfo {
    /// Returns the global ids with up/down connections in `col`.
    pub fn ud_conns_at(&self, col: usize) -> &[i32] {
        self.ud_conns.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the branch span of global `global` in column `col`.
    pub fn branch_span(&self, col: usize, global: i32) -> Option<(i32, i32)> {
        let idx = self.ud_conns.get(col)?.iter().position(|&g| g == global)?;
        self.branch_spans.get(col)?.get(idx).copied()
    }

    /// Returns the DCC indices missing on `row`.
    pub fn missing_dccs_at(&self, row: i32) -> &[i32] {
        self.missing_dccs
            .iter()
            .find(|m| m.row == row)
            .map(|m| m.missing.as_slice())
            .unwrap_or(&[])
    }
}

/// Decoded globals of either family style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalsInfo {
    /// Quadrant/tap/spine topology.
    Ecp5(Ecp5GlobalsInfo),
    /// Row/column connection topology.
    MachXo2(MachXo2GlobalsInfo),
}

impl GlobalsInfo {
    /// Returns the ECP5-style model, if this is one.
    pub fn as_ecp5(&self) -> Option<&Ecp5GlobalsInfo> {
        match self {
            Self::Ecp5(info) => Some(info),
            Self::MachXo2(_) => None,
        }
    }

    /// Returns the MachXO2-style model, if this is one.
    pub fn as_machxo2(&self) -> Option<&MachXo2GlobalsInfo> {
        match self {
            Self::MachXo2(info) => Some(info),
            Self::Ecp5(_) => None,
        }
    }
}
