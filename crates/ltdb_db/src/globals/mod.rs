//! Decoders for the family-specific `globals.json` documents.
//!
//! Each family uses one of two unrelated schemas; [`GlobalsStyle`] maps a
//! family name to the decoder that understands its document.

pub mod ecp5;
pub mod machxo2;

pub use ecp5::decode_ecp5_globals;
pub use machxo2::decode_machxo2_globals;

use crate::error::{DbError, DbResult};
use ltdb_common::GlobalsInfo;
use serde_json::Value;

/// Which globals schema a family uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalsStyle {
    /// Quadrants, taps and spines.
    Ecp5,
    /// Left/right and per-column up/down connections.
    MachXo2,
}

impl GlobalsStyle {
    /// Returns the schema used by `family`, if it is a known family.
    pub fn for_family(family: &str) -> Option<Self> {
        match family {
            "ECP5" => Some(Self::Ecp5),
            "MachXO" | "MachXO2" | "MachXO3" | "MachXO3D" => Some(Self::MachXo2),
            _ => None,
        }
    }

    /// Decodes `doc` with this style's decoder.
    pub fn decode(self, doc: &Value, context: &str) -> DbResult<GlobalsInfo> {
        match self {
            Self::Ecp5 => decode_ecp5_globals(doc, context).map(GlobalsInfo::Ecp5),
            Self::MachXo2 => decode_machxo2_globals(doc, context).map(GlobalsInfo::MachXo2),
        }
    }
}

/// Parses the integer part of a document key.
pub(crate) fn parse_key_number(key: &str, digits: &str, context: &str) -> DbResult<i32> {
    digits.parse().map_err(|e| {
        DbError::schema(
            context,
            format!("key '{key}': '{digits}' is not an integer: {e}"),
        )
    })
}
