//! Decoder for ECP5-style `globals.json`.
//!
//! ```text
//! {
//!   "quadrants": { "UL": { "x0": 0, "x1": 35, "y0": 0, "y1": 24 }, ... },
//!   "taps":      { "C5": { "lx0": 0, "lx1": 4, "rx0": 5, "rx1": 9 }, ... },
//!   "spines":    { "UL5": { "x": 5, "y": 12 }, ... }
//! }
//! ```

use super::parse_key_number;
use crate::document::decode;
use crate::error::{DbError, DbResult};
use indexmap::IndexMap;
use ltdb_common::{Ecp5GlobalsInfo, GlobalRegion, SpineSegment, TapSegment};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct RawGlobals {
    quadrants: IndexMap<String, RawRegion>,
    taps: IndexMap<String, RawTap>,
    spines: IndexMap<String, RawSpine>,
}

#[derive(Deserialize)]
struct RawRegion {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

#[derive(Deserialize)]
struct RawTap {
    lx0: i32,
    lx1: i32,
    rx0: i32,
    rx1: i32,
}

#[derive(Deserialize)]
struct RawSpine {
    x: i32,
    y: i32,
}

/// Decodes an ECP5-style globals document, keeping document order.
///
/// # Errors
///
/// Returns [`DbError::Schema`] if a section or field is missing, a tap key is
/// not `C<n>`, or a spine key is not two letters followed by a number.
pub fn decode_ecp5_globals(doc: &Value, context: &str) -> DbResult<Ecp5GlobalsInfo> {
    let raw: RawGlobals = decode(doc, context)?;

    let quadrants = raw
        .quadrants
        .into_iter()
        .map(|(name, r)| GlobalRegion {
            name,
            x0: r.x0,
            x1: r.x1,
            y0: r.y0,
            y1: r.y1,
        })
        .collect();

    let mut tapsegs = Vec::with_capacity(raw.taps.len());
    for (key, t) in raw.taps {
        tapsegs.push(TapSegment {
            tap_col: parse_tap_key(&key, context)?,
            lx0: t.lx0,
            lx1: t.lx1,
            rx0: t.rx0,
            rx1: t.rx1,
        });
    }

    let mut spinesegs = Vec::with_capacity(raw.spines.len());
    for (key, s) in raw.spines {
        let (quadrant, tap_col) = parse_spine_key(&key, context)?;
        spinesegs.push(SpineSegment {
            quadrant,
            tap_col,
            spine_row: s.y,
            spine_col: s.x,
        });
    }

    Ok(Ecp5GlobalsInfo {
        quadrants,
        tapsegs,
        spinesegs,
    })
}

/// Parses a tap key such as `C12` into its column.
fn parse_tap_key(key: &str, context: &str) -> DbResult<i32> {
    let digits = key.strip_prefix('C').ok_or_else(|| {
        DbError::schema(context, format!("tap key '{key}' does not start with 'C'"))
    })?;
    parse_key_number(key, digits, context)
}

/// Splits a spine key such as `UL12` into its quadrant and tap column.
fn parse_spine_key(key: &str, context: &str) -> DbResult<(String, i32)> {
    let quadrant = key
        .get(..2)
        .filter(|q| q.bytes().all(|b| b.is_ascii_alphabetic()))
        .ok_or_else(|| {
            DbError::schema(
                context,
                format!("spine key '{key}' does not start with a two-letter quadrant"),
            )
        })?;
    let tap_col = parse_key_number(key, &key[2..], context)?;
    Ok((quadrant.to_string(), tap_col))
}
