//! Decoder for MachXO2-style `globals.json`.
//!
//! ```text
//! {
//!   "lr-conns":     { "<name>": { "row": 6, "row-span": [0, 11] }, ... },
//!   "ud-conns":     { "0": [1, 2], "1": [5], ... },
//!   "branch-spans": { "0": { "1": [10, 20], "2": [30, 40] }, "1": { "5": [1, 1] }, ... },
//!   "missing-dccs": { "<row>": [0, 7], ... }
//! }
//! ```
//!
//! Column keys are strings only so the file stays readable. They must run
//! `0, 1, 2, ...` in file order; any other order is rejected rather than
//! sorted, because `branch-spans` is matched to `ud-conns` by position.

use super::parse_key_number;
use crate::document::decode;
use crate::error::{DbError, DbResult};
use indexmap::IndexMap;
use ltdb_common::{LeftRightConn, MachXo2GlobalsInfo, MissingDccs};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct RawGlobals {
    #[serde(rename = "lr-conns")]
    lr_conns: IndexMap<String, RawLrConn>,
    #[serde(rename = "ud-conns")]
    ud_conns: IndexMap<String, Vec<i32>>,
    #[serde(rename = "branch-spans")]
    branch_spans: IndexMap<String, IndexMap<String, Vec<i32>>>,
    #[serde(rename = "missing-dccs")]
    missing_dccs: IndexMap<String, Vec<i32>>,
}

#[derive(Deserialize)]
struct RawLrConn {
    row: i32,
    #[serde(rename = "row-span")]
    row_span: Vec<i32>,
}

/// Decodes a MachXO2-style globals document.
///
/// # Errors
///
/// Returns [`DbError::Schema`] if a section or field is missing, a column key
/// is out of sequence, `branch-spans` lacks a span for a global listed in
/// `ud-conns`, the two sections have different column counts, or a span has
/// fewer than two entries.
pub fn decode_machxo2_globals(doc: &Value, context: &str) -> DbResult<MachXo2GlobalsInfo> {
    let raw: RawGlobals = decode(doc, context)?;

    let mut lr_conns = Vec::with_capacity(raw.lr_conns.len());
    for (name, lr) in raw.lr_conns {
        let row_span = span_pair(&lr.row_span, context, || format!("lr-conns.{name}.row-span"))?;
        lr_conns.push(LeftRightConn {
            name,
            row: lr.row,
            row_span,
        });
    }

    let mut ud_conns = Vec::with_capacity(raw.ud_conns.len());
    for (col, (key, globals)) in raw.ud_conns.into_iter().enumerate() {
        check_column(&key, col, "ud-conns", context)?;
        ud_conns.push(globals);
    }

    let mut branch_spans = Vec::with_capacity(ud_conns.len());
    for (col, (key, spans)) in raw.branch_spans.iter().enumerate() {
        check_column(key, col, "branch-spans", context)?;
        let globals = ud_conns.get(col).ok_or_else(|| {
            DbError::schema(
                context,
                format!("branch-spans column {col} has no matching ud-conns column"),
            )
        })?;

        let mut column = Vec::with_capacity(globals.len());
        for global in globals {
            let span = spans.get(&global.to_string()).ok_or_else(|| {
                DbError::schema(
                    context,
                    format!("branch-spans column {col} has no span for global {global}"),
                )
            })?;
            column.push(span_pair(span, context, || {
                format!("branch-spans.{col}.{global}")
            })?);
        }
        branch_spans.push(column);
    }
    if branch_spans.len() != ud_conns.len() {
        return Err(DbError::schema(
            context,
            format!(
                "ud-conns has {} columns but branch-spans has {}",
                ud_conns.len(),
                branch_spans.len()
            ),
        ));
    }

    let mut missing_dccs = Vec::with_capacity(raw.missing_dccs.len());
    for (key, missing) in raw.missing_dccs {
        missing_dccs.push(MissingDccs {
            row: parse_key_number(&key, &key, context)?,
            missing,
        });
    }

    Ok(MachXo2GlobalsInfo {
        lr_conns,
        ud_conns,
        branch_spans,
        missing_dccs,
    })
}

/// Requires the `index`-th key of a column-indexed section to read `index`.
fn check_column(key: &str, index: usize, section: &str, context: &str) -> DbResult<()> {
    match key.parse::<usize>() {
        Ok(col) if col == index => Ok(()),
        Ok(col) => Err(DbError::schema(
            context,
            format!("{section} column {col} found where column {index} was expected"),
        )),
        Err(e) => Err(DbError::schema(
            context,
            format!("{section} key '{key}' is not a column number: {e}"),
        )),
    }
}

/// Reads the first two entries of a span array.
fn span_pair(
    values: &[i32],
    context: &str,
    location: impl FnOnce() -> String,
) -> DbResult<(i32, i32)> {
    match values {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(DbError::schema(
            context,
            format!("{} needs two entries, found {}", location(), values.len()),
        )),
    }
}
