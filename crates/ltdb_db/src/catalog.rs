//! Device lookup over the root `devices.json` document.
//!
//! The document is a two-level map, `families -> devices`, whose order is the
//! file order. Every lookup walks it through [`DeviceCatalog::find_device`],
//! so name and ID code lookups share the same traversal and the same
//! first-match-wins tie break.

use crate::document::decode;
use crate::error::{DbError, DbResult};
use ltdb_common::{parse_idcode, ChipInfo, DeviceLocator};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw JSON structure of one device entry.
#[derive(Deserialize)]
struct RawDevice {
    idcode: String,
    frames: u32,
    bits_per_frame: u32,
    pad_bits_after_frame: u32,
    pad_bits_before_frame: u32,
    max_row: i32,
    max_col: i32,
    col_bias: i32,
}

/// The parsed root devices document.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    families: Map<String, Value>,
}

impl DeviceCatalog {
    /// Builds a catalog from a parsed `devices.json`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Schema`] unless the document has a `families`
    /// object whose every entry has a `devices` object.
    pub fn from_document(doc: Value) -> DbResult<Self> {
        let Value::Object(mut root) = doc else {
            return Err(DbError::schema("devices.json", "root is not an object"));
        };
        let families = match root.remove("families") {
            Some(Value::Object(families)) => families,
            Some(_) => {
                return Err(DbError::schema(
                    "devices.json",
                    "'families' is not an object",
                ))
            }
            None => return Err(DbError::schema("devices.json", "missing 'families'")),
        };
        for (family, node) in &families {
            if !node.get("devices").is_some_and(Value::is_object) {
                return Err(DbError::schema(
                    format!("devices.json: families.{family}"),
                    "missing 'devices' object",
                ));
            }
        }
        Ok(Self { families })
    }

    fn devices_of<'a>(family: &str, node: &'a Value) -> DbResult<&'a Map<String, Value>> {
        node.get("devices").and_then(Value::as_object).ok_or_else(|| {
            DbError::schema(
                format!("devices.json: families.{family}"),
                "missing 'devices' object",
            )
        })
    }

    /// Returns the first device, in document order, accepted by `predicate`.
    ///
    /// The predicate receives each device's name and its JSON node. An error
    /// from the predicate stops the scan and is returned as is.
    pub fn find_device<F>(&self, mut predicate: F) -> DbResult<Option<DeviceLocator>>
    where
        F: FnMut(&str, &Value) -> DbResult<bool>,
    {
        for (family, node) in &self.families {
            for (device, dev_node) in Self::devices_of(family, node)? {
                if predicate(device, dev_node)? {
                    return Ok(Some(DeviceLocator::new(family.as_str(), device.as_str())));
                }
            }
        }
        Ok(None)
    }

    /// Finds the first device named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DeviceNotFound`] if no family lists the device.
    pub fn find_device_by_name(&self, name: &str) -> DbResult<DeviceLocator> {
        self.find_device(|n, _| Ok(n == name))?
            .ok_or_else(|| DbError::DeviceNotFound {
                name: name.to_string(),
            })
    }

    /// Finds the first device whose `idcode` field equals `idcode`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::IdcodeNotFound`] if nothing matches, or
    /// [`DbError::Schema`] if a scanned device has a missing or unparsable
    /// `idcode`.
    pub fn find_device_by_idcode(&self, idcode: u32) -> DbResult<DeviceLocator> {
        self.find_device(|n, node| {
            let field = node
                .get("idcode")
                .and_then(Value::as_str)
                .ok_or_else(|| DbError::schema(format!("devices.json: {n}"), "missing 'idcode'"))?;
            let parsed =
                parse_idcode(field).map_err(|e| DbError::from_parse(format!("devices.json: {n}"), e))?;
            Ok(parsed == idcode)
        })?
        .ok_or(DbError::IdcodeNotFound { idcode })
    }

    /// Extracts the chip geometry of `locator`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::UnknownDevice`] if the locator's family or device is
    /// absent, or [`DbError::Schema`] if a required field is missing or
    /// malformed.
    pub fn chip_info(&self, locator: &DeviceLocator) -> DbResult<ChipInfo> {
        let unknown = || DbError::UnknownDevice {
            locator: locator.clone(),
        };
        let family = self.families.get(&locator.family).ok_or_else(unknown)?;
        let node = Self::devices_of(&locator.family, family)?
            .get(&locator.device)
            .ok_or_else(unknown)?;

        let context = format!("devices.json: {locator}");
        let raw: RawDevice = decode(node, &context)?;
        let idcode = parse_idcode(&raw.idcode).map_err(|e| DbError::from_parse(&context, e))?;

        Ok(ChipInfo {
            family: locator.family.clone(),
            name: locator.device.clone(),
            num_frames: raw.frames,
            bits_per_frame: raw.bits_per_frame,
            pad_bits_after_frame: raw.pad_bits_after_frame,
            pad_bits_before_frame: raw.pad_bits_before_frame,
            idcode,
            max_row: raw.max_row,
            max_col: raw.max_col,
            col_bias: raw.col_bias,
        })
    }

    /// Returns every device, in document order.
    pub fn devices(&self) -> DbResult<Vec<DeviceLocator>> {
        let mut out = Vec::new();
        for (family, node) in &self.families {
            out.extend(
                Self::devices_of(family, node)?
                    .keys()
                    .map(|d| DeviceLocator::new(family.as_str(), d.as_str())),
            );
        }
        Ok(out)
    }

    /// Returns the family names, in document order.
    pub fn families(&self) -> Vec<&str> {
        self.families.keys().map(String::as_str).collect()
    }
}
