//! Keys identifying a device or a tile type within the database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies exactly one device: a `(family, device)` pair from `devices.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceLocator {
    /// The family name (e.g., "ECP5", "MachXO2").
    pub family: String,
    /// The device name within the family (e.g., "LFE5U-25F").
    pub device: String,
}

impl DeviceLocator {
    /// Creates a locator from a family and device name.
    pub fn new(family: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            device: device.into(),
        }
    }
}

impl fmt::Display for DeviceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.device)
    }
}

/// Identifies the bit database of one tile type within a family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileLocator {
    /// The family name.
    pub family: String,
    /// The tile type (e.g., "PLC2", "CIB_EBR").
    pub tiletype: String,
}

impl TileLocator {
    /// Creates a locator from a family and tile type.
    pub fn new(family: impl Into<String>, tiletype: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            tiletype: tiletype.into(),
        }
    }
}

impl fmt::Display for TileLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.tiletype)
    }
}
