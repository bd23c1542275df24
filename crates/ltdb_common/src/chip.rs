//! Per-device chip geometry.

use serde::{Deserialize, Serialize};

/// Static configuration-memory geometry of one device.
///
/// Extracted fresh from `devices.json` on every request; it is cheap to build
/// and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipInfo {
    /// The family name.
    pub family: String,
    /// The device name.
    pub name: String,
    /// Number of configuration frames.
    pub num_frames: u32,
    /// Number of bits in each frame.
    pub bits_per_frame: u32,
    /// Padding bits shifted in after each frame.
    pub pad_bits_after_frame: u32,
    /// Padding bits shifted in before each frame.
    pub pad_bits_before_frame: u32,
    /// The silicon ID code.
    pub idcode: u32,
    /// Highest tile row index.
    pub max_row: i32,
    /// Highest tile column index.
    pub max_col: i32,
    /// Offset subtracted from tile-name column numbers.
    pub col_bias: i32,
}

impl ChipInfo {
    /// Total number of bits in one frame including padding.
    pub fn padded_frame_bits(&self) -> u32 {
        self.pad_bits_before_frame + self.bits_per_frame + self.pad_bits_after_frame
    }

    /// Total number of configuration bits, excluding padding.
    pub fn total_bits(&self) -> u64 {
        u64::from(self.num_frames) * u64::from(self.bits_per_frame)
    }
}
