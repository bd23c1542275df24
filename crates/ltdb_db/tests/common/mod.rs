//! Shared fixtures: an on-disk database with one ECP5 and one MachXO2 device,
//! plus loaders that count how often they are invoked.

#![allow(dead_code)]

use ltdb_db::{BitDatabaseLoader, DbResult, DocumentSource, JsonFileSource, TileBitDatabase};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

pub const DEVICES: &str = r#"{
    "families": {
        "ECP5": {
            "devices": {
                "LFE5U-25F": {
                    "idcode": "0x41111043",
                    "frames": 7562,
                    "bits_per_frame": 592,
                    "pad_bits_after_frame": 0,
                    "pad_bits_before_frame": 0,
                    "max_row": 50,
                    "max_col": 72,
                    "col_bias": 0
                },
                "LFE5U-45F": {
                    "idcode": "0x41112043",
                    "frames": 9470,
                    "bits_per_frame": 846,
                    "pad_bits_after_frame": 0,
                    "pad_bits_before_frame": 0,
                    "max_row": 71,
                    "max_col": 90,
                    "col_bias": 0
                }
            }
        },
        "MachXO2": {
            "devices": {
                "LCMXO2-1200HC": {
                    "idcode": "4660",
                    "frames": 333,
                    "bits_per_frame": 1080,
                    "pad_bits_after_frame": 8,
                    "pad_bits_before_frame": 0,
                    "max_row": 21,
                    "max_col": 25,
                    "col_bias": 1
                }
            }
        }
    }
}"#;

pub const ECP5_GLOBALS: &str = r#"{
    "quadrants": {
        "UL": {"x0": 0, "x1": 35, "y0": 0, "y1": 24},
        "UR": {"x0": 36, "x1": 72, "y0": 0, "y1": 24},
        "LL": {"x0": 0, "x1": 35, "y0": 25, "y1": 50},
        "LR": {"x0": 36, "x1": 72, "y0": 25, "y1": 50}
    },
    "taps": {
        "C3": {"lx0": 0, "lx1": 2, "rx0": 3, "rx1": 6},
        "C11": {"lx0": 7, "lx1": 10, "rx0": 11, "rx1": 14}
    },
    "spines": {
        "UL3": {"x": 3, "y": 12},
        "LL3": {"x": 3, "y": 37},
        "NW7": {"x": 7, "y": 12}
    }
}"#;

pub const MACHXO2_GLOBALS: &str = r#"{
    "lr-conns": {
        "LEFT": {"row": 6, "row-span": [0, 11]},
        "RIGHT": {"row": 6, "row-span": [12, 21]}
    },
    "ud-conns": {"0": [1, 2], "1": [5]},
    "branch-spans": {
        "0": {"1": [10, 20], "2": [30, 40]},
        "1": {"5": [1, 1]}
    },
    "missing-dccs": {"3": [0, 7]}
}"#;

pub const ECP5_TILEGRID: &str = r#"{
    "R2C3:PLC2": {
        "cols": 48, "rows": 64, "start_bit": 128, "start_frame": 96,
        "type": "PLC2",
        "sites": [
            {"name": "SLICE", "pos_col": 3, "pos_row": 2},
            {"name": "SLICE", "pos_col": 3, "pos_row": 2}
        ]
    },
    "MIB_R0C3:PIOT0": {
        "cols": 48, "rows": 16, "start_bit": 0, "start_frame": 96,
        "type": "PIOT0",
        "sites": [{"name": "PIO", "pos_col": 3, "pos_row": 0}]
    },
    "CIB_R10C1:CIB_PIC_L": {
        "cols": 12, "rows": 8, "start_bit": 400, "start_frame": 0,
        "type": "CIB_PIC_L",
        "sites": []
    }
}"#;

pub const MACHXO2_TILEGRID: &str = r#"{
    "PT4:PIC_T0": {
        "cols": 48, "rows": 4, "start_bit": 0, "start_frame": 100,
        "type": "PIC_T0",
        "sites": [{"name": "PIO", "pos_col": 3, "pos_row": 0}]
    },
    "R5C7:PLC": {
        "cols": 48, "rows": 20, "start_bit": 40, "start_frame": 300,
        "type": "PLC",
        "sites": [{"name": "SLICE", "pos_col": 6, "pos_row": 5}]
    }
}"#;

/// Builds the fixture database in a fresh temporary directory.
pub fn fixture_db() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("devices.json"), DEVICES).unwrap();

    write(root, "ECP5/LFE5U-25F/globals.json", ECP5_GLOBALS);
    write(root, "ECP5/LFE5U-25F/tilegrid.json", ECP5_TILEGRID);
    write(root, "MachXO2/LCMXO2-1200HC/globals.json", MACHXO2_GLOBALS);
    write(root, "MachXO2/LCMXO2-1200HC/tilegrid.json", MACHXO2_TILEGRID);

    write(root, "ECP5/tiledata/PLC2/bits.db", ".mux R0C0_A0\nR0C0_B0 F0B1\n\n");
    write(root, "ECP5/tiledata/PIOT0/bits.db", ".config PIOA.BASE_TYPE 0\n");
    write(root, "MachXO2/tiledata/PLC/bits.db", ".fixed_conn A B\n");
    dir
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A [`DocumentSource`] that records every path it loads.
#[derive(Default)]
pub struct CountingSource {
    loads: Mutex<Vec<PathBuf>>,
}

impl CountingSource {
    pub fn loads_of(&self, file_name: &str) -> usize {
        self.loads
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.file_name().is_some_and(|n| n == file_name))
            .count()
    }
}

impl DocumentSource for CountingSource {
    fn load(&self, path: &Path) -> DbResult<Value> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        JsonFileSource.load(path)
    }
}

/// A [`BitDatabaseLoader`] that counts opens and sleeps to widen race windows.
pub struct SlowCountingLoader {
    pub opens: AtomicUsize,
    pub delay: Duration,
}

impl SlowCountingLoader {
    pub fn new(delay: Duration) -> Self {
        Self {
            opens: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl BitDatabaseLoader for SlowCountingLoader {
    fn open(&self, path: &Path) -> DbResult<TileBitDatabase> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        TileBitDatabase::open(path)
    }
}
