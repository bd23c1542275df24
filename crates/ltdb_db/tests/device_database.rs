//! End-to-end tests against an on-disk fixture database.

mod common;

use common::{fixture_db, CountingSource};
use ltdb_db::{
    Database, DbError, DeviceLocator, ErrorKind, FileBitDatabaseLoader, GlobalsInfo, TileLocator,
};
use std::sync::Arc;

fn open_counting(root: &std::path::Path) -> (Database, Arc<CountingSource>) {
    let source = Arc::new(CountingSource::default());
    let db = Database::load_with(root, source.clone(), Arc::new(FileBitDatabaseLoader)).unwrap();
    (db, source)
}

// ---------------------------------------------------------------------------
// Device lookup
// ---------------------------------------------------------------------------

#[test]
fn every_registered_name_resolves() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let devices = db.devices().unwrap();
    assert_eq!(devices.len(), 3);
    for loc in devices {
        assert_eq!(db.find_device_by_name(&loc.device).unwrap(), loc);
    }
}

#[test]
fn unknown_name_is_not_found() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let err = db.find_device_by_name("nonexistent").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn idcode_lookup() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    assert_eq!(
        db.find_device_by_idcode(0x4111_1043).unwrap(),
        DeviceLocator::new("ECP5", "LFE5U-25F")
    );
    assert_eq!(
        db.find_device_by_idcode(0x1234).unwrap(),
        DeviceLocator::new("MachXO2", "LCMXO2-1200HC")
    );
    let err = db.find_device_by_idcode(0x0123_4567).unwrap_err();
    assert!(matches!(err, DbError::IdcodeNotFound { .. }));
}

#[test]
fn chip_info_round_trips_idcode() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let loc = db.find_device_by_name("LCMXO2-1200HC").unwrap();
    let ci = db.chip_info(&loc).unwrap();
    assert_eq!(ci.idcode, 4660);
    assert_eq!(ci.pad_bits_after_frame, 8);
    assert_eq!(db.find_device_by_idcode(ci.idcode).unwrap(), loc);
}

// ---------------------------------------------------------------------------
// Globals
// ---------------------------------------------------------------------------

#[test]
fn ecp5_globals_decode() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let loc = DeviceLocator::new("ECP5", "LFE5U-25F");
    let g = db.ecp5_globals(&loc).unwrap();

    assert_eq!(g.quadrants.len(), 4);
    assert_eq!(g.quadrants[3].name, "LR");
    assert_eq!(g.tapsegs[0].tap_col, 3);
    assert_eq!(g.spinesegs[2].quadrant, "NW");
    assert_eq!(g.spinesegs[2].tap_col, 7);

    assert_eq!(g.quadrant_at(30, 40), Some("LR"));
    assert_eq!(g.tap_driver(12).map(|d| d.col), Some(11));
    assert_eq!(g.spine_driver("LL", 3), Some((37, 3)));
}

#[test]
fn machxo2_globals_decode() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let loc = DeviceLocator::new("MachXO2", "LCMXO2-1200HC");
    let g = db.machxo2_globals(&loc).unwrap();

    assert_eq!(g.ud_conns, vec![vec![1, 2], vec![5]]);
    assert_eq!(g.branch_spans, vec![vec![(10, 20), (30, 40)], vec![(1, 1)]]);
    assert_eq!(g.lr_conns[1].row_span, (12, 21));
    assert_eq!(g.missing_dccs_at(3), &[0, 7]);
}

#[test]
fn machxo2_globals_repeated_column_rejected() {
    let dir = fixture_db();
    common::write(
        dir.path(),
        "MachXO2/LCMXO2-1200HC/globals.json",
        r#"{
            "lr-conns": {},
            "ud-conns": {"0": [1], "1": [2], "0": [3]},
            "branch-spans": {"0": {"1": [0, 1]}, "1": {"2": [0, 1]}},
            "missing-dccs": {}
        }"#,
    );
    let db = Database::load(dir.path()).unwrap();
    let err = db
        .machxo2_globals(&DeviceLocator::new("MachXO2", "LCMXO2-1200HC"))
        .unwrap_err();
    assert!(matches!(err, DbError::Parse { .. }));
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn globals_selects_decoder_by_family() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let ecp5 = db.globals(&DeviceLocator::new("ECP5", "LFE5U-25F")).unwrap();
    assert!(matches!(ecp5, GlobalsInfo::Ecp5(_)));
    let xo2 = db
        .globals(&DeviceLocator::new("MachXO2", "LCMXO2-1200HC"))
        .unwrap();
    assert!(matches!(xo2, GlobalsInfo::MachXo2(_)));
}

#[test]
fn globals_are_reread_every_call() {
    let dir = fixture_db();
    let (db, source) = open_counting(dir.path());
    let loc = DeviceLocator::new("ECP5", "LFE5U-25F");
    db.ecp5_globals(&loc).unwrap();
    db.ecp5_globals(&loc).unwrap();
    assert_eq!(source.loads_of("globals.json"), 2);
}

#[test]
fn wrong_schema_for_family_fails() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let err = db
        .machxo2_globals(&DeviceLocator::new("ECP5", "LFE5U-25F"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

// ---------------------------------------------------------------------------
// Tilegrid
// ---------------------------------------------------------------------------

#[test]
fn tilegrid_loaded_once() {
    let dir = fixture_db();
    let (db, source) = open_counting(dir.path());
    let loc = DeviceLocator::new("ECP5", "LFE5U-25F");

    let first = db.device_tilegrid(&loc).unwrap();
    let second = db.device_tilegrid(&loc).unwrap();

    assert_eq!(source.loads_of("tilegrid.json"), 1);
    assert_eq!(first, second);
    assert_eq!(db.cached_tilegrids(), 1);
}

#[test]
fn tilegrid_not_reread_after_file_removed() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let loc = DeviceLocator::new("ECP5", "LFE5U-25F");
    let first = db.device_tilegrid(&loc).unwrap();
    std::fs::remove_file(dir.path().join("ECP5/LFE5U-25F/tilegrid.json")).unwrap();
    assert_eq!(db.device_tilegrid(&loc).unwrap(), first);
}

#[test]
fn tilegrid_tiles_carry_chip_parameters() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let loc = DeviceLocator::new("MachXO2", "LCMXO2-1200HC");
    let tiles = db.device_tilegrid(&loc).unwrap();

    assert_eq!(tiles.len(), 2);
    assert!(tiles.iter().all(|t| t.max_row == 21 && t.max_col == 25 && t.col_bias == 1));
    assert_eq!(tiles[0].name, "PT4:PIC_T0");
    assert_eq!(tiles[0].row_col().unwrap(), (0, 3));
    assert_eq!(tiles[1].row_col().unwrap(), (5, 6));
    assert_eq!(tiles[1].sites[0].site_type, "SLICE");
}

#[test]
fn tilegrid_order_and_positions_ecp5() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let tiles = db
        .device_tilegrid(&DeviceLocator::new("ECP5", "LFE5U-25F"))
        .unwrap();
    let names: Vec<&str> = tiles.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["R2C3:PLC2", "MIB_R0C3:PIOT0", "CIB_R10C1:CIB_PIC_L"]);
    assert_eq!(tiles[2].row_col().unwrap(), (10, 1));
}

#[test]
fn tilegrid_missing_file() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let err = db
        .device_tilegrid(&DeviceLocator::new("ECP5", "LFE5U-45F"))
        .unwrap_err();
    assert!(matches!(err, DbError::FileNotFound { .. }));
    assert_eq!(db.cached_tilegrids(), 0);
}

#[test]
fn tilegrid_schema_error() {
    let dir = fixture_db();
    common::write(
        dir.path(),
        "ECP5/LFE5U-45F/tilegrid.json",
        r#"{"R1C1:PLC2": {"cols": 1, "rows": 1, "start_bit": 0, "start_frame": 0, "type": "PLC2",
            "sites": [{"name": "SLICE"}]}}"#,
    );
    let db = Database::load(dir.path()).unwrap();
    let err = db
        .device_tilegrid(&DeviceLocator::new("ECP5", "LFE5U-45F"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

// ---------------------------------------------------------------------------
// Bit databases
// ---------------------------------------------------------------------------

#[test]
fn tile_bitdata_from_tilegrid() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let tiles = db
        .device_tilegrid(&DeviceLocator::new("ECP5", "LFE5U-25F"))
        .unwrap();

    let plc = db.tile_bitdata(&tiles[0].locator()).unwrap();
    assert!(plc.contents().unwrap().starts_with(".mux"));
    assert!(plc.path().ends_with("ECP5/tiledata/PLC2/bits.db"));

    let again = db.tile_bitdata(&TileLocator::new("ECP5", "PLC2")).unwrap();
    assert!(Arc::ptr_eq(&plc, &again));
    assert_eq!(db.cached_bitdbs(), 1);
}

#[test]
fn tile_bitdata_binary_file() {
    let dir = fixture_db();
    std::fs::write(
        dir.path().join("ECP5/tiledata/PLC2/bits.db"),
        b"\x00\xff\xfe\x80",
    )
    .unwrap();
    let db = Database::load(dir.path()).unwrap();
    let bits = db.tile_bitdata(&TileLocator::new("ECP5", "PLC2")).unwrap();
    assert_eq!(bits.bytes(), b"\x00\xff\xfe\x80");
    assert!(bits.contents().is_none());
}

#[test]
fn tile_bitdata_missing() {
    let dir = fixture_db();
    let db = Database::load(dir.path()).unwrap();
    let err = db
        .tile_bitdata(&TileLocator::new("ECP5", "CIB_PIC_L"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(db.cached_bitdbs(), 0);
}
