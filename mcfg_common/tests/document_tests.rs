//! # Document File Tests
//!
//! Load/save behaviour against real files:
//!
//! - Missing files and bad headers
//! - Byte-exact Latin-1 round trip
//! - Block scoping across a multi-block document

use mcfg_common::blocks;
use mcfg_common::document::{DocumentError, ParameterDocument, TextEncoding};
use mcfg_common::topology::{MachineFeatures, Topology};

const MACHINE: &str = "Checksum=0\r\n\
    [Machine]\r\n\
    BevelAxisInstalled=1\r\n\
    DualBevelInstalled=1\r\n\
    DualTransverseInstalled=1\r\n\
    SensorTHCInstalled=7\r\n\
    \r\n\
    [Axis6]\r\n\
    RotatingTransverse=1\r\n\
    BevelAxisInstalled=0\r\n";

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ParameterDocument::load(&dir.path().join("absent.ini")).unwrap_err();
    assert!(matches!(err, DocumentError::Read { .. }), "{err}");
}

#[test]
fn test_load_without_checksum_header_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ini");
    std::fs::write(&path, "[Machine]\r\nAutoHome=1\r\n").unwrap();
    assert!(matches!(
        ParameterDocument::load(&path),
        Err(DocumentError::MissingChecksumHeader)
    ));
}

#[test]
fn test_save_into_missing_directory_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let doc = ParameterDocument::parse(MACHINE).unwrap();
    let err = doc.save(&dir.path().join("no/such/dir/out.ini")).unwrap_err();
    assert!(matches!(err, DocumentError::Write { .. }), "{err}");
}

#[test]
fn test_latin1_round_trip_is_byte_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.ini");
    // 0xB0 is a lone degree sign, invalid as UTF-8.
    let bytes = b"Checksum=0\r\n[Rotate]\r\nUnits\xB0=1\r\n".to_vec();
    std::fs::write(&path, &bytes).unwrap();

    let mut doc = ParameterDocument::load(&path).unwrap();
    assert_eq!(doc.encoding(), TextEncoding::Latin1);
    assert_eq!(doc.get_value("[Rotate]", "Units\u{b0}="), Some(1));
    doc.recompute_checksum();

    let out = dir.path().join("out.ini");
    doc.save(&out).unwrap();
    let saved = std::fs::read(&out).unwrap();

    let mut expected = format!("Checksum={}\r\n", doc.checksum()).into_bytes();
    expected.extend_from_slice(&bytes[b"Checksum=0\r\n".len()..]);
    assert_eq!(saved, expected);
}

#[test]
fn test_utf8_file_stays_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf8.ini");
    std::fs::write(&path, "Checksum=0\r\n[Rotate]\r\nUnits°=1\r\n").unwrap();
    let doc = ParameterDocument::load(&path).unwrap();
    assert_eq!(doc.encoding(), TextEncoding::Utf8);
    assert_eq!(doc.get_value("[Rotate]", "Units°="), Some(1));
}

#[test]
fn test_block_scoping_across_blocks() {
    let doc = ParameterDocument::parse(MACHINE).unwrap();
    assert_eq!(doc.get_value(blocks::MACHINE, blocks::BEVEL_AXIS_INSTALLED), Some(1));
    assert_eq!(doc.get_value(blocks::AXIS6, blocks::BEVEL_AXIS_INSTALLED), Some(0));
    assert_eq!(doc.get_value(blocks::AXIS6, blocks::SENSOR_THC_INSTALLED), None);
}

#[test]
fn test_topology_from_file() {
    let doc = ParameterDocument::parse(MACHINE).unwrap();
    let topology = Topology::infer(&doc);
    assert!(topology.has(MachineFeatures::DUAL_TRANSVERSE));
    assert!(topology.has(MachineFeatures::ROTATING_TRANSVERSE));
    assert!(!topology.has(MachineFeatures::RAIL_X_AXIS));
    assert_eq!(topology.thc_count, 4);
    assert_eq!(topology.arc_glide_count, 0);
}
