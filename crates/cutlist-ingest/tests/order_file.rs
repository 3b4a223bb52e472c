//! Integration tests for reading order files from disk.

use std::io::Write;

use cutlist_ingest::{IngestError, read_order_bytes, read_order_file};
use cutlist_model::Field;
use tempfile::NamedTempFile;

const HEADER: &str = "板厚,材質,幅,長さ,コメント,ドリル,中抜き,機種,寸法・型切,サビ,Y,Z,切断長";

#[test]
fn reads_shift_jis_order_file() {
    let text = format!("{HEADER}\n９,ＳＳ４００,100,200,33,,φ22@1,41,1,,2024/01/01,2030/01/01,500\n");
    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&text);
    assert!(!had_errors);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&encoded).unwrap();

    let order = read_order_file(file.path()).unwrap();
    assert_eq!(order.name, file.path().display().to_string());
    assert_eq!(order.rows.len(), 1);
    let row = &order.rows[0];
    assert_eq!(row.grade, "ＳＳ４００");
    assert_eq!(row.number_of(Field::Thickness), Some(9.0));
    assert_eq!(row.number_of(Field::CutLength), Some(500.0));
    assert!(order.has_column(Field::CutLength));
}

#[test]
fn reads_utf8_with_bom() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(format!("{HEADER}\n4.5,SS400,1,1,,,,40,,,,,\n").as_bytes());
    let order = read_order_bytes("bom.csv", &bytes).unwrap();
    assert_eq!(order.rows[0].thickness, "4.5");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = read_order_file(&dir.path().join("gone.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}

#[test]
fn undecodable_bytes_are_reported() {
    let err = read_order_bytes("bad.csv", &[0xFF, 0xFE, 0xFF, 0x80]).unwrap_err();
    assert!(matches!(err, IngestError::Undecodable { .. }));
}
