//! Integration tests decoding WPI files from disk.

use std::path::PathBuf;

use wpi::block::{ID_LAYER, ID_STROKE_BEGIN, TAG_PEN_PRESSURE, TAG_PEN_TILT, TAG_PEN_XY, TAG_STROKE};
use wpi::{HEADER_LEN, OpenError, Tilt, decode_file};

fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wpi-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn with_header(body: &[u8]) -> Vec<u8> {
    // Header bytes that would decode as blocks if they were not skipped.
    let mut bytes = vec![TAG_STROKE; HEADER_LEN as usize];
    bytes.extend_from_slice(body);
    bytes
}

fn sample_body() -> Vec<u8> {
    let mut body = vec![TAG_STROKE, 0, ID_STROKE_BEGIN];
    body.extend_from_slice(&[TAG_PEN_XY, 0, 0x00, 0x0A, 0x00, 0x14]);
    body.extend_from_slice(&[TAG_PEN_PRESSURE, 0, 0, 0, 0x02, 0x00]);
    body.extend_from_slice(&[TAG_PEN_TILT, 0, 30, 40, 0, 0]);
    body.extend_from_slice(&[197, 6, 1, 2, 3, 4]);
    body.extend_from_slice(&[TAG_PEN_XY, 0, 0x00, 0x12, 0x00, 0x1C]);
    body.extend_from_slice(&[TAG_STROKE, 0, ID_LAYER]);
    body.extend_from_slice(&[TAG_STROKE, 0, ID_STROKE_BEGIN]);
    body.extend_from_slice(&[TAG_PEN_XY, 0, 0x00, 0x00, 0x00, 0x00]);
    body
}

#[test]
fn decode_file_skips_header() {
    let path = scratch_file("sample.wpi", &with_header(&sample_body()));
    let canvas = decode_file(&path, HEADER_LEN).expect("decode failed");

    assert_eq!(canvas.layer_count(), 2);
    assert_eq!(canvas.stroke_count(), 2);

    let first = &canvas.layers()[0].strokes()[0];
    assert_eq!(first.len(), 2);
    let p0 = first.points()[0];
    assert_eq!((p0.x, p0.y), (1415, 5));
    assert_eq!(p0.pressure, Some(512));
    assert_eq!(p0.tilt, Some(Tilt::new(30, 40)));
    let p1 = first.points()[1];
    assert_eq!((p1.x, p1.y), (1416, 7));
    assert_eq!(p1.pressure, None);

    let second = &canvas.layers()[1];
    assert_eq!(second.name(), "l2");
    assert_eq!(second.strokes()[0].points()[0].x, 1414);
}

#[test]
fn decode_file_with_custom_header_len() {
    let mut bytes = vec![0u8; 16];
    bytes.extend_from_slice(&sample_body());
    let path = scratch_file("short-header.wpi", &bytes);

    let canvas = decode_file(&path, 16).expect("decode failed");
    assert_eq!(canvas.point_count(), 3);
}

#[test]
fn decode_file_reports_missing_file() {
    let path = std::env::temp_dir().join("wpi-tests-does-not-exist.wpi");
    let err = decode_file(&path, HEADER_LEN).unwrap_err();
    assert!(matches!(err, OpenError::Io { .. }));
}

#[test]
fn decode_file_keeps_partial_canvas_on_truncation() {
    let mut body = sample_body();
    body.extend_from_slice(&[TAG_PEN_PRESSURE, 0, 0]);
    let path = scratch_file("truncated.wpi", &with_header(&body));

    match decode_file(&path, HEADER_LEN) {
        Err(OpenError::Decode(err)) => {
            assert_eq!(err.offset, body.len() as u64 - 3);
            assert_eq!(err.partial.point_count(), 3);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}
