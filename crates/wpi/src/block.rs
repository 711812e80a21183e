//! Block framing for the WPI tag stream.
//!
//! Every block starts with a two-byte header:
//!
//! ```text
//! Byte 0: tag
//! Byte 1: auxiliary field (meaning depends on tag)
//! ```
//!
//! | Tag   | Block        | Payload                                  |
//! |-------|--------------|------------------------------------------|
//! | `241` | stroke/layer | 1 control byte                           |
//! | `97`  | position     | 4 bytes: x, y as big-endian `i16`        |
//! | `100` | pressure     | 4 bytes: reserved, pressure (`i16` BE)   |
//! | `101` | tilt         | 4 bytes: tilt x, tilt y, reserved        |
//! | `194`, `197`, `199` | reserved | `aux - 2` bytes, discarded     |
//! | other | unknown      | none                                     |
//!
//! The stream has no block count, no total length and no terminator.

use std::io::{self, Read};

use crate::error::DecodeErrorKind;
use crate::model::Tilt;

/// Length of the opaque document header preceding the block stream.
pub const HEADER_LEN: u64 = 2059;

/// Horizontal shift applied after scaling sensor units.
pub const OFFSET_X: i16 = 1414;

// ============================================================================
// Tags
// ============================================================================

/// Stroke and layer control. Payload: 1 control id byte
pub const TAG_STROKE: u8 = 241;

/// Pen position. Payload: 4 bytes
pub const TAG_PEN_XY: u8 = 97;

/// Pen pressure. Payload: 4 bytes
pub const TAG_PEN_PRESSURE: u8 = 100;

/// Pen tilt. Payload: 4 bytes
pub const TAG_PEN_TILT: u8 = 101;

/// Structured blocks of unknown meaning. Payload: `aux - 2` bytes
pub const TAG_RESERVED: [u8; 3] = [197, 194, 199];

// ============================================================================
// Control ids
// ============================================================================

pub const ID_LAYER: u8 = 128;
pub const ID_STROKE_BEGIN: u8 = 1;
pub const ID_STROKE_END: u8 = 0;

const SAMPLE_LEN: usize = 4;

/// Payload of a [`TAG_STROKE`] block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Layer,
    StrokeBegin,
    StrokeEnd,
    Other(u8),
}

impl From<u8> for Control {
    fn from(id: u8) -> Self {
        match id {
            ID_LAYER => Control::Layer,
            ID_STROKE_BEGIN => Control::StrokeBegin,
            ID_STROKE_END => Control::StrokeEnd,
            other => Control::Other(other),
        }
    }
}

/// One decoded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Control(Control),
    /// Position in output units.
    Position { x: i16, y: i16 },
    Pressure(i16),
    Tilt(Tilt),
    /// A reserved block whose payload was discarded.
    Reserved { tag: u8, skipped: usize },
    /// A tag outside every known category. Nothing beyond the header is read.
    Unknown { tag: u8, aux: u8 },
}

impl Block {
    /// Number of stream bytes this block occupied, header included.
    pub fn wire_len(&self) -> usize {
        match self {
            Block::Control(_) => 3,
            Block::Position { .. } | Block::Pressure(_) | Block::Tilt(_) => 2 + SAMPLE_LEN,
            Block::Reserved { skipped, .. } => 2 + skipped,
            Block::Unknown { .. } => 2,
        }
    }
}

/// Map raw sensor units into output units.
///
/// Arithmetic wraps at 16 bits and division truncates toward zero.
///
/// # Example
/// ```
/// assert_eq!(wpi::transform_position(10, 20), (1415, 5));
/// ```
pub fn transform_position(raw_x: i16, raw_y: i16) -> (i16, i16) {
    let x = (raw_x.wrapping_add(5) / 8).wrapping_add(OFFSET_X);
    let y = raw_y.wrapping_mul(2).wrapping_add(5) / 8;
    (x, y)
}

/// Read the next block from `reader`.
///
/// Returns `Ok(None)` when the stream ends inside a header, including a
/// lone trailing byte.
///
/// # Errors
///
/// Returns `DecodeErrorKind::TruncatedBlock` if the stream ends inside a
/// payload, and `DecodeErrorKind::Io` for any other read failure.
pub fn read_block<R: Read>(reader: &mut R) -> Result<Option<Block>, DecodeErrorKind> {
    let Some([tag, aux]) = read_header(reader)? else {
        return Ok(None);
    };

    let block = match tag {
        TAG_STROKE => {
            let [id] = read_payload::<_, 1>(reader, tag)?;
            Block::Control(Control::from(id))
        }

        TAG_PEN_XY => {
            let data = read_payload::<_, SAMPLE_LEN>(reader, tag)?;
            let raw_x = i16::from_be_bytes([data[0], data[1]]);
            let raw_y = i16::from_be_bytes([data[2], data[3]]);
            let (x, y) = transform_position(raw_x, raw_y);
            Block::Position { x, y }
        }

        TAG_PEN_PRESSURE => {
            let data = read_payload::<_, SAMPLE_LEN>(reader, tag)?;
            Block::Pressure(i16::from_be_bytes([data[2], data[3]]))
        }

        TAG_PEN_TILT => {
            let data = read_payload::<_, SAMPLE_LEN>(reader, tag)?;
            Block::Tilt(Tilt::new(data[0], data[1]))
        }

        t if TAG_RESERVED.contains(&t) => {
            // The auxiliary field counts the header too. Byte arithmetic:
            // aux 0 and 1 wrap to 254 and 255.
            let len = usize::from(aux.wrapping_sub(2));
            skip(reader, tag, len)?;
            Block::Reserved { tag, skipped: len }
        }

        _ => Block::Unknown { tag, aux },
    };

    Ok(Some(block))
}

fn read_header<R: Read>(reader: &mut R) -> io::Result<Option<[u8; 2]>> {
    let mut header = [0u8; 2];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => return Ok(None),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(Some(header))
}

fn read_payload<R: Read, const N: usize>(
    reader: &mut R,
    tag: u8,
) -> Result<[u8; N], DecodeErrorKind> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, tag, N))?;
    Ok(buf)
}

fn skip<R: Read>(reader: &mut R, tag: u8, len: usize) -> Result<(), DecodeErrorKind> {
    let copied = io::copy(&mut reader.take(len as u64), &mut io::sink())?;
    if copied < len as u64 {
        return Err(DecodeErrorKind::TruncatedBlock { tag, expected: len });
    }
    Ok(())
}

fn truncated(e: io::Error, tag: u8, expected: usize) -> DecodeErrorKind {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        DecodeErrorKind::TruncatedBlock { tag, expected }
    } else {
        DecodeErrorKind::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(bytes: &[u8]) -> Vec<Block> {
        let mut cursor = Cursor::new(bytes);
        let mut blocks = Vec::new();
        while let Some(block) = read_block(&mut cursor).unwrap() {
            blocks.push(block);
        }
        blocks
    }

    #[test]
    fn test_transform_reference_point() {
        assert_eq!(transform_position(10, 20), (1415, 5));
    }

    #[test]
    fn test_transform_truncates_toward_zero() {
        assert_eq!(transform_position(0, 0), (1414, 0));
        assert_eq!(transform_position(-13, -3), (1413, 0));
        assert_eq!(transform_position(-14, -7), (1413, -1));
    }

    #[test]
    fn test_transform_wraps_on_overflow() {
        assert_eq!(transform_position(i16::MAX, 0).0, (i16::MIN + 4) / 8 + OFFSET_X);
        assert_eq!(transform_position(0, 20000).1, ((40000i32 - 65536 + 5) / 8) as i16);
    }

    #[test]
    fn test_read_position() {
        let blocks = read_all(&[TAG_PEN_XY, 0, 0x00, 0x0A, 0x00, 0x14]);
        assert_eq!(blocks, vec![Block::Position { x: 1415, y: 5 }]);
    }

    #[test]
    fn test_read_pressure_ignores_leading_bytes() {
        let blocks = read_all(&[TAG_PEN_PRESSURE, 0, 0xFF, 0xFF, 0x01, 0x2C]);
        assert_eq!(blocks, vec![Block::Pressure(300)]);
    }

    #[test]
    fn test_read_negative_pressure() {
        let blocks = read_all(&[TAG_PEN_PRESSURE, 0, 0, 0, 0xFF, 0xFE]);
        assert_eq!(blocks, vec![Block::Pressure(-2)]);
    }

    #[test]
    fn test_read_tilt() {
        let blocks = read_all(&[TAG_PEN_TILT, 0, 200, 17, 0xAA, 0xBB]);
        assert_eq!(blocks, vec![Block::Tilt(Tilt::new(200, 17))]);
    }

    #[test]
    #[rustfmt::skip]
    fn test_read_controls() {
        let blocks = read_all(&[
            TAG_STROKE, 0, ID_LAYER,
            TAG_STROKE, 0, ID_STROKE_BEGIN,
            TAG_STROKE, 0, ID_STROKE_END,
            TAG_STROKE, 0, 0x42,
        ]);
        assert_eq!(
            blocks,
            vec![
                Block::Control(Control::Layer),
                Block::Control(Control::StrokeBegin),
                Block::Control(Control::StrokeEnd),
                Block::Control(Control::Other(0x42)),
            ]
        );
    }

    #[test]
    fn test_reserved_skips_aux_minus_two() {
        let mut bytes = vec![197, 10];
        bytes.extend_from_slice(&[0xEE; 8]);
        bytes.extend_from_slice(&[TAG_PEN_XY, 0, 0x00, 0x0A, 0x00, 0x14]);
        let blocks = read_all(&bytes);
        assert_eq!(
            blocks,
            vec![
                Block::Reserved { tag: 197, skipped: 8 },
                Block::Position { x: 1415, y: 5 },
            ]
        );
        assert_eq!(blocks[0].wire_len(), 10);
    }

    #[test]
    fn test_reserved_small_aux_wraps() {
        let mut bytes = vec![194, 1];
        bytes.extend_from_slice(&[0xAA; 255]);
        bytes.extend_from_slice(&[199, 0]);
        bytes.extend_from_slice(&[0xBB; 254]);
        bytes.extend_from_slice(&[TAG_PEN_PRESSURE, 0, 0, 0, 0, 9]);
        let blocks = read_all(&bytes);
        assert_eq!(
            blocks,
            vec![
                Block::Reserved { tag: 194, skipped: 255 },
                Block::Reserved { tag: 199, skipped: 254 },
                Block::Pressure(9),
            ]
        );
        assert_eq!(blocks[0].wire_len(), 257);
    }

    #[test]
    fn test_reserved_aux_two_skips_nothing() {
        let blocks = read_all(&[197, 2, TAG_PEN_PRESSURE, 0, 0, 0, 0, 1]);
        assert_eq!(
            blocks,
            vec![Block::Reserved { tag: 197, skipped: 0 }, Block::Pressure(1)]
        );
    }

    #[test]
    fn test_unknown_tag_consumes_header_only() {
        let blocks = read_all(&[0x07, 0x99, TAG_PEN_PRESSURE, 0, 0, 0, 0, 5]);
        assert_eq!(
            blocks,
            vec![Block::Unknown { tag: 0x07, aux: 0x99 }, Block::Pressure(5)]
        );
    }

    #[test]
    fn test_empty_stream_is_clean_end() {
        assert!(read_all(&[]).is_empty());
    }

    #[test]
    fn test_lone_trailing_byte_is_clean_end() {
        assert!(read_all(&[TAG_PEN_XY]).is_empty());
    }

    #[test]
    fn test_truncated_sample_fails() {
        let mut cursor = Cursor::new(vec![TAG_PEN_XY, 0, 0x00, 0x0A]);
        let err = read_block(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            DecodeErrorKind::TruncatedBlock { tag: TAG_PEN_XY, expected: 4 }
        ));
    }

    #[test]
    fn test_truncated_reserved_fails() {
        let mut cursor = Cursor::new(vec![199, 12, 1, 2, 3]);
        let err = read_block(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            DecodeErrorKind::TruncatedBlock { tag: 199, expected: 10 }
        ));
    }

    #[test]
    fn test_missing_control_byte_fails() {
        let mut cursor = Cursor::new(vec![TAG_STROKE, 0]);
        assert!(read_block(&mut cursor).is_err());
    }
}
