//! Tag-at-a-time stream decoder.
//!
//! The decoder never looks beyond the current block. Control blocks move
//! the insertion point (current layer, current stroke); sample blocks are
//! appended at the insertion point.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::block::{Block, Control, read_block};
use crate::error::{DecodeError, OpenError};
use crate::model::{Canvas, Stroke};

/// Block counters gathered while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub blocks: usize,
    pub reserved: usize,
    pub unknown: usize,
    /// Samples that arrived with no stroke open.
    pub dropped: usize,
}

/// Incremental canvas builder driven by decoded blocks.
#[derive(Debug, Default)]
pub struct Decoder {
    canvas: Canvas,
    in_stroke: bool,
    offset: u64,
    stats: DecodeStats,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one block to the canvas under construction.
    pub fn feed(&mut self, block: Block) {
        self.stats.blocks += 1;

        match block {
            Block::Control(Control::Layer) => {
                self.canvas.begin_layer();
                self.in_stroke = false;
            }

            Block::Control(Control::StrokeBegin) => {
                self.canvas.current_layer_mut().begin_stroke();
                self.in_stroke = true;
            }

            Block::Control(Control::StrokeEnd) => {
                log::trace!("stroke end marker at byte {}", self.offset);
            }

            Block::Control(Control::Other(id)) => {
                log::trace!("ignoring control id 0x{id:02X} at byte {}", self.offset);
            }

            Block::Position { x, y } => {
                if let Some(stroke) = self.current_stroke() {
                    stroke.push_position(x, y);
                } else {
                    self.drop_sample("position");
                }
            }

            Block::Pressure(p) => {
                if let Some(stroke) = self.current_stroke() {
                    stroke.push_pressure(p);
                } else {
                    self.drop_sample("pressure");
                }
            }

            Block::Tilt(tilt) => {
                if let Some(stroke) = self.current_stroke() {
                    stroke.push_tilt(tilt);
                } else {
                    self.drop_sample("tilt");
                }
            }

            Block::Reserved { tag, skipped } => {
                log::trace!("skipped {skipped} bytes of reserved block 0x{tag:02X}");
                self.stats.reserved += 1;
            }

            Block::Unknown { .. } => {
                self.stats.unknown += 1;
            }
        }

        self.offset += block.wire_len() as u64;
    }

    /// Number of stream bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn finish(self) -> Canvas {
        self.canvas
    }

    fn current_stroke(&mut self) -> Option<&mut Stroke> {
        if !self.in_stroke {
            return None;
        }
        self.canvas.current_layer_mut().last_stroke_mut()
    }

    fn drop_sample(&mut self, what: &str) {
        self.stats.dropped += 1;
        log::debug!("dropping {what} sample outside a stroke at byte {}", self.offset);
    }
}

/// Decode a block stream into a [`Canvas`].
///
/// `reader` must already be positioned past the document header.
///
/// # Errors
///
/// Returns a [`DecodeError`] when a read fails for any reason other than
/// the stream ending between blocks. The error carries the canvas built
/// up to the failing block.
pub fn decode<R: Read>(mut reader: R) -> Result<Canvas, DecodeError> {
    let mut decoder = Decoder::new();

    loop {
        match read_block(&mut reader) {
            Ok(Some(block)) => decoder.feed(block),
            Ok(None) => break,
            Err(kind) => {
                return Err(DecodeError {
                    kind,
                    offset: decoder.offset(),
                    partial: decoder.finish(),
                });
            }
        }
    }

    let stats = decoder.stats();
    log::debug!(
        "decoded {} blocks ({} reserved, {} unknown, {} dropped samples)",
        stats.blocks,
        stats.reserved,
        stats.unknown,
        stats.dropped
    );
    Ok(decoder.finish())
}

/// Open a WPI file, skip `header_len` bytes and decode the rest.
///
/// # Errors
///
/// Returns `OpenError::Io` if the file cannot be opened or seeked, and
/// `OpenError::Decode` if decoding fails.
pub fn decode_file(path: impl AsRef<Path>, header_len: u64) -> Result<Canvas, OpenError> {
    let path = path.as_ref();
    let open_err = |source| OpenError::Io {
        path: path.to_owned(),
        source,
    };

    let mut file = File::open(path).map_err(open_err)?;
    file.seek(SeekFrom::Start(header_len)).map_err(open_err)?;

    Ok(decode(BufReader::new(file))?)
}
