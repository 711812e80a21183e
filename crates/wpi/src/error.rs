//! Error types for decoding.

use std::io;
use thiserror::Error;

use crate::model::Canvas;

/// What went wrong while reading a block.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("block 0x{tag:02X} truncated (expected {expected} payload bytes)")]
    TruncatedBlock { tag: u8, expected: usize },
}

/// A decode failure, carrying everything decoded before it.
#[derive(Debug, Error)]
#[error("decode failed at byte {offset}: {kind}")]
pub struct DecodeError {
    #[source]
    pub kind: DecodeErrorKind,
    /// Offset of the failing block, relative to the start of the block stream.
    pub offset: u64,
    pub partial: Canvas,
}

impl DecodeError {
    /// Give up on the error and keep the partially decoded canvas.
    pub fn into_partial(self) -> Canvas {
        self.partial
    }
}

/// Errors from [`crate::decode_file`].
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
