// Source blob loading and word alignment
//
// SPIR-V is a stream of 32-bit words. Inputs that are not word aligned get
// zero bytes appended at the end; payload bytes are never touched.

use crate::error::EmitError;
use std::io;
use std::path::{Path, PathBuf};

/// Size of one SPIR-V word in bytes
pub const WORD_SIZE: usize = 4;

/// Binary payload read from disk, already padded to a word boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlob {
    path: PathBuf,
    bytes: Vec<u8>,
    original_len: usize,
}

impl SourceBlob {
    /// Read the whole input file.
    ///
    /// Directories and dangling paths are reported as not found. Empty input
    /// is rejected unless `allow_empty` is set.
    pub fn read(path: &Path, allow_empty: bool) -> Result<Self, EmitError> {
        if !path.is_file() {
            return Err(EmitError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|error| match error.kind() {
            // Removed between the check above and the read
            io::ErrorKind::NotFound => EmitError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => EmitError::InputRead {
                path: path.to_path_buf(),
                error,
            },
        })?;

        if bytes.is_empty() && !allow_empty {
            return Err(EmitError::InputEmpty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::from_bytes(path, bytes))
    }

    /// Wrap bytes that are already in memory, applying the padding rule
    pub fn from_bytes(path: impl Into<PathBuf>, mut bytes: Vec<u8>) -> Self {
        let original_len = bytes.len();
        bytes.resize(padded_len(original_len), 0);
        Self {
            path: path.into(),
            bytes,
            original_len,
        }
    }

    /// Path the blob was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Padded payload
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length before padding
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Number of zero bytes appended to reach a word boundary
    pub fn padding(&self) -> usize {
        self.bytes.len() - self.original_len
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload reinterpreted as little-endian words, independent of host endianness
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.bytes.chunks_exact(WORD_SIZE).map(|chunk| {
            // chunks_exact guarantees WORD_SIZE bytes
            u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        })
    }
}

/// Round `len` up to the next multiple of [`WORD_SIZE`]
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}
