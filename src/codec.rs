//! Codec selection from file extensions.

use std::fmt;
use std::path::Path;

use crate::errors::*;

/// File extensions recognized by [`Codec::from_path`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["bz2", "gz", "lz4", "xz", "txt"];

/// A compression format, paired with a decoder and an encoder stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Codec {
    Bzip2,
    Gzip,
    Lz4,
    Xz,
    /// Pass-through, no compression.
    Raw,
}

impl Codec {
    /// Resolve the codec from the path's final extension.
    ///
    /// Matching is case-sensitive: `.bz2`, `.gz`, `.lz4`, `.xz` and `.txt`
    /// are recognized, everything else (including a missing extension) is
    /// [`Error::UnsupportedCodec`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bz2") => Ok(Codec::Bzip2),
            Some("gz") => Ok(Codec::Gzip),
            Some("lz4") => Ok(Codec::Lz4),
            Some("xz") => Ok(Codec::Xz),
            Some("txt") => Ok(Codec::Raw),
            _ => Err(Error::UnsupportedCodec {
                path: path.to_path_buf(),
                supported: SUPPORTED_EXTENSIONS,
            }),
        }
    }

    /// Like [`Codec::from_path`], but an unrecognized extension falls back to
    /// [`Codec::Raw`] with a logged warning. Any other error propagates.
    pub fn from_path_or_raw<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_path(path) {
            Err(err @ Error::UnsupportedCodec { .. }) => {
                log::warn!("{err}; defaulting to raw");
                Ok(Codec::Raw)
            }
            other => other,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Codec::Bzip2 => "bzip2",
            Codec::Gzip => "gzip",
            Codec::Lz4 => "lz4",
            Codec::Xz => "xz",
            Codec::Raw => "raw",
        })
    }
}
