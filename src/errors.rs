use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported compression type: {} (supported extensions: {})", .path.display(), .supported.join(", "))]
    UnsupportedCodec {
        path: PathBuf,
        supported: &'static [&'static str],
    },
    #[error("malformed compressed stream: {0}")]
    MalformedStream(io::Error),
}
