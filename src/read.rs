//! Decoding pipeline: a compressed file read as a sequence of lines.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::thread;

use bzip2::read::BzDecoder;
use crossbeam_channel::{bounded, Receiver, Sender};
use flate2::read::GzDecoder;
use lz4_flex::frame::FrameDecoder;
use xz2::read::XzDecoder;

use crate::codec::Codec;
use crate::errors::*;

/// Lines decoded from a file, in file order.
///
/// Each item is one line with the trailing newline stripped. A failure inside
/// the decode thread is delivered as a single `Err` item, after which the
/// sequence ends. Dropping a partially consumed `LineReader` disconnects the
/// decode thread, which then releases its file handle and exits.
#[derive(Debug)]
pub struct LineReader {
    lines: Receiver<Result<Vec<u8>>>,
    codec: Codec,
}

impl LineReader {
    /// The codec this reader was opened with.
    pub fn codec(&self) -> Codec {
        self.codec
    }
}

impl Iterator for LineReader {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.recv().ok()
    }
}

/// Open `path` for reading, resolving the codec from the file extension.
///
/// An unrecognized extension falls back to [`Codec::Raw`] with a logged
/// warning; every other failure propagates.
pub fn read_file_auto<P: AsRef<Path>>(path: P) -> Result<LineReader> {
    let codec = Codec::from_path_or_raw(&path)?;
    read_file(path, codec)
}

/// Open `path` for reading with an explicit codec.
///
/// The file's existence is checked up front; decoding itself runs on a
/// dedicated thread, handing one line at a time to the returned reader. The
/// producer blocks until the consumer takes delivery, so a slow consumer
/// throttles decompression.
///
/// # Errors
///
/// This returns [`Error::NotFound`] if `path` does not exist. Failures after
/// that point (open errors, malformed compressed data) are yielded by the
/// reader itself.
pub fn read_file<P: AsRef<Path>>(path: P, codec: Codec) -> Result<LineReader> {
    let path = path.as_ref().to_path_buf();
    match fs::metadata(&path) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(path));
        }
        Err(err) => return Err(err.into()),
        Ok(_) => {}
    }

    let (sender, lines) = bounded(1);
    thread::spawn(move || decode_loop(path, codec, sender));

    Ok(LineReader { lines, codec })
}

fn decode_loop(path: PathBuf, codec: Codec, sender: Sender<Result<Vec<u8>>>) {
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            let _ = sender.send(Err(err.into()));
            return;
        }
    };
    let mut reader = BufReader::new(new_reader(file, codec));

    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                if sender.send(Ok(line)).is_err() {
                    // receiver dropped; unwind
                    break;
                }
            }
            Err(err) => {
                let _ = sender.send(Err(decode_error(err)));
                break;
            }
        }
    }
    // `reader` (and the file it owns) drops before `sender` closes the
    // channel, so teardown completes before the consumer sees the end.
}

fn new_reader(file: File, codec: Codec) -> Box<dyn Read + Send> {
    match codec {
        Codec::Bzip2 => Box::new(BzDecoder::new(file)),
        Codec::Gzip => Box::new(GzDecoder::new(file)),
        Codec::Lz4 => Box::new(FrameDecoder::new(file)),
        Codec::Xz => Box::new(XzDecoder::new(file)),
        Codec::Raw => Box::new(file),
    }
}

fn decode_error(err: std::io::Error) -> Error {
    match err.kind() {
        ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
            Error::MalformedStream(err)
        }
        _ => Error::Io(err),
    }
}
