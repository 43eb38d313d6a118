//! Encoding pipeline: a sequence of lines written to a compressed file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use lz4_flex::frame::FrameEncoder;
use xz2::write::XzEncoder;

use crate::codec::Codec;
use crate::errors::*;

const XZ_LEVEL: u32 = 6;

/// A compressing stream with an explicit, fallible finalize step.
///
/// `finish` writes any pending trailer and flushes, consuming the stream so
/// it cannot run twice. It must be called before the underlying file handle
/// is released; ownership enforces the order.
trait Finish: Write + Send {
    fn finish(self: Box<Self>) -> io::Result<()>;
}

impl<W: Write + Send> Finish for BzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

impl<W: Write + Send> Finish for GzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

impl<W: Write + Send> Finish for FrameEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        (*self)
            .finish()
            .map(drop)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }
}

impl<W: Write + Send> Finish for XzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

impl<W: Write + Send> Finish for BufWriter<W> {
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.flush()
    }
}

/// Write `lines` to `path`, resolving the codec from the file extension.
///
/// An unrecognized extension falls back to [`Codec::Raw`] with a logged
/// warning; every other failure propagates.
pub fn write_file_auto<I, P>(lines: I, path: P) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    P: AsRef<Path>,
{
    let codec = Codec::from_path_or_raw(&path)?;
    write_file(lines, path, codec)
}

/// Write `lines` to `path` with an explicit codec.
///
/// Missing parent directories are created; an existing destination is
/// truncated. Each item is written exactly as handed in, with no delimiter
/// added. The call returns once every line is written and the compressed
/// stream is finalized; a finalize failure is an error even when all writes
/// succeeded, since the output would otherwise be missing its trailer.
pub fn write_file<I, P>(lines: I, path: P, codec: Codec) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    let mut writer = new_writer(file, codec);
    let drained = drain(&mut *writer, lines);
    let finished = writer.finish();
    drained?;
    finished?;
    Ok(())
}

fn drain<W, I>(writer: &mut W, lines: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    for line in lines {
        writer.write_all(line.as_ref())?;
    }
    Ok(())
}

fn new_writer(file: File, codec: Codec) -> Box<dyn Finish> {
    match codec {
        Codec::Bzip2 => Box::new(BzEncoder::new(file, bzip2::Compression::fast())),
        Codec::Gzip => Box::new(GzEncoder::new(file, flate2::Compression::default())),
        Codec::Lz4 => Box::new(FrameEncoder::new(file)),
        Codec::Xz => Box::new(XzEncoder::new(file, XZ_LEVEL)),
        Codec::Raw => Box::new(BufWriter::new(file)),
    }
}
