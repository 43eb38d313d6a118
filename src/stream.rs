//! Whole-file transcode that composes the read and write pipelines.

use std::io;
use std::path::Path;
use std::thread;

use crossbeam_channel::bounded;

use crate::codec::Codec;
use crate::errors::*;
use crate::{read, write};

/// Rewrite the lines of `src` into `dst`, resolving both codecs from the
/// file extensions (unrecognized extensions fall back to raw).
pub fn recode<P, Q>(src: P, dst: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src_codec = Codec::from_path_or_raw(&src)?;
    let dst_codec = Codec::from_path_or_raw(&dst)?;
    recode_with(src, src_codec, dst, dst_codec)
}

/// Rewrite the lines of `src` into `dst` with explicit codecs.
///
/// Lines are re-terminated with a newline on the way out, so `dst` ends with
/// a trailing newline even if `src` did not.
pub fn recode_with<P, Q>(src: P, src_codec: Codec, dst: Q, dst_codec: Codec) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let lines = read::read_file(src, src_codec)?;
    let (sender, receiver) = bounded::<Vec<u8>>(1);

    let feeder = thread::spawn(move || -> Result<()> {
        for line in lines {
            let mut line = line?;
            line.push(b'\n');
            if sender.send(line).is_err() {
                // writer side failed and reports its own error
                break;
            }
        }
        Ok(())
    });

    let written = write::write_file(receiver, dst, dst_codec);
    let fed = feeder.join().unwrap_or_else(|_| {
        Err(Error::Io(io::Error::new(
            io::ErrorKind::Other,
            "line feeder thread panicked",
        )))
    });
    written?;
    fed
}
