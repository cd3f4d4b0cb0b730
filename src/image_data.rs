use std::borrow::Cow;

use anyhow::anyhow;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

/// What happens to the scanline buffer before it goes into IDAT.
///
/// `Stored` writes the scanlines as-is even though IHDR declares deflate.
/// Only decoders that know about this (such as [`crate::decoder`]) can read
/// the result. `Zlib` produces a standard PNG.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    #[default]
    Stored,
    Zlib,
}

pub(crate) fn compress_data(scanlines: Vec<u8>, compression: Compression) -> Vec<u8> {
    match compression {
        Compression::Stored => scanlines,
        Compression::Zlib => compress_to_vec_zlib(&scanlines, 9),
    }
}

/// Recovers the scanline buffer from IDAT data. A stored payload always
/// starts with a zero filter byte, which can never begin a zlib stream.
pub(crate) fn decompress_data(data: &[u8]) -> anyhow::Result<Cow<'_, [u8]>> {
    match data.first() {
        None | Some(0) => Ok(Cow::Borrowed(data)),
        Some(_) => decompress_to_vec_zlib(data)
            .map(Cow::Owned)
            .map_err(|e| anyhow!("Failed to decompress image data: {e:?}")),
    }
}
