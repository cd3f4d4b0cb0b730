//! Reader for the narrow PNG profile the encoder writes: 8-bit truecolor,
//! no interlacing, unfiltered scanlines, stored or zlib IDAT payloads.

use std::marker::PhantomData;

use anyhow::{anyhow, bail, ensure, Context};
use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{ihdr, parse_chunk, Chunk},
    image_data::decompress_data,
    scanlines, ImageBuffer, SIGNATURE,
};

pub struct PngDecoder<'a, State>(&'a [u8], PhantomData<State>);

pub struct Start;
pub struct Chunks;

impl<'a> PngDecoder<'a, Start> {
    pub fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self(rest, PhantomData))
    }

    pub fn parse_ihdr(self) -> anyhow::Result<(PngDecoder<'a, Chunks>, ihdr::IHDRChunk)> {
        let (rest, chunk) = parse_chunk(self.0)
            .map_err(|e| anyhow!("malformed first chunk: {:?}", e.map(|e| e.code)))?;
        match chunk {
            Chunk::IHDR(header) => Ok((PngDecoder(rest, PhantomData), header)),
            other => bail!(
                "expected IHDR as the first chunk, found {}",
                String::from_utf8_lossy(other.chunk_type())
            ),
        }
    }
}

impl PngDecoder<'_, Chunks> {
    /// Concatenates every IDAT payload up to IEND. Unknown chunks are skipped.
    pub fn read_image_data(self) -> anyhow::Result<Vec<u8>> {
        let mut data = self.0;
        let mut image_data = vec![];
        loop {
            let (rest, chunk) =
                parse_chunk(data).map_err(|e| anyhow!("malformed chunk: {:?}", e.map(|e| e.code)))?;
            data = rest;
            match chunk {
                Chunk::IDAT(idat) => image_data.extend_from_slice(idat.data),
                Chunk::IEND => break,
                Chunk::IHDR(_) => bail!("duplicate IHDR chunk"),
                Chunk::Unknown(raw) => log::debug!(
                    "skipping {} chunk ({} bytes)",
                    String::from_utf8_lossy(raw.chunk_type),
                    raw.data.len()
                ),
            }
        }
        if !data.is_empty() {
            log::warn!("ignoring {} bytes after IEND", data.len());
        }
        ensure!(!image_data.is_empty(), "Couldn't find an IDAT");
        Ok(image_data)
    }
}

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

/// Decodes a stream produced by [`crate::PngEncoder`] back into its pixels.
pub fn decode(bytes: &[u8]) -> anyhow::Result<ImageBuffer> {
    let (decoder, header) = PngDecoder::new(bytes)?.parse_ihdr()?;
    ensure!(
        header.bit_depth == 8 && header.color_type == ihdr::ColorType::Truecolor,
        "only 8-bit truecolor images are supported, got {}-bit {:?}",
        header.bit_depth,
        header.color_type
    );
    ensure!(
        header.interlace_method == ihdr::Interlacing::None,
        "interlaced images are not supported"
    );
    ensure!(
        header.compression_method == 0 && header.filter_method == 0,
        "unknown compression or filter method"
    );

    let image_data = decoder.read_image_data()?;
    let scanlines = decompress_data(&image_data)?;
    let pixels = scanlines::deserialize(&scanlines, header.width, header.height)
        .context("Failed to reconstruct scanlines.")?;
    Ok(ImageBuffer::new(header.width, header.height, pixels)?)
}
