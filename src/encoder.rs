use std::io::Write;

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk, CHUNK_OVERHEAD},
    image_data::{compress_data, Compression},
    scanlines, Error, ImageBuffer, Result,
};

pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Writes 8-bit truecolor, non-interlaced PNG streams consisting of exactly
/// one IHDR, one IDAT and one IEND chunk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngEncoder {
    compression: Compression,
}

impl PngEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(compression: Compression) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn encode(&self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let mut out = vec![];
        self.encode_to(&mut out, pixels, width, height)?;
        Ok(out)
    }

    pub fn encode_image(&self, image: &ImageBuffer) -> Result<Vec<u8>> {
        self.encode(image.data(), image.width(), image.height())
    }

    /// Streams the encoded image into `sink`. Argument errors are raised
    /// before the first byte is written; sink errors are passed through.
    pub fn encode_to<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<()> {
        let header = IHDRChunk::truecolor(width, height);
        let scanlines = scanlines::serialize(pixels, width, height)?;
        let payload = compress_data(scanlines, self.compression);
        if u32::try_from(payload.len()).is_err() {
            return Err(Error::invalid(format!(
                "{width}x{height} image doesn't fit in a single IDAT chunk"
            )));
        }
        log::debug!(
            "encoding {width}x{height} image, {} IDAT bytes ({:?})",
            payload.len(),
            self.compression
        );

        sink.write_all(&SIGNATURE)?;
        header.write_to(sink)?;
        IDATChunk { data: &payload }.write_to(sink)?;
        IENDChunk.write_to(sink)?;
        Ok(())
    }

    /// Exact size of the stream `encode` produces for a stored payload.
    pub fn stored_len(width: u32, height: u32) -> usize {
        let scanlines = height as usize * (width as usize * 3 + 1);
        SIGNATURE.len() + 3 * CHUNK_OVERHEAD + IHDRChunk::LENGTH + scanlines
    }
}

/// Encodes with the default (stored) payload.
pub fn encode(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    PngEncoder::new().encode(pixels, width, height)
}
