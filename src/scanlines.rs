//! Conversion between flat RGB buffers and PNG's filtered scanline layout.

use anyhow::{anyhow, bail};

use crate::{
    filters::Filter,
    pixel::{buffer_len, BYTES_PER_PIXEL},
    Error, Result,
};

/// Splits `pixels` into `height` rows, each prefixed with a `Filter::None`
/// byte.
pub fn serialize(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = buffer_len(width, height)?;
    if pixels.len() != expected {
        return Err(Error::invalid(format!(
            "{width}x{height} image needs {expected} pixel bytes, got {}",
            pixels.len()
        )));
    }
    let capacity = expected
        .checked_add(height as usize)
        .ok_or_else(|| Error::invalid(format!("{width}x{height} image is too large")))?;

    let mut scanlines = Vec::with_capacity(capacity);
    for row in pixels.chunks_exact(width as usize * BYTES_PER_PIXEL) {
        scanlines.push(Filter::None as u8);
        scanlines.extend_from_slice(row);
    }
    Ok(scanlines)
}

/// Inverse of [`serialize`]. Rows using any filter other than `None` are
/// rejected.
pub fn deserialize(scanlines: &[u8], width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    let pixel_len = buffer_len(width, height)?;
    let row_width = width as usize * BYTES_PER_PIXEL;
    let expected = pixel_len
        .checked_add(height as usize)
        .ok_or_else(|| anyhow!("{width}x{height} image is too large"))?;
    if scanlines.len() != expected {
        bail!(
            "{width}x{height} image needs {expected} scanline bytes, got {}",
            scanlines.len()
        );
    }

    let mut pixels = Vec::with_capacity(pixel_len);
    for (index, scanline) in scanlines.chunks_exact(row_width + 1).enumerate() {
        let (&filter, row) = scanline
            .split_first()
            .ok_or_else(|| anyhow!("scanline {index} is empty"))?;
        match Filter::try_from(filter)? {
            Filter::None => pixels.extend_from_slice(row),
            other => bail!("scanline {index} uses unsupported filter {other:?}"),
        }
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::{deserialize, serialize};
    use crate::Error;

    #[test]
    fn prefixes_every_row_with_a_zero_filter_byte() {
        for (width, height) in [(1, 1), (3, 2), (5, 7), (16, 1), (1, 9)] {
            let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i % 251 + 1) as u8).collect();
            let scanlines = serialize(&pixels, width, height).unwrap();
            assert_eq!(scanlines.len(), (height + width * height * 3) as usize);
            for row in 0..height {
                assert_eq!(scanlines[(row * (width * 3 + 1)) as usize], 0);
            }
        }
    }

    #[test]
    fn rows_are_copied_verbatim() {
        let pixels = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let scanlines = serialize(&pixels, 2, 2).unwrap();
        assert_eq!(scanlines, [0, 1, 2, 3, 4, 5, 6, 0, 7, 8, 9, 10, 11, 12]);
        assert_eq!(deserialize(&scanlines, 2, 2).unwrap(), pixels);
    }

    #[test]
    fn wrong_buffer_length_is_invalid() {
        let err = serialize(&[0; 11], 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(matches!(
            serialize(&[], 0, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn filtered_rows_are_outside_the_profile() {
        let scanlines = [0, 1, 2, 3, 1, 4, 5, 6];
        assert!(deserialize(&scanlines, 1, 2).is_err());
        assert!(deserialize(&scanlines[..7], 1, 2).is_err());
    }

    #[test]
    fn scanline_length_overflow_is_an_error() {
        // 3 * w * h still fits in 64 bits, adding the filter bytes doesn't.
        assert!(deserialize(&[0, 0, 0, 0], 1_431_655_766, 4_294_967_294).is_err());
    }
}
