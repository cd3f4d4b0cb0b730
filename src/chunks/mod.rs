use std::{borrow::Cow, io::Write};

use nom::{
    bytes::complete::take,
    combinator::{map_res, verify},
    number::complete::be_u32,
    IResult,
};

use crate::{crc, Error, Result};

pub mod idat;
pub mod iend;
pub mod ihdr;

/// Length field, type tag and CRC around every chunk payload.
pub const CHUNK_OVERHEAD: usize = 12;

/// Writes one complete chunk: length, type tag, payload and the CRC over
/// tag and payload. Nothing reaches `sink` unless the arguments are valid.
pub fn write_chunk<W: Write + ?Sized>(sink: &mut W, chunk_type: &[u8], data: &[u8]) -> Result<()> {
    let chunk_type: &[u8; 4] = chunk_type.try_into().map_err(|_| {
        Error::invalid(format!(
            "chunk type must be exactly 4 bytes, got {}",
            chunk_type.len()
        ))
    })?;
    if !chunk_type.iter().all(u8::is_ascii_alphabetic) {
        return Err(Error::invalid(format!(
            "chunk type {chunk_type:?} must be ASCII letters"
        )));
    }
    let length = u32::try_from(data.len()).map_err(|_| {
        Error::invalid(format!(
            "chunk payload of {} bytes doesn't fit the length field",
            data.len()
        ))
    })?;
    let crc = crc::finalize(crc::update(crc::update(crc::INITIAL, chunk_type), data));
    log::trace!(
        "writing {} chunk: {length} bytes, crc {crc:08x}",
        String::from_utf8_lossy(chunk_type)
    );

    sink.write_all(&length.to_be_bytes())?;
    sink.write_all(chunk_type)?;
    sink.write_all(data)?;
    sink.write_all(&crc.to_be_bytes())?;
    Ok(())
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

impl Chunk<'_> {
    pub fn chunk_type(&self) -> &[u8; 4] {
        match self {
            Chunk::IHDR(_) => ihdr::IHDRChunk::HEADER,
            Chunk::IDAT(_) => idat::IDATChunk::HEADER,
            Chunk::IEND => iend::IENDChunk::HEADER,
            Chunk::Unknown(raw) => raw.chunk_type,
        }
    }
}

#[derive(Debug)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
}

pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.to_owned().into()))
            }
        }
    }
}

pub(crate) fn parse_chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (rest, (header, chunk_data)) = valid_chunk(input)?;
    let chunk = match header {
        h if h == ihdr::IHDRChunk::HEADER => {
            Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?.1)
        }
        h if h == idat::IDATChunk::HEADER => {
            Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?.1)
        }
        h if h == iend::IENDChunk::HEADER => {
            iend::IENDChunk::from_bytes(chunk_data)?;
            Chunk::IEND
        }
        _ => Chunk::Unknown(RawChunk {
            chunk_type: header,
            data: chunk_data,
        }),
    };
    Ok((rest, chunk))
}

/// Splits one chunk off `input`, rejecting it when the stored CRC doesn't match.
fn valid_chunk<'a>(input: &'a [u8]) -> IResult<&'a [u8], (&'a [u8; 4], &'a [u8])> {
    let (input, length) = be_u32(input)?;
    let (input, chunk_type) =
        map_res(take(4usize), |v: &'a [u8]| <&'a [u8; 4]>::try_from(v))(input)?;
    let (input, data) = take(length)(input)?;
    let expected = crc::finalize(crc::update(crc::update(crc::INITIAL, chunk_type), data));
    let (input, _) = verify(be_u32, |stored: &u32| *stored == expected)(input)?;
    Ok((input, (chunk_type, data)))
}

pub trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn data(&self) -> Cow<'_, [u8]>;

    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        write_chunk(sink, Self::HEADER, &self.data())
    }
}
