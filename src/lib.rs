pub mod chunks;
pub mod config;
pub mod crc;
pub mod decoder;
mod encoder;
mod error;
mod filters;
mod image_data;
pub mod item;
pub mod loot;
mod pixel;
pub mod scanlines;
pub mod server;
pub mod source;

pub use decoder::{decode, parse_signature};
pub use encoder::{encode, PngEncoder, SIGNATURE};
pub use error::{Error, Result};
pub use image_data::Compression;
pub use pixel::{ImageBuffer, Pixel};
