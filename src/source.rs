//! Producers of raw RGB buffers for loot images.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{crc, pixel::buffer_len, ImageBuffer, Result};

/// Number of diffusion passes `AdditiveNoise` runs.
pub const TIMESTEPS: u32 = 10;
/// Exclusive bound on the per-pass random nudge.
const MAX_DELTA: i32 = 30;

pub trait PixelSource {
    fn produce(&mut self, width: u32, height: u32) -> Result<ImageBuffer>;
}

/// Derives a reproducible seed from an item name. Unnamed items get `None`
/// and should be seeded from entropy.
pub fn seed_for_name(name: &str) -> Option<u64> {
    (!name.is_empty()).then(|| crc::compute(name.as_bytes()) as u64)
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Every byte drawn independently and uniformly.
#[derive(Debug)]
pub struct UniformRandom {
    rng: StdRng,
}

impl UniformRandom {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from(seed),
        }
    }
}

impl PixelSource for UniformRandom {
    fn produce(&mut self, width: u32, height: u32) -> Result<ImageBuffer> {
        let mut data = vec![0; buffer_len(width, height)?];
        self.rng.fill(&mut data[..]);
        ImageBuffer::new(width, height, data)
    }
}

/// Toy "diffusion": uniform noise, then `timesteps` passes that each nudge
/// every byte by a random delta scaled by how far along the pass is.
/// Out-of-range values fold back by absolute value and wrap modulo 256.
#[derive(Debug)]
pub struct AdditiveNoise {
    base: UniformRandom,
    timesteps: u32,
}

impl AdditiveNoise {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_timesteps(seed, TIMESTEPS)
    }

    pub fn with_timesteps(seed: Option<u64>, timesteps: u32) -> Self {
        Self {
            base: UniformRandom::new(seed),
            timesteps,
        }
    }
}

impl PixelSource for AdditiveNoise {
    fn produce(&mut self, width: u32, height: u32) -> Result<ImageBuffer> {
        let mut image = self.base.produce(width, height)?;
        let rng = &mut self.base.rng;
        for t in 0..self.timesteps {
            let noise_level = t as f32 / self.timesteps as f32;
            for byte in image.data_mut() {
                let delta = rng.gen_range(-MAX_DELTA..MAX_DELTA);
                let nudged = *byte as i32 + (delta as f32 * noise_level) as i32;
                *byte = nudged.unsigned_abs() as u8;
            }
        }
        Ok(image)
    }
}

/// Selects one of the available sources.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Uniform,
    #[default]
    Noise,
}

impl SourceKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn PixelSource + Send> {
        match self {
            SourceKind::Uniform => Box::new(UniformRandom::new(seed)),
            SourceKind::Noise => Box::new(AdditiveNoise::new(seed)),
        }
    }
}
