//! Command-line and environment configuration for the binaries.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

use crate::{loot::ImageSettings, source::SourceKind, Compression};

/// Largest accepted image edge, in pixels.
pub const MAX_DIMENSION: i64 = 4096;

#[derive(Debug, Clone, Args)]
pub struct ImageOptions {
    /// Image width in pixels
    #[arg(long, env = "LOOTBOX_WIDTH", default_value_t = 24,
          value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, env = "LOOTBOX_HEIGHT", default_value_t = 24,
          value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub height: u32,

    /// Pixel generator
    #[arg(long, env = "LOOTBOX_SOURCE", value_enum, default_value_t = SourceArg::Noise)]
    pub source: SourceArg,

    /// IDAT payload encoding. `stored` matches the historical output, `zlib`
    /// produces PNGs that ordinary viewers can open.
    #[arg(long, env = "LOOTBOX_COMPRESSION", value_enum, default_value_t = CompressionArg::Stored)]
    pub compression: CompressionArg,
}

impl ImageOptions {
    pub fn settings(&self) -> ImageSettings {
        ImageSettings {
            width: self.width,
            height: self.height,
            source: self.source.into(),
            compression: self.compression.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Independent random bytes
    Uniform,
    /// Noise accumulated over several timesteps
    Noise,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Uniform => SourceKind::Uniform,
            SourceArg::Noise => SourceKind::Noise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    Stored,
    Zlib,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Stored => Compression::Stored,
            CompressionArg::Zlib => Compression::Zlib,
        }
    }
}

/// Serves loot items and their images over HTTP
#[derive(Debug, Parser)]
#[command(name = "lootbox", version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "LOOTBOX_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Number of request-handling threads
    #[arg(long, env = "LOOTBOX_WORKERS", default_value_t = 4,
          value_parser = clap::value_parser!(u16).range(1..=64))]
    pub workers: u16,

    #[command(flatten)]
    pub image: ImageOptions,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Renders one loot image to disk with a JSON description next to it
#[derive(Debug, Parser)]
#[command(name = "render-loot", version)]
pub struct RenderConfig {
    /// Where to write the PNG; the description goes to the same path with a
    /// `.json` extension
    pub output: PathBuf,

    /// Item name, also used to seed the pixels
    #[arg(long)]
    pub name: Option<String>,

    /// Item level
    #[arg(long, default_value_t = 1)]
    pub level: u32,

    #[command(flatten)]
    pub image: ImageOptions,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Lists the chunks of a PNG file and decodes its pixels
#[derive(Debug, Parser)]
#[command(name = "inspect-png", version)]
pub struct InspectConfig {
    /// PNG file to read
    pub input: PathBuf,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn init_logging(verbose: u8) {
    let verbosity = match verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{InspectConfig, RenderConfig, ServerConfig};
    use crate::{source::SourceKind, Compression};

    #[test]
    fn cli_definitions_are_consistent() {
        ServerConfig::command().debug_assert();
        RenderConfig::command().debug_assert();
        InspectConfig::command().debug_assert();
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::try_parse_from(["lootbox"]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.workers, 4);
        let settings = config.image.settings();
        assert_eq!((settings.width, settings.height), (24, 24));
        assert_eq!(settings.source, SourceKind::Noise);
        assert_eq!(settings.compression, Compression::Stored);
    }

    #[test]
    fn oversized_images_are_rejected() {
        assert!(ServerConfig::try_parse_from(["lootbox", "--width", "5000"]).is_err());
        assert!(ServerConfig::try_parse_from(["lootbox", "--height", "0"]).is_err());
        let config =
            RenderConfig::try_parse_from(["render-loot", "out.png", "--compression", "zlib", "-vv"])
                .unwrap();
        assert_eq!(config.image.settings().compression, Compression::Zlib);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn image_options_map_onto_settings() {
        let config = RenderConfig::try_parse_from([
            "render-loot",
            "out.png",
            "--source",
            "uniform",
            "--width",
            "64",
        ])
        .unwrap();
        let settings = config.image.settings();
        assert_eq!(settings.source, SourceKind::Uniform);
        assert_eq!(settings.compression, Compression::Stored);
        assert_eq!((settings.width, settings.height), (64, 24));
    }

    #[test]
    fn inspect_accepts_verbosity_anywhere() {
        for args in [
            &["inspect-png", "-v", "loot.png"][..],
            &["inspect-png", "loot.png", "-v"][..],
        ] {
            let config = InspectConfig::try_parse_from(args).unwrap();
            assert_eq!(config.input.to_str(), Some("loot.png"));
            assert_eq!(config.verbose, 1);
        }
        assert!(InspectConfig::try_parse_from(["inspect-png"]).is_err());
    }
}
