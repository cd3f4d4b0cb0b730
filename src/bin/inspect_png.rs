use anyhow::Context;
use clap::Parser;
use lootbox::{
    chunks::{self, Chunk},
    config::{init_logging, InspectConfig},
};

fn main() -> anyhow::Result<()> {
    let config = InspectConfig::parse();
    init_logging(config.verbose);

    let file_name = config.input.display();
    let input =
        std::fs::read(&config.input).with_context(|| format!("Failed to read {file_name}"))?;

    let (rest, _) = lootbox::parse_signature(&input)
        .map_err(|_| anyhow::anyhow!("{file_name} is not a PNG"))?;
    for chunk in chunks::iter_chunks(rest) {
        match chunk? {
            Chunk::IHDR(header) => println!(
                "IHDR {header:?}, {} bytes per scanline",
                header.scanline_size()
            ),
            Chunk::IDAT(idat) => println!("IDAT {} bytes", idat.data.len()),
            Chunk::IEND => println!("IEND"),
            Chunk::Unknown(raw) => println!(
                "{} {} bytes",
                String::from_utf8_lossy(raw.chunk_type),
                raw.data.len()
            ),
        }
    }

    let image = lootbox::decode(&input).context("Failed to decode image data.")?;
    println!("decoded {}x{} image", image.width(), image.height());
    if let Some(pixel) = image.pixel(0, 0) {
        println!("top-left pixel: {pixel:?}");
    }
    Ok(())
}
