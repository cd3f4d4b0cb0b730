use anyhow::Context;
use clap::Parser;
use lootbox::{
    config::{init_logging, RenderConfig},
    loot::LootManager,
};
use std::fs;

fn main() -> anyhow::Result<()> {
    let config = RenderConfig::parse();
    init_logging(config.verbose);

    let settings = config.image.settings();
    let manager = LootManager::new(settings);
    let mut item = manager.get_loot(config.level);
    if let Some(name) = config.name {
        item.name = name;
    }
    let png = manager
        .generate_loot_image(Some(&item))
        .context("Failed to render loot image.")?;
    fs::write(&config.output, &png)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let description = serde_json::json!({
        "generated_at": now,
        "item": item,
        "width": config.image.width,
        "height": config.image.height,
        "compression": format!("{:?}", settings.compression),
    });
    let sidecar = config.output.with_extension("json");
    fs::write(&sidecar, serde_json::to_string_pretty(&description)?)
        .with_context(|| format!("Failed to write {}", sidecar.display()))?;
    log::info!(
        "wrote {} ({} bytes) and {}",
        config.output.display(),
        png.len(),
        sidecar.display()
    );
    Ok(())
}
