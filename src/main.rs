use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use lootbox::{
    config::{init_logging, ServerConfig},
    loot::LootManager,
    server,
};
use tiny_http::Server;

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.verbose);

    let manager = Arc::new(LootManager::new(config.image.settings()));
    let server = Server::http(&config.bind)
        .map_err(|e| anyhow!("Failed to listen on {}: {e}", config.bind))?;
    log::info!(
        "listening on {} with {} workers, images {:?}",
        config.bind,
        config.workers,
        manager.settings()
    );
    server::serve(Arc::new(server), manager, config.workers)
}
