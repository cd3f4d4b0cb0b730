use crate::{
    item::{Item, ItemFactory, ItemRarity, ItemType},
    source::{seed_for_name, SourceKind},
    Compression, PngEncoder, Result,
};

/// How loot images are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
    pub source: SourceKind,
    pub compression: Compression,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
            source: SourceKind::default(),
            compression: Compression::default(),
        }
    }
}

/// Hands out loot items and renders images for them. Holds no mutable state,
/// so one instance can serve every request.
#[derive(Debug, Default)]
pub struct LootManager {
    factory: ItemFactory,
    settings: ImageSettings,
}

impl LootManager {
    pub fn new(settings: ImageSettings) -> Self {
        Self {
            factory: ItemFactory,
            settings,
        }
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    pub fn get_loot(&self, level: u32) -> Item {
        self.factory
            .create_item(level, ItemRarity::default(), ItemType::default())
    }

    /// Renders a PNG for `item`. A named item always gets the same image;
    /// without a name the pixels are random.
    pub fn generate_loot_image(&self, item: Option<&Item>) -> Result<Vec<u8>> {
        let name = item.map(|item| item.name.as_str()).unwrap_or_default();
        let ImageSettings {
            width,
            height,
            source,
            compression,
        } = self.settings;
        log::debug!("rendering {width}x{height} {source:?} image for {name:?}");
        let image = source.build(seed_for_name(name)).produce(width, height)?;
        PngEncoder::with_compression(compression).encode_image(&image)
    }
}
