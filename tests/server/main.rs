use lootbox::{
    decode,
    item::Item,
    loot::{ImageSettings, LootManager},
    server::route,
    source::SourceKind,
    Compression,
};
use tiny_http::Method;

fn manager() -> LootManager {
    LootManager::new(ImageSettings {
        width: 12,
        height: 8,
        source: SourceKind::Noise,
        compression: Compression::Stored,
    })
}

#[test]
fn loot_route_returns_item_json() {
    let reply = route(&manager(), &Method::Get, "/loot?level=5");
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type, "application/json");
    let item: Item = serde_json::from_slice(&reply.body).unwrap();
    assert_eq!(item.level, 5);
    assert_eq!(item.name, "New Item");

    let default_level: Item =
        serde_json::from_slice(&route(&manager(), &Method::Get, "/loot").body).unwrap();
    assert_eq!(default_level.level, 1);
}

#[test]
fn image_route_uses_configured_dimensions() {
    let reply = route(&manager(), &Method::Get, "/loot/image");
    assert_eq!(reply.status, 200);
    let image = decode(&reply.body).unwrap();
    assert_eq!((image.width(), image.height()), (12, 8));
}

#[test]
fn named_images_are_reproducible() {
    let url = "/loot/image?name=Cursed+Gauntlet";
    let first = route(&manager(), &Method::Get, url);
    let second = route(&manager(), &Method::Get, url);
    assert_eq!(first.body, second.body);
}

#[test]
fn trailing_slash_and_banner() {
    let reply = route(&manager(), &Method::Get, "/loot/");
    assert_eq!(reply.status, 200);
    let home = route(&manager(), &Method::Get, "/");
    assert_eq!(String::from_utf8(home.body).unwrap(), "LootBox API\nv0.0.1");
}
