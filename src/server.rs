//! HTTP front end: item descriptors as JSON, loot images as PNG.

use std::{sync::Arc, thread};

use anyhow::{anyhow, Context};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::loot::LootManager;

pub const BANNER: &str = "LootBox API\nv0.0.1";

const TEXT: &str = "text/plain; charset=utf-8";
const JSON: &str = "application/json";
const PNG: &str = "image/png";

#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT,
            body: body.into().into_bytes(),
        }
    }
}

/// Maps a request line onto a reply. Never panics on client input.
pub fn route(manager: &LootManager, method: &Method, target: &str) -> Reply {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let path = path.trim_end_matches('/').to_ascii_lowercase();
    let known = matches!(path.as_str(), "" | "/loot" | "/loot/image");
    if !known {
        return Reply::text(404, "Not Found");
    }
    if *method != Method::Get {
        return Reply::text(405, "Method Not Allowed");
    }

    let param = |key: &str| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    match path.as_str() {
        "" => Reply::text(200, BANNER),
        "/loot" => {
            let level = match param("level").map(|level| level.parse::<u32>()) {
                None => 1,
                Some(Ok(level)) => level,
                Some(Err(e)) => return Reply::text(400, format!("invalid level: {e}")),
            };
            match serde_json::to_vec(&manager.get_loot(level)) {
                Ok(body) => Reply {
                    status: 200,
                    content_type: JSON,
                    body,
                },
                Err(e) => {
                    log::error!("failed to serialize item: {e}");
                    Reply::text(500, "Internal Server Error")
                }
            }
        }
        _ => {
            let item = param("name").map(|name| {
                let mut item = manager.get_loot(1);
                item.name = name;
                item
            });
            match manager.generate_loot_image(item.as_ref()) {
                Ok(body) => Reply {
                    status: 200,
                    content_type: PNG,
                    body,
                },
                Err(e) => {
                    log::error!("failed to render loot image: {e}");
                    Reply::text(500, "Internal Server Error")
                }
            }
        }
    }
}

/// Answers requests from `server` on `workers` threads until the listener
/// shuts down.
pub fn serve(server: Arc<Server>, manager: Arc<LootManager>, workers: u16) -> anyhow::Result<()> {
    let handles = (0..workers)
        .map(|id| {
            let server = Arc::clone(&server);
            let manager = Arc::clone(&manager);
            thread::Builder::new()
                .name(format!("lootbox-worker-{id}"))
                .spawn(move || worker_loop(&server, &manager))
        })
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to spawn worker threads.")?;

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("worker thread panicked"))?;
    }
    Ok(())
}

fn worker_loop(server: &Server, manager: &LootManager) {
    loop {
        match server.recv() {
            Ok(request) => handle(request, manager),
            Err(e) => {
                log::error!("stopped accepting requests: {e}");
                break;
            }
        }
    }
}

fn handle(request: Request, manager: &LootManager) {
    let reply = route(manager, request.method(), request.url());
    log::info!(
        "{} {} -> {} ({} bytes)",
        request.method(),
        request.url(),
        reply.status,
        reply.body.len()
    );

    let mut response = Response::from_data(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type) {
        response.add_header(header);
    }
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response: {e}");
    }
}
