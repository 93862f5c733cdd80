//! Loading of external assets and creation of procedural ones.
//!
//! - `primitives` builds shared box/cylinder/cone/plane meshes and materials
//! - `paint` paints the procedural floor and wall textures
//! - `gltf` and `obj` parse external payloads into scene nodes

use anyhow::anyhow;

use crate::data_structures::scene_graph::SceneNode;

pub mod gltf;
pub mod obj;
pub mod paint;
pub mod primitives;

/// Payload formats understood by [`parse_asset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetFormat {
    Gltf,
    Obj,
}

impl AssetFormat {
    /// Picks the format from the extension of `location`, ignoring query strings.
    pub fn from_location(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "glb" | "gltf" => Some(Self::Gltf),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }
}

/// Parses a fetched payload into a scene node named after its location.
pub async fn parse_asset(location: &str, bytes: &[u8]) -> anyhow::Result<Box<dyn SceneNode>> {
    match AssetFormat::from_location(location) {
        Some(AssetFormat::Gltf) => gltf::load_gltf(bytes, location),
        Some(AssetFormat::Obj) => obj::load_obj(bytes, location).await,
        None => Err(anyhow!("unsupported asset format")),
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub async fn fetch_http(url: &str) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str, asset_base: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow!("page origin unavailable"))?;
    let base = reqwest::Url::parse(&format!("{}/{}/", origin, asset_base.trim_matches('/')))?;
    Ok(base.join(file_name)?)
}

/// Reads an asset. Absolute http(s) locations are fetched directly; anything
/// else is resolved against `asset_base`, which is a directory natively and a
/// path below the page origin on the web.
pub async fn load_binary(location: &str, asset_base: &str) -> anyhow::Result<Vec<u8>> {
    if is_remote(location) {
        return fetch_http(location).await;
    }
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(location, asset_base)?;
        fetch_http(url.as_str()).await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        use anyhow::Context;
        let path = std::path::Path::new(asset_base).join(location);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?
    };

    Ok(data)
}
