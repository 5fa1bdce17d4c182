use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// The two gopher sprites, decoded once at startup and never mutated.
/// Plain immutable data; clone it or park it behind an `Arc` to share
/// across requests.
#[derive(Debug, Clone)]
pub struct OverlayAssets {
    pub eye: RgbaImage,
    pub mouth: RgbaImage,
}

impl OverlayAssets {
    pub fn load(dir: &Path) -> Result<OverlayAssets> {
        Ok(OverlayAssets {
            eye: load_sprite(dir, "eye")?,
            mouth: load_sprite(dir, "mouth")?,
        })
    }
}

fn load_sprite(dir: &Path, name: &'static str) -> Result<RgbaImage> {
    let path = dir.join(format!("{name}.png"));
    let bytes = fs::read(&path).map_err(|source| Error::AssetRead { name, source })?;

    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|source| Error::AssetDecode { name, source })?;

    debug!(
        name,
        width = img.width(),
        height = img.height(),
        "loaded overlay sprite"
    );
    Ok(img.to_rgba8())
}
