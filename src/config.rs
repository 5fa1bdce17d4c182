use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Vision API credentials, kept in a json file instead of the binary.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub key: String,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Credentials> {
        let bytes =
            fs::read(path).with_context(|| format!("failed to open {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}
