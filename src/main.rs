#![warn(unused_extern_crates)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::compositor::OverlayAssets;
use crate::config::Credentials;
use crate::pipeline::{Pipeline, VisionClient};

mod codec;
mod compositor;
mod config;
mod error;
mod pipeline;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Local photo to gopherize
    #[arg(short, long)]
    image_path: Option<PathBuf>,

    /// Photo URL to fetch and gopherize
    #[arg(short, long)]
    url: Option<String>,

    /// Where to write the result; defaults to out.<input format>
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// Directory holding eye.png and mouth.png
    #[arg(long, default_value = "gopher")]
    assets_dir: PathBuf,

    /// Vision API credentials file
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,

    /// Override the annotate endpoint (useful for local stand-ins)
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let credentials = Credentials::load(&args.credentials)?;
    let assets = OverlayAssets::load(&args.assets_dir)?;
    let client = match args.endpoint {
        Some(endpoint) => VisionClient::with_endpoint(endpoint, credentials.key)?,
        None => VisionClient::new(credentials.key)?,
    };
    let pipeline = Pipeline::new(client, assets);

    let input = match (&args.image_path, &args.url) {
        (Some(path), None) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        (None, Some(url)) => fetch_image(url).await?,
        _ => bail!("pass exactly one of --image-path or --url"),
    };

    let start = Instant::now();
    let (output, format) = pipeline.run(&input).await?;
    debug!("Took {:?}", start.elapsed());

    let output_path = args
        .output_path
        .unwrap_or_else(|| PathBuf::from(format!("out.{}", format.extension())));
    fs::write(&output_path, output)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    info!("Result at {:?}", output_path);

    Ok(())
}

async fn fetch_image(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to get image from {url}"))?;

    if !response.status().is_success() {
        bail!("failed to get image: {} from {url}", response.status());
    }

    Ok(response.bytes().await?.to_vec())
}
