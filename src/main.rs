//! HAR Loader - downloads the UCI HAR dataset and prints the loaded tables.

use anyhow::{Context, Result};
use har_loader::{HarDataLoader, LoaderConfig, Subset};
use std::path::PathBuf;

/// Environment variable pointing at a JSON `LoaderConfig` file.
const CONFIG_ENV_VAR: &str = "HAR_LOADER_CONFIG";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional JSON config; HAR_DATASET_URL still wins for the URL
    let path = std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
    let config = LoaderConfig::load(path.as_deref()).context("loading configuration")?;
    let url = config.url.clone();
    let mut loader = HarDataLoader::with_config(config);
    loader
        .load()
        .with_context(|| format!("loading HAR dataset from {url}"))?;

    for subset in Subset::ALL {
        let Some(tables) = loader.tables(subset) else {
            continue;
        };
        println!("== {subset} x ==\n{}", tables.x.head(Some(5)));
        println!("== {subset} x_tr ==\n{}", tables.x_tr.head(Some(5)));
        println!("== {subset} y ==\n{}", tables.y.head(Some(5)));
    }

    Ok(())
}
