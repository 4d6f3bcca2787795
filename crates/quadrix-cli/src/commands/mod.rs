pub mod init;
pub mod list;
pub mod new;
pub mod register;
pub mod score;

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quadrix_core::engine::QuizEngine;
use quadrix_core::model::SetListing;
use quadrix_store::config::{load_config_from, QuadrixConfig};
use quadrix_store::create_store;

/// Load config and build an engine over the configured store.
pub(crate) fn open_engine(config_path: Option<&Path>) -> Result<(QuadrixConfig, QuizEngine)> {
    let config = load_config_from(config_path)?;
    let store = create_store(&config.store)?;
    tracing::debug!(store = store.name(), "store ready");
    let engine = QuizEngine::new(store, config.engine_config());
    Ok((config, engine))
}

/// Seeded rng when the config pins a seed, OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn parse_id<T>(kind: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("invalid {kind} id: '{raw}'"))
}

const LISTING_FORMATS: [&str; 2] = ["text", "json"];

/// Reject an unknown listing format before anything touches the store.
pub(crate) fn check_listing_format(format: &str) -> Result<()> {
    anyhow::ensure!(
        LISTING_FORMATS.contains(&format),
        "unknown format: {format} (expected text or json)"
    );
    Ok(())
}

/// Print a listing as a table or as JSON.
pub(crate) fn print_listing(listing: &SetListing, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(listing)?);
        }
        "text" => {
            let mut table = Table::new();
            table.set_header(vec!["#", "Equation"]);
            for item in &listing.list {
                table.add_row(vec![Cell::new(item.id), Cell::new(&item.equation)]);
            }
            println!("Set: {}", listing.set_id);
            println!("{table}");
            println!("{} equations", listing.count);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
    Ok(())
}
