//! The `quadrix new` command.

use std::path::PathBuf;

use anyhow::Result;

use quadrix_core::model::UserId;

pub async fn execute(
    config_path: Option<PathBuf>,
    user: String,
    count: Option<usize>,
    format: String,
) -> Result<()> {
    super::check_listing_format(&format)?;
    let (config, engine) = super::open_engine(config_path.as_deref())?;
    let owner: UserId = super::parse_id("user", &user)?;
    let count = count.unwrap_or(config.default_count);

    let mut rng = super::make_rng(config.seed);
    let listing = engine.new_set(owner, count, &mut rng).await?;

    super::print_listing(&listing, &format)
}
